use image::Rgba;
use log::debug;

use crate::color::ColorModel;
use crate::error::{FilterError, Result};
use crate::raster::{PixelSource, Raster};

/// Greyscale a premultiplied raster in place.
///
/// Every pixel becomes the plain average of its red, green and blue
/// channels, alpha untouched. The channels are weighted equally rather than
/// by perceptual luminance.
///
/// The average is taken on the stored premultiplied bytes. Premultiplying is
/// linear, so this is the premultiplied form of the straight-alpha average,
/// and pixels that are already grey come back bit for bit.
pub fn greyscale(image: &mut Raster) -> Result<()> {
    let model = image.color_model();
    let Raster::Premultiplied(buf) = image else {
        return Err(FilterError::UnsupportedImageFormat {
            expected: ColorModel::Premultiplied,
            actual: model,
        });
    };

    // TODO: offer BT.709 luminance weights behind a flag, keeping this average as the default.
    for px in buf.pixels_mut() {
        let Rgba([r, g, b, a]) = *px;
        let avg = ((u32::from(r) + u32::from(g) + u32::from(b)) / 3) as u8;
        *px = Rgba([avg, avg, avg, a]);
    }
    debug!("greyscaled {}x{} pixels", buf.width(), buf.height());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn filled(color: Rgba<u8>) -> Raster {
        Raster::Premultiplied(RgbaImage::from_pixel(5, 5, color))
    }

    #[test]
    fn primaries_average_to_grey() {
        let cases = [
            ("red", Rgba([255, 0, 0, 255]), Rgba([85, 85, 85, 255])),
            ("green", Rgba([0, 255, 0, 255]), Rgba([85, 85, 85, 255])),
            ("blue", Rgba([0, 0, 255, 255]), Rgba([85, 85, 85, 255])),
            ("black", Rgba([0, 0, 0, 255]), Rgba([0, 0, 0, 255])),
            ("white", Rgba([255, 255, 255, 255]), Rgba([255, 255, 255, 255])),
        ];

        for (name, color, expected) in cases {
            let mut image = filled(color);
            greyscale(&mut image).unwrap();
            assert_eq!(image, filled(expected), "case {name}");
        }
    }

    #[test]
    fn grey_pixels_are_left_alone() {
        for a in 0..=255u8 {
            for v in 0..=a {
                let color = Rgba([v, v, v, a]);
                let mut image = filled(color);
                greyscale(&mut image).unwrap();
                assert_eq!(image, filled(color), "color {color:?}");
            }
        }
    }

    #[test]
    fn transparent_pixel_keeps_its_bytes() {
        let mut image = filled(Rgba([5, 5, 5, 0]));
        greyscale(&mut image).unwrap();
        assert_eq!(image, filled(Rgba([5, 5, 5, 0])));
    }

    #[test]
    fn repeated_runs_are_stable() {
        let mut image = filled(Rgba([90, 31, 7, 138]));
        greyscale(&mut image).unwrap();
        let once = image.clone();
        greyscale(&mut image).unwrap();
        assert_eq!(image, once);
    }

    #[test]
    fn partially_transparent_colors_keep_alpha() {
        // straight (100, 50, 0, 128) is stored premultiplied as (50, 25, 0, 128)
        let cases = [
            ("orange_half", Rgba([100, 50, 0, 128]), Rgba([25, 25, 25, 128])),
            ("red_quarter", Rgba([255, 0, 0, 64]), Rgba([21, 21, 21, 64])),
        ];

        for (name, straight, expected) in cases {
            let mut image = Raster::new_premultiplied(1, 1);
            image.put(0, 0, straight);
            greyscale(&mut image).unwrap();

            let Raster::Premultiplied(buf) = &image else {
                panic!("expected premultiplied raster");
            };
            assert_eq!(*buf.get_pixel(0, 0), expected, "case {name}");
        }
    }

    #[test]
    fn mixed_pixels_truncate() {
        let mut image = Raster::Premultiplied(RgbaImage::from_fn(2, 1, |x, _| {
            if x == 0 { Rgba([10, 20, 31, 255]) } else { Rgba([1, 1, 0, 255]) }
        }));
        greyscale(&mut image).unwrap();

        let out = image.to_rgba8();
        assert_eq!(*out.get_pixel(0, 0), Rgba([20, 20, 20, 255]));
        assert_eq!(*out.get_pixel(1, 0), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn rejects_straight_buffers() {
        let mut image = Raster::Straight(RgbaImage::new(2, 2));
        let err = greyscale(&mut image).unwrap_err();
        assert!(matches!(
            err,
            FilterError::UnsupportedImageFormat {
                expected: ColorModel::Premultiplied,
                actual: ColorModel::Straight,
            }
        ));
    }
}
