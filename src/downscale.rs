use log::debug;

use crate::average::average;
use crate::color::ColorModel;
use crate::error::{FilterError, Result};
use crate::raster::{PixelSource, Raster, Rect};

/// Shrinks `image` by block averaging.
///
/// A `scale` of 1 or more hands the image back untouched. Otherwise each
/// `ceil(1 / scale)`-sized square block of the source becomes one pixel of
/// a new premultiplied raster; leftover columns and rows on the right and
/// bottom edges that don't fill a whole block are dropped.
///
/// Only straight-alpha sources are accepted for an actual downscale.
pub fn downscale(image: Raster, scale: f64) -> Result<Raster> {
    if scale.is_nan() || scale <= 0.0 {
        return Err(FilterError::InvalidScale(scale));
    }
    if scale >= 1.0 {
        return Ok(image);
    }

    let model = image.color_model();
    if model != ColorModel::Straight {
        return Err(FilterError::UnsupportedImageFormat {
            expected: ColorModel::Straight,
            actual: model,
        });
    }

    let divider = block_size(scale);
    let (w, h) = image.dimensions();
    let (out_w, out_h) = (w / divider, h / divider);
    debug!("downscaling {w}x{h} by {divider} to {out_w}x{out_h}");

    let mut out = Raster::new_premultiplied(out_w, out_h);
    for y in 0..out_h {
        for x in 0..out_w {
            let (ox, oy) = (x * divider, y * divider);
            let block = Rect::new(ox, oy, ox + divider, oy + divider);
            out.put(x, y, average(&image, block)?);
        }
    }

    Ok(out)
}

/// Side of the square source block folded into one output pixel.
fn block_size(scale: f64) -> u32 {
    (1.0 / scale).ceil().min(f64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn straight(width: u32, height: u32) -> Raster {
        Raster::Straight(RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 10) as u8, (y * 10) as u8, 0, 255])
        }))
    }

    #[test]
    fn scale_of_one_or_more_is_a_no_op() {
        for scale in [1.0, 1.5, 4.0, f64::INFINITY] {
            let image = straight(5, 3);
            assert_eq!(downscale(image.clone(), scale).unwrap(), image);
        }
    }

    #[test]
    fn no_op_does_not_check_the_format() {
        let image = Raster::new_premultiplied(2, 2);
        assert_eq!(downscale(image.clone(), 1.0).unwrap(), image);
    }

    #[test]
    fn block_size_rounds_up() {
        assert_eq!(block_size(0.5), 2);
        assert_eq!(block_size(0.4), 3);
        assert_eq!(block_size(0.25), 4);
        assert_eq!(block_size(0.99), 2);
    }

    #[test]
    fn output_dimensions_drop_remainders() {
        let cases = [
            (0.5, (10, 7), (5, 3)),
            (0.4, (10, 7), (3, 2)),
            (0.25, (9, 9), (2, 2)),
            (0.1, (5, 5), (0, 0)),
        ];

        for (scale, (w, h), expected) in cases {
            let out = downscale(straight(w, h), scale).unwrap();
            assert_eq!(out.dimensions(), expected, "scale {scale} on {w}x{h}");
            assert_eq!(out.color_model(), ColorModel::Premultiplied);
        }
    }

    #[test]
    fn blocks_are_averaged() {
        let image = straight(4, 2);
        let out = downscale(image, 0.5).unwrap();

        // block (0,0) covers x in {0, 10}, y in {0, 10}
        assert_eq!(out.to_rgba8().get_pixel(0, 0), &Rgba([5, 5, 0, 255]));
        assert_eq!(out.to_rgba8().get_pixel(1, 0), &Rgba([25, 5, 0, 255]));
    }

    #[test]
    fn rejects_non_straight_sources() {
        let image = Raster::new_premultiplied(4, 4);
        let err = downscale(image, 0.5).unwrap_err();
        assert!(matches!(
            err,
            FilterError::UnsupportedImageFormat {
                expected: ColorModel::Straight,
                actual: ColorModel::Premultiplied,
            }
        ));
    }

    #[test]
    fn rejects_degenerate_scales() {
        for scale in [0.0, -0.5, f64::NAN, f64::NEG_INFINITY] {
            let err = downscale(straight(2, 2), scale).unwrap_err();
            assert!(matches!(err, FilterError::InvalidScale(_)));
        }
    }
}
