//! Concrete pixel buffers and the read capability the transforms work against.

use std::path::Path;

use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};

use crate::color::{ColorModel, Pixel, decode};

pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Axis-aligned region, inclusive of its min corner and exclusive of its max.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

impl Rect {
    /// Builds a rectangle from two corners in any order.
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        Self {
            min_x: x0.min(x1),
            min_y: y0.min(y1),
            max_x: x0.max(x1),
            max_y: y0.max(y1),
        }
    }

    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x >= self.min_x
            && other.min_y >= self.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }
}

/// Read access to an image whose pixels carry a declared color model.
pub trait PixelSource {
    fn bounds(&self) -> Rect;

    fn color_model(&self) -> ColorModel;

    /// Pixel at `(x, y)`. Coordinates must lie inside [`PixelSource::bounds`].
    fn pixel(&self, x: u32, y: u32) -> Pixel;
}

/// An owned image in one of the supported buffer representations.
#[derive(Debug, Clone, PartialEq)]
pub enum Raster {
    /// 8-bit channels with alpha premultiplied in. Transform output lands here.
    Premultiplied(RgbaImage),
    /// 8-bit straight-alpha channels, as decoded from most image files.
    Straight(RgbaImage),
    /// 16-bit channels read without any alpha handling.
    Other(Rgba16Image),
}

impl Raster {
    /// Blank, fully transparent premultiplied raster.
    pub fn new_premultiplied(width: u32, height: u32) -> Self {
        Raster::Premultiplied(RgbaImage::new(width, height))
    }

    /// Wraps a decoded image. 16-bit sources are kept at full depth.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        match img {
            DynamicImage::ImageRgba8(buf) => Raster::Straight(buf),
            deep if matches!(
                deep,
                DynamicImage::ImageLuma16(_)
                    | DynamicImage::ImageLumaA16(_)
                    | DynamicImage::ImageRgb16(_)
                    | DynamicImage::ImageRgba16(_)
            ) =>
            {
                Raster::Other(deep.to_rgba16())
            }
            other => Raster::Straight(other.to_rgba8()),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Raster::Premultiplied(buf) | Raster::Straight(buf) => buf.dimensions(),
            Raster::Other(buf) => buf.dimensions(),
        }
    }

    /// Stores a straight-alpha color, encoded for this buffer's representation.
    pub fn put(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        match self {
            Raster::Premultiplied(buf) => {
                let Rgba([r, g, b, a]) = color;
                buf.put_pixel(
                    x,
                    y,
                    Rgba([premultiply8(r, a), premultiply8(g, a), premultiply8(b, a), a]),
                );
            }
            Raster::Straight(buf) => buf.put_pixel(x, y, color),
            Raster::Other(buf) => buf.put_pixel(x, y, Rgba(color.0.map(|c| u16::from(c) * 0x101))),
        }
    }

    /// Re-encodes into a premultiplied buffer. Premultiplied rasters are returned as is.
    pub fn into_premultiplied(self) -> Self {
        if let Raster::Premultiplied(_) = self {
            return self;
        }

        let (w, h) = self.dimensions();
        let mut out = Raster::new_premultiplied(w, h);
        for y in 0..h {
            for x in 0..w {
                out.put(x, y, decode(self.pixel(x, y)));
            }
        }
        out
    }

    /// Re-encodes into an 8-bit straight-alpha buffer. Straight rasters are returned as is.
    pub fn into_straight(self) -> Self {
        match self {
            Raster::Straight(_) => self,
            _ => Raster::Straight(self.to_rgba8()),
        }
    }

    /// Straight-alpha 8-bit copy, ready for an encoder.
    pub fn to_rgba8(&self) -> RgbaImage {
        match self {
            Raster::Straight(buf) => buf.clone(),
            _ => {
                let (w, h) = self.dimensions();
                RgbaImage::from_fn(w, h, |x, y| decode(self.pixel(x, y)))
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> image::ImageResult<()> {
        self.to_rgba8().save(path)
    }
}

impl PixelSource for Raster {
    fn bounds(&self) -> Rect {
        let (w, h) = self.dimensions();
        Rect::from_size(w, h)
    }

    fn color_model(&self) -> ColorModel {
        match self {
            Raster::Premultiplied(_) => ColorModel::Premultiplied,
            Raster::Straight(_) => ColorModel::Straight,
            Raster::Other(_) => ColorModel::Other,
        }
    }

    fn pixel(&self, x: u32, y: u32) -> Pixel {
        match self {
            Raster::Premultiplied(buf) => Pixel::premultiplied8(*buf.get_pixel(x, y)),
            Raster::Straight(buf) => Pixel::Straight(*buf.get_pixel(x, y)),
            Raster::Other(buf) => Pixel::Other(*buf.get_pixel(x, y)),
        }
    }
}

fn premultiply8(c: u8, a: u8) -> u8 {
    ((u16::from(c) * u16::from(a) + 127) / 255) as u8
}
