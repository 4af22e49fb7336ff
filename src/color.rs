//! Pixel values tagged with their color model, and the decoder that turns
//! any of them into straight-alpha 8-bit RGBA.

use image::Rgba;

/// How the red, green and blue channels of a pixel relate to its alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorModel {
    /// Channels already have the alpha fraction multiplied in.
    Premultiplied,
    /// Channels are true intensities, independent of alpha.
    Straight,
    /// Anything else. Channels are taken as given.
    Other,
}

/// A single color together with the model its channels are expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pixel {
    /// 16-bit channels with alpha premultiplied into r, g and b.
    Premultiplied(Rgba<u16>),
    /// 8-bit straight-alpha channels.
    Straight(Rgba<u8>),
    /// 16-bit channels of an unrecognised model.
    Other(Rgba<u16>),
}

impl Pixel {
    /// Premultiplies a straight-alpha color into 16-bit channels.
    pub fn premultiply(color: Rgba<u8>) -> Self {
        let Rgba([r, g, b, a]) = color;
        let a16 = u32::from(a) * 0x101;
        // 0xFFFF * 0xFFFF still fits in a u32
        let scale = |c: u8| (u32::from(c) * 0x101 * a16 / 0xFFFF) as u16;
        Pixel::Premultiplied(Rgba([scale(r), scale(g), scale(b), a16 as u16]))
    }

    /// Widens an 8-bit premultiplied color, as stored in a premultiplied buffer.
    pub fn premultiplied8(color: Rgba<u8>) -> Self {
        Pixel::Premultiplied(Rgba(color.0.map(|c| u16::from(c) * 0x101)))
    }

    pub fn model(&self) -> ColorModel {
        match self {
            Pixel::Premultiplied(_) => ColorModel::Premultiplied,
            Pixel::Straight(_) => ColorModel::Straight,
            Pixel::Other(_) => ColorModel::Other,
        }
    }

    /// Raw 16-bit channels, with straight colors premultiplied first.
    pub fn rgba16(&self) -> [u16; 4] {
        match *self {
            Pixel::Premultiplied(p) | Pixel::Other(p) => p.0,
            Pixel::Straight(p) => Pixel::premultiply(p).rgba16(),
        }
    }

    pub fn decode(self) -> Rgba<u8> {
        decode(self)
    }
}

/// Normalizes a pixel into straight-alpha 8-bit channels.
///
/// Premultiplied colors have their alpha divided back out. A fully
/// transparent premultiplied pixel carries no recoverable color, so its
/// channels are only narrowed to 8 bits. Straight colors pass through
/// untouched and other models are narrowed without any division.
pub fn decode(pixel: Pixel) -> Rgba<u8> {
    let narrow = |c: u16| (c >> 8) as u8;

    match pixel {
        Pixel::Premultiplied(Rgba([r, g, b, a])) => {
            let a8 = u32::from(a >> 8);
            if a8 == 0 {
                return Rgba([narrow(r), narrow(g), narrow(b), 0]);
            }

            // Malformed input with a channel above alpha saturates.
            let unmultiply = |c: u16| ((u32::from(c) * 0xFF / a8) >> 8).min(0xFF) as u8;
            Rgba([unmultiply(r), unmultiply(g), unmultiply(b), a8 as u8])
        }
        Pixel::Straight(p) => p,
        Pixel::Other(Rgba([r, g, b, a])) => Rgba([narrow(r), narrow(g), narrow(b), narrow(a)]),
    }
}
