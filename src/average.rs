use image::Rgba;

use crate::color::decode;
use crate::error::{FilterError, Result};
use crate::raster::{PixelSource, Rect};

/// Mean straight-alpha color of `rect`, truncated per channel.
///
/// Alpha is averaged like any other channel. The region must be non-empty
/// and lie inside the image bounds.
pub fn average<S: PixelSource + ?Sized>(image: &S, rect: Rect) -> Result<Rgba<u8>> {
    let bounds = image.bounds();
    if rect.is_empty() || !bounds.contains_rect(&rect) {
        return Err(FilterError::InvalidRegion {
            region: rect,
            bounds,
        });
    }

    let mut sum = [0u64; 4];
    for y in rect.min_y..rect.max_y {
        for x in rect.min_x..rect.max_x {
            let p = decode(image.pixel(x, y)).0;
            for i in 0..4 {
                sum[i] += u64::from(p[i]);
            }
        }
    }

    let count = u64::from(rect.width()) * u64::from(rect.height());
    Ok(Rgba(sum.map(|s| (s / count) as u8)))
}
