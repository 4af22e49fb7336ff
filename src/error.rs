use thiserror::Error;

use crate::color::ColorModel;
use crate::raster::Rect;

/// Errors raised by the image transforms.
#[derive(Debug, Error)]
pub enum FilterError {
    /// The region to average is empty or reaches outside the image.
    #[error("invalid region {region:?} for image bounds {bounds:?}")]
    InvalidRegion { region: Rect, bounds: Rect },

    /// The concrete pixel buffer doesn't have the representation the transform writes or reads.
    #[error("unsupported image format: expected {expected:?} buffer, got {actual:?}")]
    UnsupportedImageFormat {
        expected: ColorModel,
        actual: ColorModel,
    },

    #[error("invalid scale {0}: must be a finite number greater than zero")]
    InvalidScale(f64),
}

pub type Result<T> = std::result::Result<T, FilterError>;
