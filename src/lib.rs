//! Downscale, greyscale and ASCII-render raster images.
//!
//! The pipeline the `aaf` binary runs looks like this:
//!
//! ```no_run
//! use ascii_art_filter::{Raster, downscale, greyscale, to_ascii};
//!
//! let img = image::open("photo.png").unwrap();
//! let raster = downscale(Raster::from_dynamic(img), 0.25).unwrap();
//! let mut raster = raster.into_premultiplied();
//! greyscale(&mut raster).unwrap();
//! print!("{}", to_ascii(&raster));
//! ```

pub mod ascii;
pub mod average;
pub mod color;
pub mod downscale;
pub mod error;
pub mod greyscale;
pub mod raster;

pub use ascii::{ASCII_RAMP, glyph_for, render, to_ascii};
pub use average::average;
pub use color::{ColorModel, Pixel, decode};
pub use downscale::downscale;
pub use error::{FilterError, Result};
pub use greyscale::greyscale;
pub use raster::{PixelSource, Raster, Rect, Rgba16Image};
