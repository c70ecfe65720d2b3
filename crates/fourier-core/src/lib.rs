//! # fourier-core
//!
//! Raster image model for the fourier toolkit.
//!
//! This crate provides:
//!
//! - [`ChannelKind`] - Tags for the scalar components of a pixel
//! - [`ColorSpace`] - The six supported color spaces and their exact channel sets
//! - [`Image`] - Planar `f32` image whose channels are fixed by its color space
//! - Color space conversion ([`Image::to_rgb`], [`Image::to_ycbcr`], [`Image::to_gray`])
//! - Element-wise arithmetic ([`Image::add`], [`Image::multiply`], [`Image::atan2`])
//!
//! ## Design
//!
//! An image never carries a channel its color space doesn't define. Asking
//! for one is an error, not a silent zero:
//!
//! ```
//! use fourier_core::{ChannelKind, ColorSpace, Image};
//!
//! let mut img = Image::new(8, 8, ColorSpace::Rgba);
//! assert!(img.plane(ChannelKind::Alpha).is_ok());
//!
//! img.to_gray();
//! assert!(img.plane(ChannelKind::Alpha).is_err());
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! fourier-core (this crate)
//!    ^
//!    +-- fourier-ops (kernels, convolution, edge detection)
//!    +-- fourier-io  (JPEG / PNG codec adapter)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod arith;
pub mod channel;
pub mod colorspace;
pub mod convert;
pub mod error;
pub mod image;

pub use channel::ChannelKind;
pub use colorspace::{ColorSpace, ParseColorSpaceError};
pub use error::{Error, Result};
pub use image::Image;

/// Prelude module for convenient imports.
///
/// ```
/// use fourier_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::channel::ChannelKind;
    pub use crate::colorspace::ColorSpace;
    pub use crate::error::{Error, Result};
    pub use crate::image::Image;
}
