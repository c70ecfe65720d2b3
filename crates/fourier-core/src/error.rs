//! Error types for fourier-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of the raster model:
//! - Channel lookups outside an image's color space
//! - Pixel coordinates outside the image
//! - Binary operations on incompatible operands
//! - Construction from malformed plane data
//!
//! Invariant violations inside conversions (reaching a branch that a fast
//! path already handled) are not represented here; they panic.
//!
//! # Usage
//!
//! ```rust
//! use fourier_core::{ChannelKind, ColorSpace, Error, Image};
//!
//! let img = Image::new(4, 4, ColorSpace::Gray);
//! let err = img.plane(ChannelKind::Red).unwrap_err();
//! assert!(matches!(err, Error::MissingChannel { .. }));
//! ```

use crate::{ChannelKind, ColorSpace};
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or operating on an [`Image`](crate::Image).
///
/// # Categories
///
/// - **Operand errors**: [`ColorSpaceMismatch`](Error::ColorSpaceMismatch), [`DimensionMismatch`](Error::DimensionMismatch)
/// - **Lookup errors**: [`MissingChannel`](Error::MissingChannel), [`OutOfBounds`](Error::OutOfBounds)
/// - **Construction errors**: [`InvalidDimensions`](Error::InvalidDimensions)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Binary operation on images in different color spaces.
    #[error("color space mismatch: {left} vs {right}")]
    ColorSpaceMismatch {
        /// Color space of the left operand
        left: ColorSpace,
        /// Color space of the right operand
        right: ColorSpace,
    },

    /// Binary operation on images of different sizes.
    ///
    /// Belongs to the same class as [`Error::ColorSpaceMismatch`]: both
    /// operands must agree in color space and dimensions.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First image width
        a_width: u32,
        /// First image height
        a_height: u32,
        /// Second image width
        b_width: u32,
        /// Second image height
        b_height: u32,
    },

    /// The requested channel is not part of the image's color space.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fourier_core::{ChannelKind, ColorSpace, Error};
    ///
    /// let err = Error::missing_channel(ChannelKind::Alpha, ColorSpace::Rgb);
    /// assert_eq!(err.to_string(), "channel ALPHA is not present in color space RGB");
    /// ```
    #[error("channel {channel} is not present in color space {color_space}")]
    MissingChannel {
        /// Requested channel
        channel: ChannelKind,
        /// Color space of the image
        color_space: ColorSpace,
    },

    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Plane data does not fit the declared size or color space.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why the data was rejected
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::ColorSpaceMismatch`] error.
    #[inline]
    pub fn color_space_mismatch(left: ColorSpace, right: ColorSpace) -> Self {
        Self::ColorSpaceMismatch { left, right }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::MissingChannel`] error.
    #[inline]
    pub fn missing_channel(channel: ChannelKind, color_space: ColorSpace) -> Self {
        Self::MissingChannel {
            channel,
            color_space,
        }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if two operands disagreed in color space or size.
    #[inline]
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            Self::ColorSpaceMismatch { .. } | Self::DimensionMismatch { .. }
        )
    }

    /// Returns `true` if this is a channel or coordinate lookup error.
    #[inline]
    pub fn is_lookup_error(&self) -> bool {
        matches!(self, Self::MissingChannel { .. } | Self::OutOfBounds { .. })
    }
}
