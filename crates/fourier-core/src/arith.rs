//! Element-wise image arithmetic.
//!
//! Binary operations require both operands to share color space and
//! dimensions. The color space is checked first, then width and height.
//! They always build a fresh [`Image`]; neither operand is modified.
//!
//! Scalar operations exist in two forms: consuming operators (`img + 1.0`,
//! `img * 0.5`) and `&self` methods returning a copy. [`Image::powf`] and
//! [`Image::sqrt`] mutate in place, matching how the edge pipeline uses them.
//!
//! ```rust
//! use fourier_core::{ChannelKind, ColorSpace, Image};
//!
//! let a = Image::filled(2, 2, ColorSpace::Gray, 3.0);
//! let b = Image::filled(2, 2, ColorSpace::Gray, 4.0);
//!
//! let mut sum = a.multiply(&a).unwrap().add(&b.multiply(&b).unwrap()).unwrap();
//! sum.sqrt();
//! assert_eq!(sum.sample(ChannelKind::Intensity, 1, 1).unwrap(), 5.0);
//! ```

use crate::{Error, Image, Result};
use std::ops;

impl Image {
    /// Verifies that `other` has the same color space and dimensions.
    pub fn check_compatible(&self, other: &Image) -> Result<()> {
        if self.color_space() != other.color_space() {
            return Err(Error::color_space_mismatch(
                self.color_space(),
                other.color_space(),
            ));
        }
        if self.dimensions() != other.dimensions() {
            return Err(Error::dimension_mismatch(
                self.dimensions(),
                other.dimensions(),
            ));
        }
        Ok(())
    }

    fn zip_with<F>(&self, other: &Image, f: F) -> Result<Image>
    where
        F: Fn(f32, f32) -> f32,
    {
        self.check_compatible(other)?;
        let planes = self
            .raw_planes()
            .iter()
            .zip(other.raw_planes())
            .map(|(a, b)| a.iter().zip(b).map(|(&x, &y)| f(x, y)).collect())
            .collect();
        Image::from_planes(self.width(), self.height(), self.color_space(), planes)
    }

    /// Per-sample sum of two images.
    ///
    /// # Errors
    ///
    /// [`Error::ColorSpaceMismatch`] or [`Error::DimensionMismatch`].
    pub fn add(&self, other: &Image) -> Result<Image> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Per-sample product of two images.
    ///
    /// # Errors
    ///
    /// [`Error::ColorSpaceMismatch`] or [`Error::DimensionMismatch`].
    pub fn multiply(&self, other: &Image) -> Result<Image> {
        self.zip_with(other, |a, b| a * b)
    }

    /// Per-sample `atan2(self, other)`, in radians.
    ///
    /// `self` supplies the y argument and `other` the x argument.
    pub fn atan2(&self, other: &Image) -> Result<Image> {
        self.zip_with(other, f32::atan2)
    }

    /// Returns a copy with `value` added to every sample.
    pub fn offset(&self, value: f32) -> Image {
        let mut out = self.clone();
        out.map_samples(|v| v + value);
        out
    }

    /// Returns a copy with every sample multiplied by `factor`.
    pub fn scale(&self, factor: f32) -> Image {
        let mut out = self.clone();
        out.map_samples(|v| v * factor);
        out
    }

    /// Raises every sample to `exponent` in place.
    pub fn powf(&mut self, exponent: f32) -> &mut Self {
        self.map_samples(|v| v.powf(exponent));
        self
    }

    /// Replaces every sample with its square root in place.
    ///
    /// Negative samples become NaN.
    pub fn sqrt(&mut self) -> &mut Self {
        self.map_samples(f32::sqrt);
        self
    }
}

impl ops::Add<f32> for Image {
    type Output = Image;

    fn add(mut self, rhs: f32) -> Image {
        self.map_samples(|v| v + rhs);
        self
    }
}

impl ops::Add<f32> for &Image {
    type Output = Image;

    fn add(self, rhs: f32) -> Image {
        self.offset(rhs)
    }
}

impl ops::Mul<f32> for Image {
    type Output = Image;

    fn mul(mut self, rhs: f32) -> Image {
        self.map_samples(|v| v * rhs);
        self
    }
}

impl ops::Mul<f32> for &Image {
    type Output = Image;

    fn mul(self, rhs: f32) -> Image {
        self.scale(rhs)
    }
}
