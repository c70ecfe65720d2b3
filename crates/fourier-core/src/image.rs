//! Channel-plane image buffer.
//!
//! An [`Image`] holds one contiguous `f32` plane per channel of its
//! [`ColorSpace`]. Planes are stored in the order given by
//! [`ColorSpace::channels`], so channel presence is decided by the color
//! space tag rather than by a runtime map.
//!
//! # Memory Layout
//!
//! Each plane is row-major, top-to-bottom; sample `(x, y)` lives at
//! index `width * y + x`:
//!
//! ```text
//! RED:   [r r r r ...]   <- width * height samples
//! GREEN: [g g g g ...]
//! BLUE:  [b b b b ...]
//! ```
//!
//! Samples are nominally in `[0, 255]`. Arithmetic may leave that range;
//! such images are valid intermediates but not encodable output.
//!
//! # Usage
//!
//! ```rust
//! use fourier_core::{ChannelKind, ColorSpace, Image};
//!
//! let mut img = Image::new(16, 8, ColorSpace::Rgb);
//! img.set_sample(ChannelKind::Red, 3, 2, 255.0).unwrap();
//! assert_eq!(img.sample(ChannelKind::Red, 3, 2).unwrap(), 255.0);
//! assert_eq!(img.plane(ChannelKind::Green).unwrap().len(), 16 * 8);
//! ```

use crate::{ChannelKind, ColorSpace, Error, Result};
use std::fmt;

/// Owned image made of per-channel sample planes.
///
/// Cloning performs a deep copy; no two images share plane storage.
#[derive(Clone, PartialEq)]
pub struct Image {
    width: u32,
    height: u32,
    color_space: ColorSpace,
    /// One plane per channel, ordered as `color_space.channels()`.
    planes: Vec<Vec<f32>>,
}

impl Image {
    /// Maximum representable intensity of an 8-bit sample.
    pub const MAX_INTENSITY: f32 = u8::MAX as f32;

    /// Creates a zero-filled canvas in the given color space.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fourier_core::{ColorSpace, Image};
    ///
    /// let img = Image::new(1920, 1080, ColorSpace::Cmyk);
    /// assert_eq!(img.channels().len(), 4);
    /// ```
    pub fn new(width: u32, height: u32, color_space: ColorSpace) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            color_space,
            planes: vec![vec![0.0; len]; color_space.channel_count()],
        }
    }

    /// Creates an image from existing planes.
    ///
    /// `planes` must contain one plane per channel of `color_space`, in
    /// [`ColorSpace::channels`] order, each holding `width * height` samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if the plane count or any plane
    /// length doesn't match.
    pub fn from_planes(
        width: u32,
        height: u32,
        color_space: ColorSpace,
        planes: Vec<Vec<f32>>,
    ) -> Result<Self> {
        if planes.len() != color_space.channel_count() {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!(
                    "{} expects {} planes, got {}",
                    color_space,
                    color_space.channel_count(),
                    planes.len()
                ),
            ));
        }
        let expected = width as usize * height as usize;
        for (kind, plane) in color_space.channels().iter().zip(&planes) {
            if plane.len() != expected {
                return Err(Error::invalid_dimensions(
                    width,
                    height,
                    format!("plane {} has {} samples, expected {}", kind, plane.len(), expected),
                ));
            }
        }
        Ok(Self {
            width,
            height,
            color_space,
            planes,
        })
    }

    /// Creates an image with every sample of every channel set to `value`.
    pub fn filled(width: u32, height: u32, color_space: ColorSpace, value: f32) -> Self {
        let mut img = Self::new(width, height, color_space);
        img.map_samples(|_| value);
        img
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the current color space.
    #[inline]
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Returns the channels present, in plane order.
    #[inline]
    pub fn channels(&self) -> &'static [ChannelKind] {
        self.color_space.channels()
    }

    /// Returns the number of samples in each plane.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Maximum representable intensity (255).
    #[inline]
    pub fn max_intensity() -> f32 {
        Self::MAX_INTENSITY
    }

    #[inline]
    fn plane_index(&self, kind: ChannelKind) -> Result<usize> {
        self.color_space
            .index_of(kind)
            .ok_or_else(|| Error::missing_channel(kind, self.color_space))
    }

    #[inline]
    fn linear_index(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok(self.width as usize * y as usize + x as usize)
    }

    /// Returns the plane of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingChannel`] if `kind` is not in the color space.
    pub fn plane(&self, kind: ChannelKind) -> Result<&[f32]> {
        let idx = self.plane_index(kind)?;
        Ok(&self.planes[idx])
    }

    /// Returns the plane of `kind` mutably.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingChannel`] if `kind` is not in the color space.
    pub fn plane_mut(&mut self, kind: ChannelKind) -> Result<&mut [f32]> {
        let idx = self.plane_index(kind)?;
        Ok(&mut self.planes[idx])
    }

    /// Returns the sample of `kind` at `(x, y)`.
    pub fn sample(&self, kind: ChannelKind, x: u32, y: u32) -> Result<f32> {
        let idx = self.plane_index(kind)?;
        let offset = self.linear_index(x, y)?;
        Ok(self.planes[idx][offset])
    }

    /// Sets the sample of `kind` at `(x, y)`.
    pub fn set_sample(&mut self, kind: ChannelKind, x: u32, y: u32, value: f32) -> Result<()> {
        let idx = self.plane_index(kind)?;
        let offset = self.linear_index(x, y)?;
        self.planes[idx][offset] = value;
        Ok(())
    }

    /// Copies row `y` of channel `kind`.
    pub fn row(&self, kind: ChannelKind, y: u32) -> Result<Vec<f32>> {
        let plane = self.plane(kind)?;
        if y >= self.height {
            return Err(Error::out_of_bounds(0, y, self.width, self.height));
        }
        let start = y as usize * self.width as usize;
        Ok(plane[start..start + self.width as usize].to_vec())
    }

    /// Iterates `(channel, plane)` pairs in plane order.
    pub fn planes(&self) -> impl Iterator<Item = (ChannelKind, &[f32])> + '_ {
        self.color_space
            .channels()
            .iter()
            .copied()
            .zip(self.planes.iter().map(Vec::as_slice))
    }

    /// Iterates `(channel, plane)` pairs mutably, in plane order.
    pub fn channels_mut(&mut self) -> impl Iterator<Item = (ChannelKind, &mut [f32])> + '_ {
        self.color_space
            .channels()
            .iter()
            .copied()
            .zip(self.planes.iter_mut().map(Vec::as_mut_slice))
    }

    /// Applies `f` to every sample of every channel in place.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fourier_core::{ChannelKind, ColorSpace, Image};
    ///
    /// let mut img = Image::filled(4, 4, ColorSpace::Gray, 10.0);
    /// img.map_samples(|v| v * 2.0);
    /// assert_eq!(img.sample(ChannelKind::Intensity, 0, 0).unwrap(), 20.0);
    /// ```
    pub fn map_samples<F>(&mut self, f: F)
    where
        F: Fn(f32) -> f32,
    {
        for plane in &mut self.planes {
            for v in plane.iter_mut() {
                *v = f(*v);
            }
        }
    }

    /// Replaces the whole channel layout.
    ///
    /// Conversion code uses this to move between color spaces; callers
    /// must supply planes in `color_space.channels()` order.
    pub(crate) fn replace_planes(&mut self, color_space: ColorSpace, planes: Vec<Vec<f32>>) {
        debug_assert_eq!(planes.len(), color_space.channel_count());
        debug_assert!(planes.iter().all(|p| p.len() == self.pixel_count()));
        self.color_space = color_space;
        self.planes = planes;
    }

    /// Moves the planes out, leaving the image empty until replaced.
    pub(crate) fn take_planes(&mut self) -> Vec<Vec<f32>> {
        std::mem::take(&mut self.planes)
    }

    pub(crate) fn raw_planes(&self) -> &[Vec<f32>] {
        &self.planes
    }

    /// Renders every sample as text.
    ///
    /// Output starts with `Color space: <name>`, then for each channel a
    /// `Channel: <name>` header, one bracketed line per row and a `---`
    /// separator.
    pub fn dump(&self) -> String {
        let mut out = format!("Color space: {}\n", self.color_space);
        let width = self.width as usize;
        for (kind, plane) in self.planes() {
            out.push_str(&format!("Channel: {}\n", kind));
            if width > 0 {
                for row in plane.chunks_exact(width) {
                    out.push('[');
                    for v in row {
                        out.push_str(&format!("{}, ", v));
                    }
                    out.push_str("]\n");
                }
            }
            out.push_str("---\n");
        }
        out
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Image {{ Width: {}, Height: {}, Color space: {} }}",
            self.width, self.height, self.color_space
        )
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("color_space", &self.color_space)
            .field("channels", &self.channels())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_exact_channel_set() {
        for cs in ColorSpace::ALL {
            let img = Image::new(5, 3, cs);
            assert_eq!(img.channels(), cs.channels());
            for kind in ChannelKind::ALL {
                let plane = img.plane(kind);
                if cs.contains(kind) {
                    let plane = plane.unwrap();
                    assert_eq!(plane.len(), 15);
                    assert!(plane.iter().all(|&v| v == 0.0));
                } else {
                    assert!(matches!(plane, Err(Error::MissingChannel { .. })));
                }
            }
        }
    }

    #[test]
    fn test_rgbx_uses_ignored_alpha() {
        let img = Image::new(2, 2, ColorSpace::Rgbx);
        assert!(img.plane(ChannelKind::AlphaIgnored).is_ok());
        assert!(img.plane(ChannelKind::Alpha).is_err());
    }

    #[test]
    fn test_addressing() {
        let mut img = Image::new(4, 3, ColorSpace::Gray);
        img.set_sample(ChannelKind::Intensity, 1, 2, 7.0).unwrap();
        assert_eq!(img.plane(ChannelKind::Intensity).unwrap()[4 * 2 + 1], 7.0);
        assert_eq!(img.row(ChannelKind::Intensity, 2).unwrap(), vec![0.0, 7.0, 0.0, 0.0]);
    }

    #[test]
    fn test_out_of_bounds() {
        let img = Image::new(4, 3, ColorSpace::Gray);
        let err = img.sample(ChannelKind::Intensity, 4, 0).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { x: 4, y: 0, .. }));
        assert!(img.row(ChannelKind::Intensity, 3).is_err());
    }

    #[test]
    fn test_from_planes_validation() {
        let ok = Image::from_planes(2, 2, ColorSpace::Gray, vec![vec![1.0; 4]]);
        assert!(ok.is_ok());

        let wrong_count = Image::from_planes(2, 2, ColorSpace::Rgb, vec![vec![1.0; 4]]);
        assert!(matches!(wrong_count, Err(Error::InvalidDimensions { .. })));

        let wrong_len = Image::from_planes(2, 2, ColorSpace::Gray, vec![vec![1.0; 3]]);
        assert!(matches!(wrong_len, Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn test_clone_is_deep() {
        let a = Image::filled(3, 3, ColorSpace::Rgb, 1.0);
        let mut b = a.clone();
        b.set_sample(ChannelKind::Red, 0, 0, 9.0).unwrap();
        assert_eq!(a.sample(ChannelKind::Red, 0, 0).unwrap(), 1.0);
        assert_eq!(b.sample(ChannelKind::Red, 0, 0).unwrap(), 9.0);
    }

    #[test]
    fn test_display() {
        let img = Image::new(640, 480, ColorSpace::YCbCr);
        assert_eq!(
            img.to_string(),
            "Image { Width: 640, Height: 480, Color space: YCbCr }"
        );
    }

    #[test]
    fn test_dump() {
        let mut img = Image::new(2, 1, ColorSpace::Gray);
        img.set_sample(ChannelKind::Intensity, 1, 0, 3.5).unwrap();
        assert_eq!(
            img.dump(),
            "Color space: GRAY\nChannel: INTENSITY\n[0, 3.5, ]\n---\n"
        );
    }
}
