//! Canny-style edge detection.
//!
//! [`canny_edge_detect`] runs a fixed sequence of stages on one image:
//!
//! 1. Convert to GRAY.
//! 2. Separable Gaussian blur ([`gaussian_blur`]).
//! 3. Sobel gradients `Gx`, `Gy` on two copies of the blurred image.
//! 4. Direction `atan2(Gy², Gx²)` and magnitude `sqrt(Gx² + Gy²) / √2`.
//! 5. Non-maximum suppression against integer neighbours in one of eight
//!    `π/4` octants.
//! 6. Double threshold to 255, 127.5 or 0.
//!
//! There is no hysteresis tracing; the threshold is a single per-pixel pass.
//!
//! Pixels whose Sobel footprint leaves the image have no gradient estimate
//! and get a zero gradient, so a uniform image produces no edges at all.
//!
//! # Example
//!
//! ```rust
//! use fourier_core::{ChannelKind, ColorSpace, Image};
//! use fourier_ops::edge::{canny_edge_detect, EdgeParams};
//!
//! let mut img = Image::filled(10, 10, ColorSpace::Gray, 100.0);
//! canny_edge_detect(&mut img, &EdgeParams::default()).unwrap();
//! assert!(img.plane(ChannelKind::Intensity).unwrap().iter().all(|&v| v == 0.0));
//! ```

use crate::filter::{convolve, gaussian_blur, validate_radius, validate_sigma};
use crate::kernel::Kernel;
use crate::{OpsError, OpsResult};
use fourier_core::{ChannelKind, Image};
use std::f32::consts::{FRAC_1_SQRT_2, FRAC_PI_4, TAU};
use tracing::{debug, trace};

/// Parameters for [`canny_edge_detect`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeParams {
    /// Standard deviation of the pre-blur.
    pub blur_sigma: f32,
    /// Radius of the pre-blur kernels.
    pub blur_radius: usize,
    /// Magnitudes at or above this become strong edges (255).
    pub upper_threshold: f32,
    /// Magnitudes at or above this, below `upper_threshold`, become weak edges (127.5).
    pub lower_threshold: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            blur_sigma: 1.4,
            blur_radius: 2,
            upper_threshold: 76.8,
            lower_threshold: 25.6,
        }
    }
}

impl EdgeParams {
    /// Sets the blur standard deviation.
    pub fn with_blur_sigma(mut self, sigma: f32) -> Self {
        self.blur_sigma = sigma;
        self
    }

    /// Sets the blur radius.
    pub fn with_blur_radius(mut self, radius: usize) -> Self {
        self.blur_radius = radius;
        self
    }

    /// Sets the strong-edge threshold.
    pub fn with_upper_threshold(mut self, upper: f32) -> Self {
        self.upper_threshold = upper;
        self
    }

    /// Sets the weak-edge threshold.
    pub fn with_lower_threshold(mut self, lower: f32) -> Self {
        self.lower_threshold = lower;
        self
    }

    /// Checks the blur sigma and radius and that the thresholds are finite.
    ///
    /// Thresholds need not be ordered. With `lower > upper` the weak band is
    /// empty and only strong edges remain.
    pub fn validate(&self) -> OpsResult<()> {
        validate_sigma(self.blur_sigma)?;
        validate_radius(self.blur_radius)?;
        if !self.upper_threshold.is_finite() || !self.lower_threshold.is_finite() {
            return Err(OpsError::InvalidParameter(
                "edge thresholds must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Octant `0..8` of a direction in radians, counting `π/4` sectors from 0.
///
/// Angles are wrapped into `[0, 2π)` first.
#[inline]
pub fn octant(theta: f32) -> usize {
    (theta.rem_euclid(TAU) / FRAC_PI_4).floor() as usize % 8
}

/// Neighbour offsets `(next, last)` compared against the center in each octant.
const NEIGHBOURS: [((isize, isize), (isize, isize)); 8] = [
    ((1, 0), (-1, 0)),
    ((1, -1), (-1, 1)),
    ((0, -1), (0, 1)),
    ((-1, -1), (1, 1)),
    ((-1, 0), (1, 0)),
    ((-1, 1), (1, -1)),
    ((0, 1), (0, -1)),
    ((1, 1), (-1, -1)),
];

/// Sets samples within `(rx, ry)` of any edge to zero.
fn clear_margin(plane: &mut [f32], width: usize, height: usize, rx: usize, ry: usize) {
    for (y, row) in plane.chunks_exact_mut(width.max(1)).enumerate() {
        if y < ry || y + ry >= height {
            row.fill(0.0);
        } else {
            let left = rx.min(width);
            row[..left].fill(0.0);
            row[width.saturating_sub(rx)..].fill(0.0);
        }
    }
}

/// Convolves a copy of `image` with a gradient kernel.
///
/// Margin pixels, where the kernel footprint leaves the image, are zeroed.
pub fn gradient(image: &Image, kernel: &Kernel) -> Image {
    let mut out = image.clone();
    convolve(&mut out, kernel);
    let (w, h) = (out.width() as usize, out.height() as usize);
    let (rx, ry) = kernel.radius();
    for (_, plane) in out.channels_mut() {
        clear_margin(plane, w, h, rx, ry);
    }
    out
}

/// Squares the gradients in place and returns `atan2(Gy², Gx²)`.
///
/// After the call `gx` and `gy` hold `Gx²` and `Gy²`, ready for
/// [`gradient_magnitude`].
pub fn gradient_direction(gx: &mut Image, gy: &mut Image) -> OpsResult<Image> {
    gx.check_compatible(gy)?;
    gx.powf(2.0);
    gy.powf(2.0);
    Ok(gy.atan2(gx)?)
}

/// Returns `sqrt(gx_sq + gy_sq) / √2`.
pub fn gradient_magnitude(gx_sq: &Image, gy_sq: &Image) -> OpsResult<Image> {
    let mut magnitude = gx_sq.add(gy_sq)?;
    magnitude.sqrt();
    Ok(magnitude * FRAC_1_SQRT_2)
}

/// Suppresses intensity samples that are not local maxima along `theta`.
///
/// Each interior pixel is compared with the two integer neighbours of its
/// octant and set to 0 if it is smaller than either. Comparisons read the
/// unsuppressed values. The one-pixel border is left as is.
///
/// # Errors
///
/// Fails if the images differ in size or color space, or lack an INTENSITY
/// plane.
pub fn non_maximum_suppression(magnitude: &mut Image, theta: &Image) -> OpsResult<()> {
    magnitude.check_compatible(theta)?;
    let (w, h) = (magnitude.width() as usize, magnitude.height() as usize);
    let directions = theta.plane(ChannelKind::Intensity)?;
    let plane = magnitude.plane_mut(ChannelKind::Intensity)?;
    if w < 3 || h < 3 {
        return Ok(());
    }

    let src = plane.to_vec();
    let at = |x: usize, y: usize, (dx, dy): (isize, isize)| {
        let nx = (x as isize + dx) as usize;
        let ny = (y as isize + dy) as usize;
        src[ny * w + nx]
    };

    let mut suppressed = 0usize;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let idx = y * w + x;
            let (next, last) = NEIGHBOURS[octant(directions[idx])];
            let center = src[idx];
            if center < at(x, y, next) || center < at(x, y, last) {
                plane[idx] = 0.0;
                suppressed += 1;
            }
        }
    }
    trace!(suppressed, "non_maximum_suppression");
    Ok(())
}

/// Classifies every sample into strong, weak or no edge.
///
/// `v >= upper` becomes the maximum intensity, `lower <= v < upper` half
/// of it, anything else 0.
pub fn double_threshold(image: &mut Image, upper: f32, lower: f32) {
    let strong = Image::max_intensity();
    let weak = strong / 2.0;
    image.map_samples(|v| {
        if v >= upper {
            strong
        } else if v >= lower {
            weak
        } else {
            0.0
        }
    });
}

/// Runs the full edge detection pipeline in place.
///
/// The image ends up in GRAY with INTENSITY samples of 0, 127.5 or 255.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if [`EdgeParams::validate`] rejects
/// `params`. The image is not modified in that case.
pub fn canny_edge_detect(image: &mut Image, params: &EdgeParams) -> OpsResult<()> {
    params.validate()?;
    trace!(
        width = image.width(),
        height = image.height(),
        sigma = params.blur_sigma,
        radius = params.blur_radius,
        upper = params.upper_threshold,
        lower = params.lower_threshold,
        "canny_edge_detect"
    );

    image.to_gray();
    gaussian_blur(image, params.blur_sigma, params.blur_radius)?;

    let mut gx = gradient(image, &Kernel::sobel_x());
    let mut gy = gradient(image, &Kernel::sobel_y());
    let theta = gradient_direction(&mut gx, &mut gy)?;
    let mut magnitude = gradient_magnitude(&gx, &gy)?;

    non_maximum_suppression(&mut magnitude, &theta)?;
    double_threshold(&mut magnitude, params.upper_threshold, params.lower_threshold);

    let strong = magnitude
        .plane(ChannelKind::Intensity)?
        .iter()
        .filter(|&&v| v == Image::max_intensity())
        .count();
    debug!(strong, "Edge detection complete");

    *image = magnitude;
    Ok(())
}
