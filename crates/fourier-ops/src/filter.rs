//! Convolution engine and blur operations.
//!
//! Filters mutate an [`Image`] in place. Which planes take part depends on
//! the color space (see [`participating_channels`]); the chroma planes of
//! a YCbCr image are left alone.
//!
//! # Boundary Policy
//!
//! Only pixels whose whole kernel footprint lies inside the image are
//! recomputed. Pixels closer than the kernel radius to an edge keep their
//! previous value. There is no padding, clamping or wraparound.
//!
//! Each plane is computed from a snapshot of its previous contents, so a
//! pass never reads its own output.
//!
//! # Example
//!
//! ```rust
//! use fourier_core::{ChannelKind, ColorSpace, Image};
//! use fourier_ops::filter::{box_blur, convolve};
//! use fourier_ops::kernel::Kernel;
//!
//! let mut img = Image::filled(16, 16, ColorSpace::Rgb, 50.0);
//! convolve(&mut img, &Kernel::identity());
//! box_blur(&mut img, 2).unwrap();
//! assert!((img.sample(ChannelKind::Green, 8, 8).unwrap() - 50.0).abs() < 1e-4);
//! ```

use crate::kernel::{blur_needs_normalization, Kernel};
use crate::{OpsError, OpsResult};
use fourier_core::{ChannelKind, ColorSpace, Image};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

const RGB_PLANES: [ChannelKind; 3] = [ChannelKind::Red, ChannelKind::Green, ChannelKind::Blue];
const CMYK_PLANES: [ChannelKind; 4] = [
    ChannelKind::Cyan,
    ChannelKind::Magenta,
    ChannelKind::Yellow,
    ChannelKind::Black,
];
const LUMA_PLANES: [ChannelKind; 1] = [ChannelKind::Intensity];

/// Channels a convolution touches for the given color space.
///
/// | Color space | Channels |
/// |---|---|
/// | RGB, RGBX, RGBA | RED, GREEN, BLUE |
/// | CMYK | CYAN, MAGENTA, YELLOW, BLACK |
/// | YCbCr, GRAY | INTENSITY |
pub fn participating_channels(color_space: ColorSpace) -> &'static [ChannelKind] {
    match color_space {
        ColorSpace::Rgb | ColorSpace::Rgbx | ColorSpace::Rgba => &RGB_PLANES,
        ColorSpace::Cmyk => &CMYK_PLANES,
        ColorSpace::YCbCr | ColorSpace::Gray => &LUMA_PLANES,
    }
}

/// Correlates one plane with `kernel` over its interior.
fn convolve_plane(plane: &mut [f32], width: usize, height: usize, kernel: &Kernel) {
    let (rx, ry) = kernel.radius();
    if width < kernel.width() || height < kernel.height() {
        return;
    }

    let src = plane.to_vec();
    let weights = kernel.data();
    let kw = kernel.width();

    for y in ry..height - ry {
        for x in rx..width - rx {
            let mut sum = 0.0f32;
            for (ky, row) in weights.chunks_exact(kw).enumerate() {
                let start = (y + ky - ry) * width + x - rx;
                for (s, w) in src[start..start + kw].iter().zip(row) {
                    sum += s * w;
                }
            }
            plane[y * width + x] = sum;
        }
    }
}

/// Applies `kernel` to every participating plane of `image`.
///
/// Border pixels within the kernel radius keep their values. Planes are
/// processed concurrently when the `parallel` feature is enabled.
pub fn convolve(image: &mut Image, kernel: &Kernel) {
    let (width, height) = image.dimensions();
    trace!(
        width,
        height,
        color_space = %image.color_space(),
        kernel_w = kernel.width(),
        kernel_h = kernel.height(),
        "convolve"
    );

    let selected = participating_channels(image.color_space());
    let planes: Vec<&mut [f32]> = image
        .channels_mut()
        .filter(|(kind, _)| selected.contains(kind))
        .map(|(_, plane)| plane)
        .collect();

    let (w, h) = (width as usize, height as usize);

    #[cfg(feature = "parallel")]
    planes
        .into_par_iter()
        .for_each(|plane| convolve_plane(plane, w, h, kernel));

    #[cfg(not(feature = "parallel"))]
    for plane in planes {
        convolve_plane(plane, w, h, kernel);
    }
}

/// Validates raw kernel rows, then convolves.
///
/// # Errors
///
/// [`OpsError::InvalidKernel`] for empty, ragged or even-sized rows. The
/// image is not modified in that case.
pub fn convolve_rows(image: &mut Image, rows: &[Vec<f32>]) -> OpsResult<()> {
    let kernel = Kernel::from_rows(rows.to_vec())?;
    convolve(image, &kernel);
    Ok(())
}

pub(crate) fn validate_sigma(sigma: f32) -> OpsResult<()> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(OpsError::InvalidParameter(format!(
            "standard deviation must be finite and positive, got {}",
            sigma
        )));
    }
    Ok(())
}

/// Side length `2r + 1` of a blur kernel.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if the length does not fit in `usize`.
pub(crate) fn validate_radius(radius: usize) -> OpsResult<usize> {
    radius
        .checked_mul(2)
        .and_then(|d| d.checked_add(1))
        .ok_or_else(|| OpsError::InvalidParameter(format!("blur radius {} is too large", radius)))
}

/// Which passes of a `size`-wide separable blur have interior pixels: (row, column).
fn fitting_passes(image: &Image, size: usize) -> (bool, bool) {
    (
        size <= image.width() as usize,
        size <= image.height() as usize,
    )
}

fn blur_kernel(kernel: Kernel, sigma: f32, radius: usize) -> Kernel {
    if blur_needs_normalization(sigma, radius) {
        kernel.normalized()
    } else {
        kernel
    }
}

/// Blurs with a single 2-D Gaussian kernel.
///
/// A kernel wider or taller than the image recomputes no pixel, so the
/// image is left unchanged without building it.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `sigma` is not finite and positive or
/// `2 * radius + 1` overflows.
pub fn gaussian_blur_naive(image: &mut Image, sigma: f32, radius: usize) -> OpsResult<()> {
    validate_sigma(sigma)?;
    let size = validate_radius(radius)?;
    debug!(sigma, radius, "Applying 2-D gaussian blur");

    if fitting_passes(image, size) != (true, true) {
        trace!(size, "kernel exceeds image, nothing to do");
        return Ok(());
    }
    let kernel = blur_kernel(Kernel::gaussian(sigma, radius), sigma, radius);
    convolve(image, &kernel);
    Ok(())
}

/// Blurs with a Gaussian row pass followed by a column pass.
///
/// Cheaper than [`gaussian_blur_naive`] for larger radii. A pass whose
/// kernel is longer than the image along its axis is skipped.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `sigma` is not finite and positive or
/// `2 * radius + 1` overflows.
pub fn gaussian_blur(image: &mut Image, sigma: f32, radius: usize) -> OpsResult<()> {
    validate_sigma(sigma)?;
    let size = validate_radius(radius)?;
    debug!(sigma, radius, "Applying separable gaussian blur");

    let (rows, columns) = fitting_passes(image, size);
    if rows {
        convolve(image, &blur_kernel(Kernel::gaussian_row(sigma, radius), sigma, radius));
    }
    if columns {
        convolve(image, &blur_kernel(Kernel::gaussian_column(sigma, radius), sigma, radius));
    }
    Ok(())
}

/// Blurs with flat row and column averages of width `2r + 1`.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if `2 * radius + 1` overflows.
pub fn box_blur(image: &mut Image, radius: usize) -> OpsResult<()> {
    let size = validate_radius(radius)?;
    debug!(radius, "Applying box blur");

    let (rows, columns) = fitting_passes(image, size);
    if rows {
        convolve(image, &Kernel::box_row(radius));
    }
    if columns {
        convolve(image, &Kernel::box_column(radius));
    }
    Ok(())
}
