//! Convolution kernels.
//!
//! A [`Kernel`] is an immutable matrix of weights with odd width and odd
//! height, so every kernel has a unique center cell. Kernels are built by
//! the generator functions below or validated from raw rows with
//! [`Kernel::from_rows`].
//!
//! # Generators
//!
//! - [`Kernel::gaussian`] - 2-D Gaussian
//! - [`Kernel::gaussian_row`], [`Kernel::gaussian_column`] - separable 1-D factors
//! - [`Kernel::box_row`], [`Kernel::box_column`] - flat averages
//! - [`Kernel::gaussian_derivative_x`], [`Kernel::gaussian_derivative_y`] - derivative of Gaussian
//! - [`Kernel::sobel_x`], [`Kernel::sobel_y`] - 3x3 gradient approximations
//!
//! Gaussian generators produce analytic, unnormalized weights. Blur
//! operations rescale them with [`Kernel::normalized`] when
//! [`blur_needs_normalization`] says the radius truncates the tails.
//!
//! # Example
//!
//! ```rust
//! use fourier_ops::kernel::Kernel;
//!
//! let k = Kernel::gaussian(1.0, 2).normalized();
//! assert_eq!((k.width(), k.height()), (5, 5));
//! assert!((k.sum() - 1.0).abs() < 1e-5);
//! ```

use crate::{OpsError, OpsResult};
use std::f32::consts::PI;

/// Radius, in standard deviations, below which blur kernels are normalized.
pub const BLUR_ACCURACY: f32 = 3.0;

/// Returns `true` if a blur kernel of this radius should be rescaled to sum to 1.
///
/// Below `3σ` the Gaussian tails are cut off noticeably and the analytic
/// weights would darken the image.
#[inline]
pub fn blur_needs_normalization(sigma: f32, radius: usize) -> bool {
    (radius as f32) < BLUR_ACCURACY * sigma
}

/// Immutable convolution kernel with odd dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Validates raw rows and builds a kernel from them.
    ///
    /// # Errors
    ///
    /// [`OpsError::InvalidKernel`] if there are no rows, the row count is
    /// even, any row has even length, or rows differ in length.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fourier_ops::kernel::Kernel;
    ///
    /// assert!(Kernel::from_rows(vec![vec![0.25, 0.5, 0.25]]).is_ok());
    /// assert!(Kernel::from_rows(vec![vec![0.5, 0.5]]).is_err());
    /// ```
    pub fn from_rows(rows: Vec<Vec<f32>>) -> OpsResult<Self> {
        Self::validate_rows(&rows)?;
        let height = rows.len();
        let width = rows[0].len();
        let data = rows.into_iter().flatten().collect();
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub(crate) fn validate_rows(rows: &[Vec<f32>]) -> OpsResult<()> {
        let Some(first) = rows.first() else {
            return Err(OpsError::InvalidKernel("kernel has no rows".into()));
        };
        if rows.len() % 2 == 0 {
            return Err(OpsError::InvalidKernel(format!(
                "kernel height must be odd, got {}",
                rows.len()
            )));
        }
        let width = first.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() % 2 == 0 {
                return Err(OpsError::InvalidKernel(format!(
                    "kernel width must be odd, row {} has {} cells",
                    i,
                    row.len()
                )));
            }
            if row.len() != width {
                return Err(OpsError::InvalidKernel(format!(
                    "kernel rows must be the same size, row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
        }
        Ok(())
    }

    /// Builds a `(2 * rx + 1) x (2 * ry + 1)` kernel; `f(dx, dy)` receives offsets from the center.
    fn from_fn<F>(rx: usize, ry: usize, f: F) -> Self
    where
        F: Fn(f32, f32) -> f32,
    {
        let width = 2 * rx + 1;
        let height = 2 * ry + 1;
        let mut data = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let dx = x as f32 - rx as f32;
                let dy = y as f32 - ry as f32;
                data.push(f(dx, dy));
            }
        }
        Self {
            data,
            width,
            height,
        }
    }

    /// The 1x1 identity kernel `[[1]]`.
    pub fn identity() -> Self {
        Self {
            data: vec![1.0],
            width: 1,
            height: 1,
        }
    }

    /// Square 2-D Gaussian of the given radius.
    ///
    /// Cell `(dx, dy)` is `exp(-(dx² + dy²) / 2σ²) / 2πσ²`.
    pub fn gaussian(sigma: f32, radius: usize) -> Self {
        let p = 2.0 * sigma * sigma;
        let q = 2.0 * PI * sigma * sigma;
        Self::from_fn(radius, radius, |dx, dy| (-(dx * dx + dy * dy) / p).exp() / q)
    }

    /// Horizontal 1-D Gaussian factor, `1 x (2r + 1)`.
    ///
    /// Cell at signed offset `dx` is `exp(-dx / 2σ²) / sqrt(2πσ²)`. The
    /// exponent is linear in the offset, so the row is not symmetric.
    pub fn gaussian_row(sigma: f32, radius: usize) -> Self {
        let (p, q) = separable_factors(sigma);
        Self::from_fn(radius, 0, |dx, _| (-dx / p).exp() / q)
    }

    /// Vertical 1-D Gaussian factor, `(2r + 1) x 1`.
    ///
    /// Same weights as [`Kernel::gaussian_row`], laid out as a column.
    pub fn gaussian_column(sigma: f32, radius: usize) -> Self {
        let (p, q) = separable_factors(sigma);
        Self::from_fn(0, radius, |_, dy| (-dy / p).exp() / q)
    }

    /// Flat horizontal average of width `2r + 1`.
    pub fn box_row(radius: usize) -> Self {
        let weight = 1.0 / (2 * radius + 1) as f32;
        Self::from_fn(radius, 0, |_, _| weight)
    }

    /// Flat vertical average of height `2r + 1`.
    pub fn box_column(radius: usize) -> Self {
        let weight = 1.0 / (2 * radius + 1) as f32;
        Self::from_fn(0, radius, |_, _| weight)
    }

    /// Derivative-of-Gaussian kernel along x.
    ///
    /// Cell `(dx, dy)` is `-dx · exp(-(dx² + dy²) / 2σ²) / q` with
    /// `q = 2πσ⁴ · σ·sqrt(2/π)`.
    pub fn gaussian_derivative_x(sigma: f32, radius: usize) -> Self {
        let (p, q) = derivative_factors(sigma);
        Self::from_fn(radius, radius, |dx, dy| -dx * (-(dx * dx + dy * dy) / p).exp() / q)
    }

    /// Derivative-of-Gaussian kernel along y.
    ///
    /// Transpose of [`Kernel::gaussian_derivative_x`].
    pub fn gaussian_derivative_y(sigma: f32, radius: usize) -> Self {
        let (p, q) = derivative_factors(sigma);
        Self::from_fn(radius, radius, |dx, dy| -dy * (-(dx * dx + dy * dy) / p).exp() / q)
    }

    /// Horizontal 3x3 Sobel kernel.
    pub fn sobel_x() -> Self {
        #[rustfmt::skip]
        let data = vec![
            1.0, 0.0, -1.0,
            2.0, 0.0, -2.0,
            1.0, 0.0, -1.0,
        ];
        Self {
            data,
            width: 3,
            height: 3,
        }
    }

    /// Vertical 3x3 Sobel kernel.
    pub fn sobel_y() -> Self {
        #[rustfmt::skip]
        let data = vec![
            1.0, 2.0, 1.0,
            0.0, 0.0, 0.0,
            -1.0, -2.0, -1.0,
        ];
        Self {
            data,
            width: 3,
            height: 3,
        }
    }

    /// Kernel width (columns).
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Kernel height (rows).
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the kernel radius (half-size) as (x, y).
    #[inline]
    pub fn radius(&self) -> (usize, usize) {
        (self.width / 2, self.height / 2)
    }

    /// Row-major weights.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Iterates the kernel rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> + '_ {
        self.data.chunks_exact(self.width)
    }

    /// Weight at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }

    /// Returns a copy rescaled so the weights sum to 1.
    ///
    /// Kernels whose weights sum to zero (gradient kernels) are returned
    /// unchanged.
    pub fn normalized(&self) -> Self {
        let sum = self.sum();
        if sum == 0.0 {
            return self.clone();
        }
        Self {
            data: self.data.iter().map(|w| w / sum).collect(),
            width: self.width,
            height: self.height,
        }
    }
}

fn separable_factors(sigma: f32) -> (f32, f32) {
    let p = 2.0 * sigma * sigma;
    (p, (PI * p).sqrt())
}

fn derivative_factors(sigma: f32) -> (f32, f32) {
    let p = 2.0 * sigma * sigma;
    let normal = (2.0f32).sqrt() / PI.sqrt() * sigma;
    (p, 2.0 * PI * sigma.powi(4) * normal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_from_rows_validation() {
        let ok = Kernel::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]]).unwrap();
        assert_eq!(ok.get(2, 1), Some(6.0));
        assert_eq!(ok.get(3, 0), None);

        let even_height = Kernel::from_rows(vec![vec![1.0], vec![1.0]]);
        assert!(matches!(even_height, Err(OpsError::InvalidKernel(_))));

        let even_width = Kernel::from_rows(vec![vec![1.0, 1.0]]);
        assert!(matches!(even_width, Err(OpsError::InvalidKernel(_))));

        let ragged = Kernel::from_rows(vec![vec![1.0], vec![1.0, 1.0, 1.0], vec![1.0]]);
        assert!(matches!(ragged, Err(OpsError::InvalidKernel(_))));

        assert!(Kernel::from_rows(Vec::new()).is_err());
        assert!(Kernel::from_rows(vec![Vec::new()]).is_err());
    }

    #[test]
    fn test_gaussian_shape() {
        let k = Kernel::gaussian(1.4, 2);
        assert_eq!((k.width(), k.height()), (5, 5));
        assert_eq!(k.radius(), (2, 2));
        let center = k.get(2, 2).unwrap();
        assert_abs_diff_eq!(center, 1.0 / (2.0 * PI * 1.96), epsilon = 1e-6);
        // symmetric about the center
        assert_abs_diff_eq!(k.get(0, 1).unwrap(), k.get(4, 3).unwrap(), epsilon = 1e-7);
    }

    #[test]
    fn test_normalized_gaussian_sums_to_one() {
        for (sigma, radius) in [(1.0, 1), (1.4, 2), (2.5, 4), (0.8, 3)] {
            let k = Kernel::gaussian(sigma, radius).normalized();
            assert_abs_diff_eq!(k.sum(), 1.0, epsilon = 1e-5);
            let r = Kernel::gaussian_row(sigma, radius).normalized();
            assert_abs_diff_eq!(r.sum(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_separable_layout() {
        let row = Kernel::gaussian_row(1.4, 2);
        let col = Kernel::gaussian_column(1.4, 2);
        assert_eq!((row.width(), row.height()), (5, 1));
        assert_eq!((col.width(), col.height()), (1, 5));
        assert_eq!(row.data(), col.data());

        // linear exponent: weight decreases monotonically with the signed offset
        let w = row.data();
        assert!(w.windows(2).all(|p| p[0] > p[1]));
        let q = (2.0 * PI * 1.96f32).sqrt();
        assert_abs_diff_eq!(w[2], 1.0 / q, epsilon = 1e-6);
        assert_abs_diff_eq!(w[3], (-1.0f32 / 3.92).exp() / q, epsilon = 1e-6);
    }

    #[test]
    fn test_box_weights() {
        let k = Kernel::box_row(2);
        assert_eq!(k.width(), 5);
        assert!(k.data().iter().all(|&w| w == 0.2));
        assert_eq!(Kernel::box_column(1).height(), 3);
    }

    #[test]
    fn test_derivative_kernels() {
        let kx = Kernel::gaussian_derivative_x(1.0, 1);
        let ky = Kernel::gaussian_derivative_y(1.0, 1);
        // left column positive, right column negative, center column zero
        assert!(kx.get(0, 1).unwrap() > 0.0);
        assert!(kx.get(2, 1).unwrap() < 0.0);
        assert_eq!(kx.get(1, 0).unwrap(), 0.0);
        assert_abs_diff_eq!(kx.sum(), 0.0, epsilon = 1e-6);
        // y kernel is the transpose
        for y in 0..3 {
            for x in 0..3 {
                assert_abs_diff_eq!(kx.get(x, y).unwrap(), ky.get(y, x).unwrap(), epsilon = 1e-7);
            }
        }
    }

    #[test]
    fn test_sobel() {
        let rows: Vec<Vec<f32>> = Kernel::sobel_x().rows().map(<[f32]>::to_vec).collect();
        assert_eq!(rows, vec![vec![1.0, 0.0, -1.0], vec![2.0, 0.0, -2.0], vec![1.0, 0.0, -1.0]]);
        assert_eq!(Kernel::sobel_y().get(1, 0), Some(2.0));
        assert_eq!(Kernel::sobel_y().normalized(), Kernel::sobel_y());
    }

    #[test]
    fn test_normalization_heuristic() {
        assert!(blur_needs_normalization(1.4, 2));
        assert!(blur_needs_normalization(1.0, 2));
        assert!(!blur_needs_normalization(1.0, 3));
        assert!(!blur_needs_normalization(0.5, 4));
    }
}
