//! # fourier-ops
//!
//! Spatial filtering for fourier images.
//!
//! # Modules
//!
//! - [`kernel`] - Kernel type and generators (Gaussian, box, derivative, Sobel)
//! - [`filter`] - Convolution engine and blur operations
//! - [`edge`] - Canny-style edge detection
//!
//! # Example
//!
//! ```rust
//! use fourier_core::{ColorSpace, Image};
//! use fourier_ops::{edge, filter};
//!
//! let mut img = Image::filled(32, 32, ColorSpace::Rgb, 128.0);
//! filter::gaussian_blur(&mut img, 1.4, 2).unwrap();
//! edge::canny_edge_detect(&mut img, &edge::EdgeParams::default()).unwrap();
//! assert_eq!(img.color_space(), ColorSpace::Gray);
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - convolve independent channel planes on the rayon pool

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod edge;
pub mod filter;
pub mod kernel;

pub use edge::{canny_edge_detect, EdgeParams};
pub use error::{OpsError, OpsResult};
pub use filter::{box_blur, convolve, convolve_rows, gaussian_blur, gaussian_blur_naive};
pub use kernel::Kernel;
