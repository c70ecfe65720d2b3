//! CLI command implementations

pub mod blur;
pub mod convert;
pub mod dump;
pub mod edges;
pub mod info;

use anyhow::{Context, Result};
use fourier_core::Image;
use std::path::Path;

/// Load image from path
pub fn load_image(path: &Path) -> Result<Image> {
    fourier_io::read(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save image to path, using `quality` for JPEG output
pub fn save_image(path: &Path, image: &Image, quality: u8) -> Result<()> {
    fourier_io::write_with_quality(path, image, quality)
        .with_context(|| format!("Failed to save: {}", path.display()))
}
