//! Integration tests for the fourier crates.
//!
//! End-to-end scenarios that decode a file, run conversions or filters and
//! encode the result again.

use fourier_core::{ChannelKind, ColorSpace, Image};

/// Vertical black/white step: left half 0, right half 255.
pub fn vertical_step(width: u32, height: u32) -> Image {
    let mut image = Image::new(width, height, ColorSpace::Gray);
    for (_, plane) in image.channels_mut() {
        for (i, v) in plane.iter_mut().enumerate() {
            if i as u32 % width >= width / 2 {
                *v = 255.0;
            }
        }
    }
    image
}

/// RGB image filled with one color.
pub fn solid_rgb(width: u32, height: u32, rgb: [f32; 3]) -> Image {
    let mut image = Image::new(width, height, ColorSpace::Rgb);
    for ((_, plane), value) in image.channels_mut().zip(rgb) {
        plane.fill(value);
    }
    image
}

/// Intensity plane of a GRAY image.
pub fn intensity(image: &Image) -> &[f32] {
    image.plane(ChannelKind::Intensity).unwrap_or(&[])
}
