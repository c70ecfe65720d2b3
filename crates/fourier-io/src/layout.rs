//! Native pixel layouts and their mapping onto the image model.
//!
//! Codecs hand out interleaved 8-bit buffers in some native layout. A
//! [`NativeLayout`] names that layout and knows which [`ChannelKind`] each
//! byte of a pixel belongs to, which normalizes byte order (BGR, ARGB, ...)
//! away when the planes are built.
//!
//! | Native layouts | ColorSpace |
//! |---|---|
//! | RGBX, BGRX, XRGB, XBGR | RGBX (padding tagged ALPHA_IGNORED) |
//! | RGBA, BGRA, ARGB, ABGR | RGBA |
//! | RGB, BGR | RGB |
//! | CMYK | CMYK |
//! | YCbCr | YCbCr |
//! | Gray | GRAY |
//! | YCCK, GrayAlpha, Unknown | rejected |
//!
//! # Example
//!
//! ```rust
//! use fourier_core::{ChannelKind, ColorSpace};
//! use fourier_io::layout::{decode_interleaved, NativeLayout};
//!
//! // one BGR pixel
//! let img = decode_interleaved(1, 1, NativeLayout::Bgr, &[10, 20, 30]).unwrap();
//! assert_eq!(img.color_space(), ColorSpace::Rgb);
//! assert_eq!(img.sample(ChannelKind::Red, 0, 0).unwrap(), 30.0);
//! assert_eq!(img.sample(ChannelKind::Blue, 0, 0).unwrap(), 10.0);
//! ```

use crate::{IoError, IoResult};
use fourier_core::{ChannelKind, ColorSpace, Image};
use tracing::trace;

use ChannelKind::{
    Alpha as A, AlphaIgnored as X, Black as K, Blue as B, ChromaBlue as CB, ChromaRed as CR,
    Cyan as C, Green as G, Intensity as I, Magenta as M, Red as R, Yellow as Y,
};

/// Interleaved pixel layouts a codec may produce or consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeLayout {
    /// R, G, B, padding.
    Rgbx,
    /// B, G, R, padding.
    Bgrx,
    /// Padding, R, G, B.
    Xrgb,
    /// Padding, B, G, R.
    Xbgr,
    /// R, G, B, alpha.
    Rgba,
    /// B, G, R, alpha.
    Bgra,
    /// Alpha, R, G, B.
    Argb,
    /// Alpha, B, G, R.
    Abgr,
    /// R, G, B.
    Rgb,
    /// B, G, R.
    Bgr,
    /// C, M, Y, K inks.
    Cmyk,
    /// Y, Cb, Cr.
    YCbCr,
    /// Single luma component.
    Gray,
    /// Y, Cb, Cr, K.
    Ycck,
    /// Luma plus alpha.
    GrayAlpha,
    /// Anything the codec reports that has no name here.
    Unknown,
}

impl NativeLayout {
    /// The color space an image decoded from this layout is in.
    ///
    /// # Errors
    ///
    /// [`IoError::UnsupportedColorSpace`] for YCCK, GrayAlpha and Unknown.
    pub fn color_space(self) -> IoResult<ColorSpace> {
        use NativeLayout::*;
        match self {
            Rgbx | Bgrx | Xrgb | Xbgr => Ok(ColorSpace::Rgbx),
            Rgba | Bgra | Argb | Abgr => Ok(ColorSpace::Rgba),
            Rgb | Bgr => Ok(ColorSpace::Rgb),
            Cmyk => Ok(ColorSpace::Cmyk),
            YCbCr => Ok(ColorSpace::YCbCr),
            Gray => Ok(ColorSpace::Gray),
            Ycck | GrayAlpha | Unknown => Err(IoError::UnsupportedColorSpace(format!(
                "no mapping for native layout {:?}",
                self
            ))),
        }
    }

    /// Channel of each byte within one pixel, in memory order.
    ///
    /// # Errors
    ///
    /// Same as [`NativeLayout::color_space`].
    pub fn channel_map(self) -> IoResult<&'static [ChannelKind]> {
        use NativeLayout::*;
        let map: &'static [ChannelKind] = match self {
            Rgbx => &[R, G, B, X],
            Bgrx => &[B, G, R, X],
            Xrgb => &[X, R, G, B],
            Xbgr => &[X, B, G, R],
            Rgba => &[R, G, B, A],
            Bgra => &[B, G, R, A],
            Argb => &[A, R, G, B],
            Abgr => &[A, B, G, R],
            Rgb => &[R, G, B],
            Bgr => &[B, G, R],
            Cmyk => &[C, M, Y, K],
            YCbCr => &[I, CB, CR],
            Gray => &[I],
            Ycck | GrayAlpha | Unknown => {
                return Err(IoError::UnsupportedColorSpace(format!(
                    "no mapping for native layout {:?}",
                    self
                )));
            }
        };
        Ok(map)
    }

    /// Canonical layout for writing an image in `color_space`.
    ///
    /// Its channel map equals `color_space.channels()`.
    pub fn for_color_space(color_space: ColorSpace) -> Self {
        match color_space {
            ColorSpace::Rgb => NativeLayout::Rgb,
            ColorSpace::Rgbx => NativeLayout::Rgbx,
            ColorSpace::Rgba => NativeLayout::Rgba,
            ColorSpace::Cmyk => NativeLayout::Cmyk,
            ColorSpace::YCbCr => NativeLayout::YCbCr,
            ColorSpace::Gray => NativeLayout::Gray,
        }
    }
}

/// Builds an image from an interleaved 8-bit buffer.
///
/// # Errors
///
/// - [`IoError::UnsupportedColorSpace`] if the layout has no mapping
/// - [`IoError::DecodeError`] if `bytes` is not `width * height * channels` long
pub fn decode_interleaved(
    width: u32,
    height: u32,
    layout: NativeLayout,
    bytes: &[u8],
) -> IoResult<Image> {
    let color_space = layout.color_space()?;
    let map = layout.channel_map()?;
    let stride = map.len();
    let expected = width as usize * height as usize * stride;
    if bytes.len() != expected {
        return Err(IoError::DecodeError(format!(
            "expected {} bytes for {}x{} {:?}, got {}",
            expected,
            width,
            height,
            layout,
            bytes.len()
        )));
    }
    trace!(width, height, ?layout, %color_space, "decode_interleaved");

    let mut image = Image::new(width, height, color_space);
    for (offset, &kind) in map.iter().enumerate() {
        let plane = image.plane_mut(kind)?;
        for (dst, px) in plane.iter_mut().zip(bytes.chunks_exact(stride)) {
            *dst = px[offset] as f32;
        }
    }
    Ok(image)
}

/// Rounds and clamps one sample to a byte.
#[inline]
pub fn sample_to_u8(v: f32) -> u8 {
    // NaN saturates to 0
    v.round().clamp(0.0, 255.0) as u8
}

/// Interleaves an image into its canonical native layout.
///
/// Samples are rounded and clamped to `[0, 255]`.
pub fn encode_interleaved(image: &Image) -> (NativeLayout, Vec<u8>) {
    let layout = NativeLayout::for_color_space(image.color_space());
    let stride = image.channels().len();
    let mut bytes = vec![0u8; image.pixel_count() * stride];
    for (offset, (_, plane)) in image.planes().enumerate() {
        for (px, &v) in bytes.chunks_exact_mut(stride).zip(plane) {
            px[offset] = sample_to_u8(v);
        }
    }
    (layout, bytes)
}
