//! JPEG format support.
//!
//! Reading and writing of baseline JPEG through `jpeg-decoder` and
//! `jpeg-encoder`.
//!
//! # Color Mapping
//!
//! | Decoder output | Image |
//! |---|---|
//! | RGB24 | RGB |
//! | L8 | GRAY |
//! | L16 | GRAY (high byte kept) |
//! | CMYK32 | CMYK |
//!
//! | Image | Encoder input |
//! |---|---|
//! | RGB | Rgb |
//! | RGBX, RGBA | Rgba (the fourth byte is dropped by the encoder) |
//! | CMYK | Cmyk |
//! | YCbCr | Ycbcr |
//! | GRAY | Luma |
//!
//! YCbCr and CMYK data are stored natively; decoders normally hand YCbCr
//! files back as RGB.
//!
//! # Examples
//!
//! ```rust,ignore
//! use fourier_io::jpeg::{self, JpegWriter, JpegWriterOptions};
//! use fourier_io::FormatWriter;
//!
//! let mut image = jpeg::read("photo.jpg")?;
//! image.to_gray();
//!
//! let writer = JpegWriter::with_options(JpegWriterOptions { quality: 95 });
//! writer.write("gray.jpg", &image)?;
//! ```

use crate::detect::JPEG_SOI;
use crate::layout::{decode_interleaved, encode_interleaved, NativeLayout};
use crate::{FormatReader, FormatWriter, IoError, IoResult};
use fourier_core::Image;
use std::io::{BufReader, Cursor};
use std::path::Path;
use tracing::debug;

/// Options for writing JPEG files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegWriterOptions {
    /// Quality level 1-100. Higher = better quality, larger files.
    /// Default: 90.
    pub quality: u8,
}

impl Default for JpegWriterOptions {
    fn default() -> Self {
        Self { quality: 90 }
    }
}

/// JPEG file reader.
#[derive(Debug, Clone, Default)]
pub struct JpegReader;

impl JpegReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl FormatReader for JpegReader {
    fn format_name(&self) -> &'static str {
        "JPEG"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["jpg", "jpeg"]
    }

    /// True for a start-of-image marker followed by another marker.
    fn can_read(&self, header: &[u8]) -> bool {
        header.starts_with(&JPEG_SOI)
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<Image> {
        let mut decoder = jpeg_decoder::Decoder::new(BufReader::new(Cursor::new(data)));
        let pixels = decoder
            .decode()
            .map_err(|e| IoError::DecodeError(e.to_string()))?;

        let info = decoder
            .info()
            .ok_or_else(|| IoError::DecodeError("missing JPEG info".into()))?;

        let width = info.width as u32;
        let height = info.height as u32;
        debug!(width, height, pixel_format = ?info.pixel_format, "Decoded JPEG");

        match info.pixel_format {
            jpeg_decoder::PixelFormat::RGB24 => {
                decode_interleaved(width, height, NativeLayout::Rgb, &pixels)
            }
            jpeg_decoder::PixelFormat::L8 => {
                decode_interleaved(width, height, NativeLayout::Gray, &pixels)
            }
            jpeg_decoder::PixelFormat::L16 => {
                // 16-bit grayscale to 8-bit (use high byte)
                let gray: Vec<u8> = pixels.chunks_exact(2).map(|l16| l16[0]).collect();
                decode_interleaved(width, height, NativeLayout::Gray, &gray)
            }
            jpeg_decoder::PixelFormat::CMYK32 => {
                decode_interleaved(width, height, NativeLayout::Cmyk, &pixels)
            }
        }
    }
}

/// JPEG file writer.
///
/// ```rust
/// use fourier_core::{ColorSpace, Image};
/// use fourier_io::jpeg::{JpegWriter, JpegWriterOptions};
/// use fourier_io::FormatWriter;
///
/// let image = Image::filled(8, 8, ColorSpace::Rgb, 128.0);
/// let bytes = JpegWriter::with_options(JpegWriterOptions { quality: 75 })
///     .write_to_memory(&image)
///     .unwrap();
/// assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct JpegWriter {
    options: JpegWriterOptions,
}

impl JpegWriter {
    /// Creates a new writer with default options (quality 90).
    pub fn new() -> Self {
        Self::with_options(JpegWriterOptions::default())
    }

    /// Creates writer with custom options.
    pub fn with_options(options: JpegWriterOptions) -> Self {
        Self { options }
    }

    /// Returns the writer options.
    pub fn options(&self) -> &JpegWriterOptions {
        &self.options
    }
}

impl FormatWriter for JpegWriter {
    fn format_name(&self) -> &'static str {
        "JPEG"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["jpg", "jpeg"]
    }

    fn write_to_memory(&self, image: &Image) -> IoResult<Vec<u8>> {
        use jpeg_encoder::{ColorType, Encoder};

        let quality = self.options.quality;
        if !(1..=100).contains(&quality) {
            return Err(IoError::EncodeError(format!(
                "JPEG quality must be in 1..=100, got {}",
                quality
            )));
        }
        let (width, height) = image.dimensions();
        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            return Err(IoError::EncodeError(format!(
                "{}x{} exceeds the JPEG size limit of 65535",
                width, height
            )));
        };

        let (layout, data) = encode_interleaved(image);
        let color_type = match layout {
            NativeLayout::Rgb => ColorType::Rgb,
            NativeLayout::Rgbx | NativeLayout::Rgba => ColorType::Rgba,
            NativeLayout::Cmyk => ColorType::Cmyk,
            NativeLayout::YCbCr => ColorType::Ycbcr,
            NativeLayout::Gray => ColorType::Luma,
            other => {
                return Err(IoError::UnsupportedColorSpace(format!(
                    "JPEG writer has no encoding for {:?}",
                    other
                )));
            }
        };
        debug!(width, height, quality, ?color_type, "Encoding JPEG");

        let mut buffer = Vec::new();
        let encoder = Encoder::new(&mut buffer, quality);
        encoder
            .encode(&data, w, h, color_type)
            .map_err(|e: jpeg_encoder::EncodingError| IoError::EncodeError(e.to_string()))?;

        Ok(buffer)
    }
}

/// Reads a JPEG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    JpegReader::new().read(path)
}

/// Writes a JPEG file with default options (quality 90).
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    JpegWriter::new().write(path, image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fourier_core::{ChannelKind, ColorSpace};

    fn gradient(width: u32, height: u32) -> Image {
        let mut image = Image::new(width, height, ColorSpace::Rgb);
        for y in 0..height {
            for x in 0..width {
                image.set_sample(ChannelKind::Red, x, y, (x * 8) as f32).unwrap();
                image.set_sample(ChannelKind::Green, x, y, (y * 8) as f32).unwrap();
                image.set_sample(ChannelKind::Blue, x, y, 128.0).unwrap();
            }
        }
        image
    }

    #[test]
    fn test_roundtrip() {
        let image = gradient(32, 32);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.jpg");

        write(&path, &image).expect("Write failed");
        let loaded = read(&path).expect("Read failed");

        assert_eq!(loaded.dimensions(), (32, 32));
        assert_eq!(loaded.color_space(), ColorSpace::Rgb);
        let diff = (loaded.sample(ChannelKind::Blue, 16, 16).unwrap() - 128.0).abs();
        assert!(diff < 12.0, "blue drifted by {}", diff);
    }

    #[test]
    fn test_gray_roundtrip() {
        let image = Image::filled(16, 16, ColorSpace::Gray, 100.0);
        let bytes = JpegWriter::new().write_to_memory(&image).unwrap();
        let loaded = JpegReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.color_space(), ColorSpace::Gray);
        let v = loaded.sample(ChannelKind::Intensity, 8, 8).unwrap();
        assert!((v - 100.0).abs() <= 2.0, "got {}", v);
    }

    #[test]
    fn test_quality_options() {
        let image = gradient(64, 64);
        let low = JpegWriter::with_options(JpegWriterOptions { quality: 20 })
            .write_to_memory(&image)
            .unwrap();
        let high = JpegWriter::with_options(JpegWriterOptions { quality: 100 })
            .write_to_memory(&image)
            .unwrap();
        assert!(high.len() > low.len());
    }

    #[test]
    fn test_invalid_quality() {
        let image = gradient(8, 8);
        let writer = JpegWriter::with_options(JpegWriterOptions { quality: 0 });
        assert!(matches!(writer.write_to_memory(&image), Err(IoError::EncodeError(_))));
    }

    #[test]
    fn test_rgba_drops_alpha() {
        let image = Image::filled(8, 8, ColorSpace::Rgba, 200.0);
        let bytes = JpegWriter::new().write_to_memory(&image).unwrap();
        let loaded = JpegReader::new().read_from_memory(&bytes).unwrap();
        assert_eq!(loaded.color_space(), ColorSpace::Rgb);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let err = JpegReader::new().read_from_memory(&[0xFF, 0xD8, 0xFF, 0x00, 0x01]).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }

    #[test]
    fn test_can_read() {
        let reader = JpegReader::new();
        assert!(reader.can_read(&[0xFF, 0xD8, 0xFF, 0xE0]));
        assert!(!reader.can_read(&[0x89, b'P', b'N', b'G']));
    }
}
