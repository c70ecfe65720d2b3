//! PNG format support.
//!
//! Lossless 8-bit reading and writing through the `png` crate. Palette and
//! 16-bit files are normalized to 8-bit color on read.
//!
//! | PNG color type | Image |
//! |---|---|
//! | Grayscale | GRAY |
//! | Rgb | RGB |
//! | Rgba | RGBA |
//! | GrayscaleAlpha | rejected |
//!
//! On write, GRAY, RGB and RGBA map directly and RGBX is stored as RGB.
//! CMYK and YCbCr have no PNG representation.
//!
//! # Example
//!
//! ```rust,ignore
//! use fourier_io::png;
//!
//! let image = png::read("input.png")?;
//! png::write("output.png", &image)?;
//! ```

use crate::detect::PNG_SIGNATURE;
use crate::layout::{decode_interleaved, encode_interleaved, NativeLayout};
use crate::{FormatReader, FormatWriter, IoError, IoResult};
use fourier_core::{ColorSpace, Image};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// PNG file reader.
#[derive(Debug, Clone, Default)]
pub struct PngReader;

impl PngReader {
    /// Creates a new reader.
    pub fn new() -> Self {
        Self
    }
}

impl FormatReader for PngReader {
    fn format_name(&self) -> &'static str {
        "PNG"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["png"]
    }

    fn can_read(&self, header: &[u8]) -> bool {
        header.starts_with(&PNG_SIGNATURE)
    }

    fn read_from_memory(&self, data: &[u8]) -> IoResult<Image> {
        let mut decoder = png::Decoder::new(Cursor::new(data));
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder
            .read_info()
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
        let mut buf = vec![0u8; buf_size];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

        let (width, height) = (info.width, info.height);
        debug!(width, height, color_type = ?info.color_type, "Decoded PNG");

        let layout = match info.color_type {
            png::ColorType::Grayscale => NativeLayout::Gray,
            png::ColorType::Rgb => NativeLayout::Rgb,
            png::ColorType::Rgba => NativeLayout::Rgba,
            png::ColorType::GrayscaleAlpha => NativeLayout::GrayAlpha,
            png::ColorType::Indexed => {
                return Err(IoError::DecodeError("palette was not expanded".into()));
            }
        };
        decode_interleaved(width, height, layout, &buf[..info.buffer_size()])
    }
}

/// PNG file writer.
#[derive(Debug, Clone, Default)]
pub struct PngWriter;

impl PngWriter {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self
    }
}

impl FormatWriter for PngWriter {
    fn format_name(&self) -> &'static str {
        "PNG"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["png"]
    }

    fn write_to_memory(&self, image: &Image) -> IoResult<Vec<u8>> {
        let color_space = image.color_space();
        let (color_type, data) = match color_space {
            ColorSpace::Gray => (png::ColorType::Grayscale, encode_interleaved(image).1),
            ColorSpace::Rgb => (png::ColorType::Rgb, encode_interleaved(image).1),
            ColorSpace::Rgba => (png::ColorType::Rgba, encode_interleaved(image).1),
            ColorSpace::Rgbx => {
                // drop the padding byte
                let (_, rgbx) = encode_interleaved(image);
                let rgb = rgbx.chunks_exact(4).flat_map(|px| [px[0], px[1], px[2]]).collect();
                (png::ColorType::Rgb, rgb)
            }
            ColorSpace::Cmyk | ColorSpace::YCbCr => {
                return Err(IoError::cannot_store("PNG", color_space));
            }
        };
        debug!(width = image.width(), height = image.height(), ?color_type, "Encoding PNG");

        let mut buffer = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buffer, image.width(), image.height());
            encoder.set_color(color_type);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_compression(png::Compression::default());

            let mut png_writer = encoder
                .write_header()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            png_writer
                .write_image_data(&data)
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
            png_writer
                .finish()
                .map_err(|e| IoError::EncodeError(e.to_string()))?;
        }
        Ok(buffer)
    }
}

/// Reads a PNG file.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    PngReader::new().read(path)
}

/// Writes an image to a PNG file.
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    PngWriter::new().write(path, image)
}
