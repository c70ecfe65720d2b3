//! # fourier-io
//!
//! Codec adapter between encoded files and [`fourier_core::Image`].
//!
//! # Supported Formats
//!
//! | Format | Read | Write | Feature |
//! |---|---|---|---|
//! | JPEG | RGB, GRAY, CMYK | RGB, RGBX, RGBA, CMYK, YCbCr, GRAY | `jpeg` |
//! | PNG | RGB, RGBA, GRAY | RGB, RGBX, RGBA, GRAY | `png` |
//!
//! Decoded images are in the color space matching the codec's native pixel
//! layout (see [`layout`]); no conversion happens on read.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fourier_io;
//!
//! let mut image = fourier_io::read("input.jpg")?;
//! image.to_gray();
//! fourier_io::write_with_quality("output.jpg", &image, 85)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod detect;
mod error;
pub mod layout;
mod traits;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png")]
pub mod png;

pub use detect::Format;
pub use error::{IoError, IoResult};
pub use layout::{decode_interleaved, encode_interleaved, NativeLayout};
pub use traits::{FormatReader, FormatWriter};

use fourier_core::Image;
use std::path::Path;
use tracing::{debug, trace};

/// Default JPEG quality used by [`write`].
pub const DEFAULT_QUALITY: u8 = 90;

/// Reads an image file, detecting the format from magic bytes then extension.
///
/// # Errors
///
/// [`IoError::UnsupportedFormat`] if the format can't be determined or its
/// feature is disabled, plus any decoder error.
pub fn read<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let format = match Format::from_bytes(&data) {
        Format::Unknown => Format::from_extension(path),
        known => known,
    };
    trace!(path = %path.display(), %format, "read");
    decode(format, &data)
}

/// Decodes an in-memory file, detecting the format from its magic bytes.
pub fn read_from_memory(data: &[u8]) -> IoResult<Image> {
    decode(Format::from_bytes(data), data)
}

fn decode(format: Format, data: &[u8]) -> IoResult<Image> {
    let image = match format {
        #[cfg(feature = "jpeg")]
        Format::Jpeg => jpeg::JpegReader::new().read_from_memory(data)?,
        #[cfg(feature = "png")]
        Format::Png => png::PngReader::new().read_from_memory(data)?,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "cannot decode {} data",
                other
            )));
        }
    };
    debug!(%format, %image, "Decoded image");
    Ok(image)
}

/// Writes an image, choosing the format from the file extension.
///
/// JPEG output uses quality [`DEFAULT_QUALITY`].
pub fn write<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    write_with_quality(path, image, DEFAULT_QUALITY)
}

/// Writes an image with an explicit JPEG quality (1-100).
///
/// `quality` is ignored for lossless formats.
pub fn write_with_quality<P: AsRef<Path>>(path: P, image: &Image, quality: u8) -> IoResult<()> {
    let path = path.as_ref();
    let format = Format::from_extension(path);
    trace!(path = %path.display(), %format, quality, "write");
    let data = encode(format, image, quality)?;
    std::fs::write(path, data)?;
    Ok(())
}

/// Encodes an image to an in-memory file of the given format.
pub fn write_to_memory(format: Format, image: &Image, quality: u8) -> IoResult<Vec<u8>> {
    encode(format, image, quality)
}

#[allow(unused_variables)]
fn encode(format: Format, image: &Image, quality: u8) -> IoResult<Vec<u8>> {
    match format {
        #[cfg(feature = "jpeg")]
        Format::Jpeg => {
            jpeg::JpegWriter::with_options(jpeg::JpegWriterOptions { quality }).write_to_memory(image)
        }
        #[cfg(feature = "png")]
        Format::Png => png::PngWriter::new().write_to_memory(image),
        other => Err(IoError::UnsupportedFormat(format!("cannot encode {} data", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fourier_core::{ChannelKind, ColorSpace};

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let image = Image::new(2, 2, ColorSpace::Rgb);
        let err = write(dir.path().join("out.bmp"), &image).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read(dir.path().join("nope.png")).unwrap_err();
        assert!(matches!(err, IoError::Io(_)));
    }

    #[test]
    fn test_memory_detection() {
        let image = Image::filled(4, 4, ColorSpace::Gray, 60.0);
        let png = write_to_memory(Format::Png, &image, DEFAULT_QUALITY).unwrap();
        let loaded = read_from_memory(&png).unwrap();
        assert_eq!(loaded.sample(ChannelKind::Intensity, 3, 3).unwrap(), 60.0);

        assert!(matches!(read_from_memory(b"not an image"), Err(IoError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_file_roundtrip_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let image = Image::filled(8, 8, ColorSpace::Rgb, 90.0);

        let png_path = dir.path().join("a.png");
        write(&png_path, &image).unwrap();
        assert_eq!(read(&png_path).unwrap(), image);

        let jpg_path = dir.path().join("a.jpg");
        write_with_quality(&jpg_path, &image, 95).unwrap();
        let loaded = read(&jpg_path).unwrap();
        assert_eq!(loaded.color_space(), ColorSpace::Rgb);
        assert!((loaded.sample(ChannelKind::Red, 4, 4).unwrap() - 90.0).abs() <= 2.0);
    }
}
