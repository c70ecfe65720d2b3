//! I/O traits for image readers and writers.
//!
//! These traits define the interface for format-specific implementations.

use crate::IoResult;
use fourier_core::Image;
use std::path::Path;

/// Trait for image format readers.
///
/// Implement this trait to add support for reading a new image format.
pub trait FormatReader {
    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// Lowercase file extensions handled by this reader.
    fn extensions(&self) -> &'static [&'static str];

    /// Returns `true` if `header` starts with this format's magic bytes.
    fn can_read(&self, header: &[u8]) -> bool;

    /// Reads an image from memory.
    fn read_from_memory(&self, data: &[u8]) -> IoResult<Image>;

    /// Reads an image from a file path.
    fn read<P: AsRef<Path>>(&self, path: P) -> IoResult<Image> {
        let data = std::fs::read(path.as_ref())?;
        self.read_from_memory(&data)
    }
}

/// Trait for image format writers.
///
/// Implement this trait to add support for writing a new image format.
pub trait FormatWriter {
    /// Human-readable format name.
    fn format_name(&self) -> &'static str;

    /// Lowercase file extensions handled by this writer.
    fn extensions(&self) -> &'static [&'static str];

    /// Writes an image to memory.
    fn write_to_memory(&self, image: &Image) -> IoResult<Vec<u8>>;

    /// Writes an image to a file path.
    fn write<P: AsRef<Path>>(&self, path: P, image: &Image) -> IoResult<()> {
        let data = self.write_to_memory(image)?;
        std::fs::write(path.as_ref(), data)?;
        Ok(())
    }
}
