//! Container identification.
//!
//! A file is identified by its leading signature when one can be read, and
//! by its extension otherwise. The extension alone picks the encoder on
//! write.
//!
//! | Format | Signature | Extensions |
//! |---|---|---|
//! | PNG | `89 50 4E 47 0D 0A 1A 0A` | png |
//! | JPEG | `FF D8 FF` (SOI + first marker) | jpg, jpeg, jpe, jfif |

use crate::IoResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Eight-byte PNG file signature.
pub(crate) const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// JPEG start-of-image marker followed by the first marker prefix.
pub(crate) const JPEG_SOI: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Encoded image container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Baseline JPEG (JFIF or Adobe).
    Jpeg,
    /// 8-bit PNG.
    Png,
    /// Neither signature nor extension is recognised.
    Unknown,
}

impl Format {
    const KNOWN: [Format; 2] = [Format::Png, Format::Jpeg];

    /// Identifies the file at `path`.
    ///
    /// The header wins over the extension, so a mislabelled file is still
    /// decoded correctly. Unreadable files fall back to the extension.
    pub fn detect<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let path = path.as_ref();
        match Self::from_file_header(path) {
            Ok(Format::Unknown) | Err(_) => Ok(Self::from_extension(path)),
            Ok(format) => Ok(format),
        }
    }

    /// Case-insensitive extension lookup.
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Self {
        let Some(ext) = path.as_ref().extension().and_then(|e| e.to_str()) else {
            return Format::Unknown;
        };
        Self::KNOWN
            .into_iter()
            .find(|f| f.extensions().iter().any(|known| known.eq_ignore_ascii_case(ext)))
            .unwrap_or(Format::Unknown)
    }

    /// Reads up to eight bytes from `path` and matches them with [`Format::from_bytes`].
    pub fn from_file_header<P: AsRef<Path>>(path: P) -> IoResult<Self> {
        let mut header = [0u8; PNG_SIGNATURE.len()];
        let n = File::open(path)?.read(&mut header)?;
        Ok(Self::from_bytes(&header[..n]))
    }

    /// Matches the start of an encoded buffer against the known signatures.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.starts_with(&PNG_SIGNATURE) {
            Format::Png
        } else if bytes.starts_with(&JPEG_SOI) {
            Format::Jpeg
        } else {
            Format::Unknown
        }
    }

    /// Extensions accepted for this format; the first is used when writing.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Jpeg => &["jpg", "jpeg", "jpe", "jfif"],
            Format::Png => &["png"],
            Format::Unknown => &[],
        }
    }

    /// Preferred extension, empty for [`Format::Unknown`].
    pub fn extension(&self) -> &'static str {
        self.extensions().first().copied().unwrap_or("")
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Format::Jpeg => "JPEG",
            Format::Png => "PNG",
            Format::Unknown => "unknown",
        })
    }
}
