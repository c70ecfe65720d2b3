//! Color space registry.
//!
//! Each [`ColorSpace`] owns an exact, ordered set of [`ChannelKind`]s. An
//! [`Image`](crate::Image) in that color space carries precisely these
//! channels, stored as planes in the same order.
//!
//! | ColorSpace | Channels |
//! |---|---|
//! | RGB | RED, GREEN, BLUE |
//! | RGBX | RED, GREEN, BLUE, ALPHA_IGNORED |
//! | RGBA | RED, GREEN, BLUE, ALPHA |
//! | CMYK | CYAN, MAGENTA, YELLOW, BLACK |
//! | YCbCr | INTENSITY, Cb, Cr |
//! | GRAY | INTENSITY |
//!
//! # Usage
//!
//! ```
//! use fourier_core::{ChannelKind, ColorSpace};
//!
//! assert_eq!(ColorSpace::YCbCr.channels().len(), 3);
//! assert_eq!(ColorSpace::Rgba.index_of(ChannelKind::Alpha), Some(3));
//! assert!(!ColorSpace::Gray.contains(ChannelKind::Red));
//! ```

use crate::ChannelKind;
use std::fmt;
use std::str::FromStr;

/// Supported color spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// Red, green, blue.
    Rgb,
    /// RGB plus an ignored padding channel.
    Rgbx,
    /// RGB plus alpha.
    Rgba,
    /// Cyan, magenta, yellow, black inks.
    Cmyk,
    /// Luma plus blue/red chroma differences.
    YCbCr,
    /// Luma only.
    Gray,
}

const RGB_CHANNELS: [ChannelKind; 3] = [ChannelKind::Red, ChannelKind::Green, ChannelKind::Blue];
const RGBX_CHANNELS: [ChannelKind; 4] = [
    ChannelKind::Red,
    ChannelKind::Green,
    ChannelKind::Blue,
    ChannelKind::AlphaIgnored,
];
const RGBA_CHANNELS: [ChannelKind; 4] = [
    ChannelKind::Red,
    ChannelKind::Green,
    ChannelKind::Blue,
    ChannelKind::Alpha,
];
const CMYK_CHANNELS: [ChannelKind; 4] = [
    ChannelKind::Cyan,
    ChannelKind::Magenta,
    ChannelKind::Yellow,
    ChannelKind::Black,
];
const YCBCR_CHANNELS: [ChannelKind; 3] = [
    ChannelKind::Intensity,
    ChannelKind::ChromaBlue,
    ChannelKind::ChromaRed,
];
const GRAY_CHANNELS: [ChannelKind; 1] = [ChannelKind::Intensity];

impl ColorSpace {
    /// Every supported color space.
    pub const ALL: [ColorSpace; 6] = [
        ColorSpace::Rgb,
        ColorSpace::Rgbx,
        ColorSpace::Rgba,
        ColorSpace::Cmyk,
        ColorSpace::YCbCr,
        ColorSpace::Gray,
    ];

    /// The exact channel set of this color space, in plane storage order.
    pub const fn channels(self) -> &'static [ChannelKind] {
        match self {
            ColorSpace::Rgb => &RGB_CHANNELS,
            ColorSpace::Rgbx => &RGBX_CHANNELS,
            ColorSpace::Rgba => &RGBA_CHANNELS,
            ColorSpace::Cmyk => &CMYK_CHANNELS,
            ColorSpace::YCbCr => &YCBCR_CHANNELS,
            ColorSpace::Gray => &GRAY_CHANNELS,
        }
    }

    /// Number of channels (planes) in this color space.
    #[inline]
    pub const fn channel_count(self) -> usize {
        self.channels().len()
    }

    /// Plane index of `kind`, or `None` if the channel is not part of this space.
    #[inline]
    pub fn index_of(self, kind: ChannelKind) -> Option<usize> {
        self.channels().iter().position(|&c| c == kind)
    }

    /// Returns `true` if `kind` belongs to this color space.
    #[inline]
    pub fn contains(self, kind: ChannelKind) -> bool {
        self.index_of(kind).is_some()
    }

    /// Returns `true` for RGB, RGBX and RGBA.
    #[inline]
    pub const fn is_rgb_family(self) -> bool {
        matches!(self, ColorSpace::Rgb | ColorSpace::Rgbx | ColorSpace::Rgba)
    }

    /// Display name of the color space.
    pub const fn name(self) -> &'static str {
        match self {
            ColorSpace::Rgb => "RGB",
            ColorSpace::Rgbx => "RGBX",
            ColorSpace::Rgba => "RGBA",
            ColorSpace::Cmyk => "CMYK",
            ColorSpace::YCbCr => "YCbCr",
            ColorSpace::Gray => "GRAY",
        }
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown color space name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorSpaceError(String);

impl fmt::Display for ParseColorSpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color space '{}'", self.0)
    }
}

impl std::error::Error for ParseColorSpaceError {}

impl FromStr for ColorSpace {
    type Err = ParseColorSpaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rgb" => Ok(ColorSpace::Rgb),
            "rgbx" => Ok(ColorSpace::Rgbx),
            "rgba" => Ok(ColorSpace::Rgba),
            "cmyk" => Ok(ColorSpace::Cmyk),
            "ycbcr" | "ycc" => Ok(ColorSpace::YCbCr),
            "gray" | "grey" => Ok(ColorSpace::Gray),
            _ => Err(ParseColorSpaceError(s.to_string())),
        }
    }
}
