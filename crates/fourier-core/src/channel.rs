//! Channel kinds.
//!
//! A [`ChannelKind`] tags one scalar component of a pixel. Which kinds an
//! image carries is fixed by its [`ColorSpace`](crate::ColorSpace).

use std::fmt;

/// One scalar component of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChannelKind {
    /// Red primary.
    Red,
    /// Green primary.
    Green,
    /// Blue primary.
    Blue,
    /// Alpha (coverage).
    Alpha,
    /// Padding byte carried by RGBX layouts; never interpreted.
    AlphaIgnored,
    /// Cyan ink.
    Cyan,
    /// Magenta ink.
    Magenta,
    /// Yellow ink.
    Yellow,
    /// Black ink (key).
    Black,
    /// Luma. Shared by YCbCr and GRAY.
    Intensity,
    /// Blue-difference chroma (Cb).
    ChromaBlue,
    /// Red-difference chroma (Cr).
    ChromaRed,
}

impl ChannelKind {
    /// Every channel kind, in declaration order.
    pub const ALL: [ChannelKind; 12] = [
        ChannelKind::Red,
        ChannelKind::Green,
        ChannelKind::Blue,
        ChannelKind::Alpha,
        ChannelKind::AlphaIgnored,
        ChannelKind::Cyan,
        ChannelKind::Magenta,
        ChannelKind::Yellow,
        ChannelKind::Black,
        ChannelKind::Intensity,
        ChannelKind::ChromaBlue,
        ChannelKind::ChromaRed,
    ];

    /// Display name of the channel.
    pub const fn name(self) -> &'static str {
        match self {
            ChannelKind::Red => "RED",
            ChannelKind::Green => "GREEN",
            ChannelKind::Blue => "BLUE",
            ChannelKind::Alpha => "ALPHA",
            ChannelKind::AlphaIgnored => "ALPHA_IGNORED",
            ChannelKind::Cyan => "CYAN",
            ChannelKind::Magenta => "MAGENTA",
            ChannelKind::Yellow => "YELLOW",
            ChannelKind::Black => "BLACK",
            ChannelKind::Intensity => "INTENSITY",
            ChannelKind::ChromaBlue => "Cb",
            ChannelKind::ChromaRed => "Cr",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
