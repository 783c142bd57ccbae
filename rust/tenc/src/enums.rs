//! The set of character encodings supported as conversion sources and targets.
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::Error;

/// The encoding labels accepted by [`Encoding::from_str`], for error messages.
pub const SUPPORTED_LABELS: &str = "utf-8, utf-16, utf-32, ascii, latin-1, cp1252, \
                                    iso-8859-1, windows-1252, big5, gb2312, shift_jis";

/// A character encoding supported as a conversion source or target.
///
/// Parsing from a string accepts the canonical names as well as the alias
/// labels `cp1252` (for [`Windows1252`](Self::Windows1252)) and `iso-8859-1`
/// (for [`Latin1`](Self::Latin1)), which name the same codecs, matching
/// WHATWG label resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// UTF-8, without a byte order mark.
    Utf8,
    /// UTF-16, written little-endian with a byte order mark.
    Utf16,
    /// UTF-32, written little-endian with a byte order mark.
    Utf32,
    /// 7-bit ASCII.
    Ascii,
    /// ISO-8859-1 (latin-1): every byte maps to the Unicode scalar of the
    /// same value.
    Latin1,
    /// Windows code page 1252.
    Windows1252,
    /// Big5 (traditional Chinese).
    Big5,
    /// GB 2312 (simplified Chinese). Resolved to the GBK codec, which is
    /// what the `gb2312` label names under WHATWG rules.
    Gb2312,
    /// Shift JIS (Japanese).
    ShiftJis,
}

impl Encoding {
    /// Every supported encoding.
    pub const ALL: [Encoding; 9] = [
        Encoding::Utf8,
        Encoding::Utf16,
        Encoding::Utf32,
        Encoding::Ascii,
        Encoding::Latin1,
        Encoding::Windows1252,
        Encoding::Big5,
        Encoding::Gb2312,
        Encoding::ShiftJis,
    ];

    /// Converts the encoding to its canonical `str` label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf16 => "utf-16",
            Encoding::Utf32 => "utf-32",
            Encoding::Ascii => "ascii",
            Encoding::Latin1 => "latin-1",
            Encoding::Windows1252 => "windows-1252",
            Encoding::Big5 => "big5",
            Encoding::Gb2312 => "gb2312",
            Encoding::ShiftJis => "shift_jis",
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" => Ok(Encoding::Utf8),
            "utf-16" => Ok(Encoding::Utf16),
            "utf-32" => Ok(Encoding::Utf32),
            "ascii" => Ok(Encoding::Ascii),
            "latin-1" | "iso-8859-1" => Ok(Encoding::Latin1),
            "cp1252" | "windows-1252" => Ok(Encoding::Windows1252),
            "big5" => Ok(Encoding::Big5),
            "gb2312" => Ok(Encoding::Gb2312),
            "shift_jis" => Ok(Encoding::ShiftJis),
            _ => Err(Error::unsupported_encoding(s)),
        }
    }
}

impl Display for Encoding {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Encoding {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
