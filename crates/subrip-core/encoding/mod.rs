//! Text encodings for reading and writing subtitle bytes
//!
//! The Unicode encodings are recognised from their byte order mark; legacy
//! single-byte encodings only by explicit label. An explicit setting always
//! overrides mark detection.
//!
//! # Examples
//!
//! ```rust
//! use subrip_core::encoding::{EncodingSetting, TextEncoding};
//!
//! let bytes = [0xFF, 0xFE, b'1', 0x00];
//! let (encoding, text) = EncodingSetting::AutoDetect.decode(&bytes)?;
//! assert_eq!(encoding, TextEncoding::Utf16Le);
//! assert_eq!(text, "1");
//!
//! assert_eq!("cp1252".parse::<TextEncoding>()?, TextEncoding::Windows1252);
//! # Ok::<(), subrip_core::SubRipError>(())
//! ```

use crate::{Result, SubRipError};
use core::{fmt, str::FromStr};

mod bom;
mod lines;

pub use bom::{detect_bom, BomType};
pub use lines::DecodedLines;

/// Code points for Windows-1252 bytes 0x80..=0x9F; `None` marks unassigned bytes
const WINDOWS_1252_HIGH: [Option<char>; 32] = [
    Some('\u{20AC}'),
    None,
    Some('\u{201A}'),
    Some('\u{0192}'),
    Some('\u{201E}'),
    Some('\u{2026}'),
    Some('\u{2020}'),
    Some('\u{2021}'),
    Some('\u{02C6}'),
    Some('\u{2030}'),
    Some('\u{0160}'),
    Some('\u{2039}'),
    Some('\u{0152}'),
    None,
    Some('\u{017D}'),
    None,
    None,
    Some('\u{2018}'),
    Some('\u{2019}'),
    Some('\u{201C}'),
    Some('\u{201D}'),
    Some('\u{2022}'),
    Some('\u{2013}'),
    Some('\u{2014}'),
    Some('\u{02DC}'),
    Some('\u{2122}'),
    Some('\u{0161}'),
    Some('\u{203A}'),
    Some('\u{0153}'),
    None,
    Some('\u{017E}'),
    Some('\u{0178}'),
];

/// Supported text encodings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
    Windows1252,
    Latin1,
    Ascii,
}

impl TextEncoding {
    /// Canonical name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Utf16Le => "UTF-16LE",
            Self::Utf16Be => "UTF-16BE",
            Self::Utf32Le => "UTF-32LE",
            Self::Utf32Be => "UTF-32BE",
            Self::Windows1252 => "Windows-1252",
            Self::Latin1 => "ISO-8859-1",
            Self::Ascii => "ASCII",
        }
    }

    /// Look up an encoding by label
    ///
    /// Labels are case-insensitive and `_` is treated as `-`, so `utf_8`,
    /// `UTF-8` and `utf8` are the same encoding.
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::UnsupportedEncoding`] for unknown labels.
    pub fn from_label(label: &str) -> Result<Self> {
        let normalized = label.trim().to_ascii_lowercase().replace('_', "-");
        let encoding = match normalized.as_str() {
            "utf-8" | "utf8" | "utf-8-sig" => Self::Utf8,
            "utf-16le" | "utf-16-le" | "utf16le" => Self::Utf16Le,
            "utf-16be" | "utf-16-be" | "utf16be" => Self::Utf16Be,
            "utf-32le" | "utf-32-le" | "utf32le" => Self::Utf32Le,
            "utf-32be" | "utf-32-be" | "utf32be" => Self::Utf32Be,
            "windows-1252" | "cp1252" | "cp-1252" => Self::Windows1252,
            "iso-8859-1" | "latin-1" | "latin1" | "l1" => Self::Latin1,
            "ascii" | "us-ascii" => Self::Ascii,
            _ => {
                return Err(SubRipError::UnsupportedEncoding {
                    name: label.to_string(),
                })
            }
        };
        Ok(encoding)
    }

    /// Byte order mark written by this encoding, if it has one
    #[must_use]
    pub const fn bom(self) -> Option<BomType> {
        match self {
            Self::Utf8 => Some(BomType::Utf8),
            Self::Utf16Le => Some(BomType::Utf16Le),
            Self::Utf16Be => Some(BomType::Utf16Be),
            Self::Utf32Le => Some(BomType::Utf32Le),
            Self::Utf32Be => Some(BomType::Utf32Be),
            Self::Windows1252 | Self::Latin1 | Self::Ascii => None,
        }
    }

    /// Decode bytes that carry no byte order mark
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::Encoding`] with the byte offset of the first
    /// sequence that is invalid in this encoding.
    pub fn decode(self, bytes: &[u8]) -> Result<String> {
        match self {
            Self::Utf8 => core::str::from_utf8(bytes)
                .map(str::to_string)
                .map_err(|e| self.error(e.valid_up_to(), "invalid UTF-8 sequence")),
            Self::Utf16Le => self.decode_utf16(bytes, u16::from_le_bytes),
            Self::Utf16Be => self.decode_utf16(bytes, u16::from_be_bytes),
            Self::Utf32Le => self.decode_utf32(bytes, u32::from_le_bytes),
            Self::Utf32Be => self.decode_utf32(bytes, u32::from_be_bytes),
            Self::Windows1252 => bytes
                .iter()
                .enumerate()
                .map(|(position, &byte)| {
                    windows_1252_char(byte)
                        .ok_or_else(|| self.error(position, "byte is unassigned"))
                })
                .collect(),
            Self::Latin1 => Ok(bytes.iter().map(|&byte| char::from(byte)).collect()),
            Self::Ascii => bytes
                .iter()
                .enumerate()
                .map(|(position, &byte)| {
                    if byte.is_ascii() {
                        Ok(char::from(byte))
                    } else {
                        Err(self.error(position, "byte is outside the ASCII range"))
                    }
                })
                .collect(),
        }
    }

    /// Encode text without a byte order mark
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::Encoding`] when a character has no
    /// representation in a single-byte encoding; the position is the byte
    /// offset of that character in `text`.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Self::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Self::Utf32Le => Ok(text.chars().flat_map(|c| u32::from(c).to_le_bytes()).collect()),
            Self::Utf32Be => Ok(text.chars().flat_map(|c| u32::from(c).to_be_bytes()).collect()),
            Self::Windows1252 | Self::Latin1 | Self::Ascii => text
                .char_indices()
                .map(|(position, c)| {
                    self.encode_single_byte(c)
                        .ok_or_else(|| self.error(position, &format!("cannot encode {c:?}")))
                })
                .collect(),
        }
    }

    fn encode_single_byte(self, c: char) -> Option<u8> {
        let code = u32::from(c);
        match self {
            Self::Ascii => u8::try_from(code).ok().filter(u8::is_ascii),
            Self::Latin1 => u8::try_from(code).ok(),
            Self::Windows1252 => match code {
                0x00..=0x7F | 0xA0..=0xFF => u8::try_from(code).ok(),
                _ => WINDOWS_1252_HIGH
                    .iter()
                    .position(|&mapped| mapped == Some(c))
                    .and_then(|offset| u8::try_from(0x80 + offset).ok()),
            },
            _ => None,
        }
    }

    fn decode_utf16(self, bytes: &[u8], unit: fn([u8; 2]) -> u16) -> Result<String> {
        if bytes.len() % 2 != 0 {
            return Err(self.error(bytes.len() - 1, "truncated code unit"));
        }
        let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
        char::decode_utf16(units)
            .enumerate()
            .map(|(i, decoded)| decoded.map_err(|_| self.error(i * 2, "unpaired surrogate")))
            .collect()
    }

    fn decode_utf32(self, bytes: &[u8], unit: fn([u8; 4]) -> u32) -> Result<String> {
        if bytes.len() % 4 != 0 {
            return Err(self.error(bytes.len() - bytes.len() % 4, "truncated code unit"));
        }
        bytes
            .chunks_exact(4)
            .enumerate()
            .map(|(i, quad)| {
                char::from_u32(unit([quad[0], quad[1], quad[2], quad[3]]))
                    .ok_or_else(|| self.error(i * 4, "invalid code point"))
            })
            .collect()
    }

    fn error(self, position: usize, reason: &str) -> SubRipError {
        SubRipError::Encoding {
            encoding: self.name(),
            position,
            reason: reason.to_string(),
        }
    }
}

fn windows_1252_char(byte: u8) -> Option<char> {
    match byte {
        0x80..=0x9F => WINDOWS_1252_HIGH[usize::from(byte - 0x80)],
        _ => Some(char::from(byte)),
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TextEncoding {
    type Err = SubRipError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s)
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = SubRipError;

    fn try_from(label: String) -> Result<Self> {
        Self::from_label(&label)
    }
}

impl From<TextEncoding> for String {
    fn from(encoding: TextEncoding) -> Self {
        encoding.name().to_string()
    }
}

/// How to choose the encoding of incoming bytes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum EncodingSetting {
    /// Use the byte order mark, UTF-8 when there is none
    #[default]
    AutoDetect,
    /// Always use this encoding
    Explicit(TextEncoding),
}

impl EncodingSetting {
    /// `"auto"` or any encoding label
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::UnsupportedEncoding`] for unknown labels.
    pub fn from_label(label: &str) -> Result<Self> {
        if label.trim().eq_ignore_ascii_case("auto") {
            Ok(Self::AutoDetect)
        } else {
            TextEncoding::from_label(label).map(Self::Explicit)
        }
    }

    /// Pick the encoding for `bytes` and the number of mark bytes to skip
    #[must_use]
    pub fn resolve(self, bytes: &[u8]) -> (TextEncoding, usize) {
        match self {
            Self::AutoDetect => detect_bom(bytes)
                .map_or((TextEncoding::Utf8, 0), |(bom, skip)| (bom.encoding(), skip)),
            Self::Explicit(encoding) => {
                let skip = encoding
                    .bom()
                    .filter(|bom| bytes.starts_with(bom.signature()))
                    .map_or(0, BomType::len);
                (encoding, skip)
            }
        }
    }

    /// Resolve and decode in one step
    ///
    /// # Errors
    ///
    /// Propagates [`SubRipError::Encoding`] from the decoder.
    pub fn decode(self, bytes: &[u8]) -> Result<(TextEncoding, String)> {
        let (encoding, skip) = self.resolve(bytes);
        let text = encoding.decode(&bytes[skip..])?;
        Ok((encoding, text))
    }
}

impl From<TextEncoding> for EncodingSetting {
    fn from(encoding: TextEncoding) -> Self {
        Self::Explicit(encoding)
    }
}

impl FromStr for EncodingSetting {
    type Err = SubRipError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_label(s)
    }
}

impl TryFrom<String> for EncodingSetting {
    type Error = SubRipError;

    fn try_from(label: String) -> Result<Self> {
        Self::from_label(&label)
    }
}

impl From<EncodingSetting> for String {
    fn from(setting: EncodingSetting) -> Self {
        match setting {
            EncodingSetting::AutoDetect => "auto".to_string(),
            EncodingSetting::Explicit(encoding) => encoding.into(),
        }
    }
}
