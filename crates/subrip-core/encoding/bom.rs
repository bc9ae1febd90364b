//! BOM (Byte Order Mark) detection
//!
//! Longest signature wins, so a UTF-32LE mark is never mistaken for the
//! UTF-16LE mark it starts with.
//!
//! # Examples
//!
//! ```rust
//! use subrip_core::encoding::{detect_bom, BomType};
//!
//! let bytes = [0xEF, 0xBB, 0xBF, b'1'];
//! assert_eq!(detect_bom(&bytes), Some((BomType::Utf8, 3)));
//! ```

use super::TextEncoding;

/// Byte Order Mark signatures for the Unicode encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BomType {
    /// UTF-8 BOM (EF BB BF)
    Utf8,
    /// UTF-16 Little Endian (FF FE)
    Utf16Le,
    /// UTF-16 Big Endian (FE FF)
    Utf16Be,
    /// UTF-32 Little Endian (FF FE 00 00)
    Utf32Le,
    /// UTF-32 Big Endian (00 00 FE FF)
    Utf32Be,
}

impl BomType {
    /// Length of the longest mark
    pub const MAX_LEN: usize = 4;

    /// Checked in this order; longer marks come first
    const BY_LENGTH: [Self; 5] = [
        Self::Utf32Le,
        Self::Utf32Be,
        Self::Utf8,
        Self::Utf16Le,
        Self::Utf16Be,
    ];

    /// Get byte signature for this BOM type
    #[must_use]
    pub const fn signature(self) -> &'static [u8] {
        match self {
            Self::Utf8 => &[0xEF, 0xBB, 0xBF],
            Self::Utf16Le => &[0xFF, 0xFE],
            Self::Utf16Be => &[0xFE, 0xFF],
            Self::Utf32Le => &[0xFF, 0xFE, 0x00, 0x00],
            Self::Utf32Be => &[0x00, 0x00, 0xFE, 0xFF],
        }
    }

    /// Get length of this BOM in bytes
    #[must_use]
    pub const fn len(self) -> usize {
        self.signature().len()
    }

    /// Always `false`; every mark has at least two bytes
    #[must_use]
    pub const fn is_empty(self) -> bool {
        false
    }

    /// Encoding announced by this mark
    #[must_use]
    pub const fn encoding(self) -> TextEncoding {
        match self {
            Self::Utf8 => TextEncoding::Utf8,
            Self::Utf16Le => TextEncoding::Utf16Le,
            Self::Utf16Be => TextEncoding::Utf16Be,
            Self::Utf32Le => TextEncoding::Utf32Le,
            Self::Utf32Be => TextEncoding::Utf32Be,
        }
    }
}

/// Detect BOM type from byte sequence
///
/// Returns the detected BOM type and the number of bytes to skip, or `None`
/// if the input starts with no known mark.
#[must_use]
pub fn detect_bom(bytes: &[u8]) -> Option<(BomType, usize)> {
    BomType::BY_LENGTH
        .into_iter()
        .find(|bom| bytes.starts_with(bom.signature()))
        .map(|bom| (bom, bom.len()))
}
