//! Stream parser turning lines of SubRip text into blocks
//!
//! Blocks are runs of non-blank lines separated by one or more blank lines.
//! Each run is handed to [`SubRipItem::from_lines`](crate::SubRipItem::from_lines);
//! what happens to runs that fail is decided by [`ErrorHandling`].
//!
//! The parser is lazy: [`ItemStream`] pulls lines from its source only as
//! blocks are requested. Eager parsing is built on top of it by
//! [`SubRipFile`](crate::SubRipFile).
//!
//! # Examples
//!
//! ```rust
//! use subrip_core::parser::{ErrorHandling, ItemStream};
//!
//! let source = "1\n00:00:01,000 --> 00:00:02,000\nHi\n\nbroken\n\n2\n00:00:03,000 --> 00:00:04,000\nBye\n";
//! let mut diagnostics = Vec::new();
//! let items: Vec<_> = ItemStream::from_text(source, ErrorHandling::Log)
//!     .with_sink(&mut diagnostics)
//!     .collect::<Result<_, _>>()?;
//! assert_eq!(items.len(), 2);
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].block, 2);
//! # Ok::<(), subrip_core::SubRipError>(())
//! ```

use crate::{encoding::EncodingSetting, Result, SubRipError};
use core::{fmt, str::FromStr};

mod diagnostics;
mod stream;

pub use diagnostics::{DiagnosticSink, ParseIssue, TracingSink};
pub use stream::{split_lines, ItemStream, SplitLines};

/// What to do with a block that fails to parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ErrorHandling {
    /// Skip it silently
    #[default]
    Pass,
    /// Skip it and report it to the diagnostic sink
    Log,
    /// Stop parsing and return the error
    Raise,
}

impl ErrorHandling {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Log => "log",
            Self::Raise => "raise",
        }
    }
}

impl fmt::Display for ErrorHandling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorHandling {
    type Err = SubRipError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(Self::Pass),
            "log" => Ok(Self::Log),
            "raise" => Ok(Self::Raise),
            _ => Err(SubRipError::InvalidOption {
                option: "error_handling",
                value: s.to_string(),
                expected: "pass, log or raise",
            }),
        }
    }
}

/// Configuration for the parse entry points
///
/// # Examples
///
/// ```rust
/// use subrip_core::{ErrorHandling, ParseOptions};
///
/// let options = ParseOptions::new()
///     .with_error_handling(ErrorHandling::Raise)
///     .with_eol("\r\n");
/// assert_eq!(options.eol.as_deref(), Some("\r\n"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ParseOptions {
    /// Only consulted by the byte-oriented entry points
    pub encoding: EncodingSetting,
    pub error_handling: ErrorHandling,
    /// End-of-line override for the resulting collection
    pub eol: Option<String>,
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: impl Into<EncodingSetting>) -> Self {
        self.encoding = encoding.into();
        self
    }

    #[must_use]
    pub const fn with_error_handling(mut self, error_handling: ErrorHandling) -> Self {
        self.error_handling = error_handling;
        self
    }

    #[must_use]
    pub fn with_eol(mut self, eol: impl Into<String>) -> Self {
        self.eol = Some(eol.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::TextEncoding;

    #[test]
    fn error_handling_from_str() {
        assert_eq!("Pass".parse::<ErrorHandling>().unwrap(), ErrorHandling::Pass);
        assert_eq!(" log ".parse::<ErrorHandling>().unwrap(), ErrorHandling::Log);
        assert_eq!("RAISE".parse::<ErrorHandling>().unwrap(), ErrorHandling::Raise);
        assert!(matches!(
            "strict".parse::<ErrorHandling>(),
            Err(SubRipError::InvalidOption { option: "error_handling", .. })
        ));
        assert_eq!(ErrorHandling::Raise.to_string(), "raise");
    }

    #[test]
    fn options_builders() {
        let options = ParseOptions::new()
            .with_encoding(TextEncoding::Latin1)
            .with_error_handling(ErrorHandling::Log);
        assert_eq!(options.encoding, EncodingSetting::Explicit(TextEncoding::Latin1));
        assert_eq!(options.error_handling, ErrorHandling::Log);
        assert_eq!(options.eol, None);
        assert_eq!(ParseOptions::default().error_handling, ErrorHandling::Pass);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn options_deserialize_with_defaults() {
        let options: ParseOptions =
            serde_json::from_str(r#"{"encoding": "cp1252", "error_handling": "raise"}"#).unwrap();
        assert_eq!(
            options.encoding,
            EncodingSetting::Explicit(TextEncoding::Windows1252)
        );
        assert_eq!(options.error_handling, ErrorHandling::Raise);
        assert_eq!(options.eol, None);
    }
}
