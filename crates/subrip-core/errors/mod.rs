//! Error types for SubRip parsing, coercion and encoding
//!
//! All fallible operations in the crate return [`SubRipError`]. Block-level
//! failures met while parsing a stream are routed through the configured
//! [`ErrorHandling`](crate::parser::ErrorHandling) policy instead of being
//! raised directly, so only the `Raise` policy ever surfaces them.
//!
//! # Examples
//!
//! ```rust
//! use subrip_core::{SubRipError, SubRipTime};
//! use subrip_core::errors::ErrorCategory;
//!
//! let err = "1:2:3".parse::<SubRipTime>().unwrap_err();
//! assert_eq!(err.category(), ErrorCategory::Time);
//! assert!(matches!(err, SubRipError::InvalidTimeFormat { .. }));
//! ```

use core::fmt;
use thiserror::Error;

mod category;

pub use category::ErrorCategory;

/// Main error type for SubRip operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubRipError {
    /// Timestamp text does not match `HH:MM:SS[,.]mmm`
    #[error("Invalid time format '{value}': expected HH:MM:SS,mmm")]
    InvalidTimeFormat { value: String },

    /// A single text block lacks the index/timing/body structure
    #[error("Invalid subtitle block: {reason}")]
    InvalidBlock { reason: String },

    /// A block inside a stream failed to parse under the `Raise` policy
    #[error("Invalid subtitle block #{block} at line {line}: {reason}")]
    InvalidBlockAt {
        /// 1-based position of the block within the stream
        block: usize,
        /// 1-based line number where the block starts
        line: usize,
        reason: String,
        /// Raw block text as read from the input
        raw: String,
    },

    /// A value could not be converted into a time value
    #[error("Cannot coerce '{value}' into a time value: {reason}")]
    UncoercibleValue { value: String, reason: String },

    /// Bytes are not valid under the resolved encoding
    #[error("Cannot decode input as {encoding} at byte {position}: {reason}")]
    Encoding {
        encoding: &'static str,
        position: usize,
        reason: String,
    },

    /// The configured encoding has no decoder
    #[error("Unsupported encoding '{name}'")]
    UnsupportedEncoding { name: String },

    /// A configuration value is not one of the accepted spellings
    #[error("Invalid value '{value}' for {option}: expected {expected}")]
    InvalidOption {
        option: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Failure of an injected reader or writer
    #[error("I/O error: {message}")]
    Io { message: String },
}

impl SubRipError {
    /// Create time format error from the offending text
    pub fn invalid_time<T: fmt::Display>(value: T) -> Self {
        Self::InvalidTimeFormat {
            value: value.to_string(),
        }
    }

    /// Create block error with a reason
    pub fn invalid_block<T: fmt::Display>(reason: T) -> Self {
        Self::InvalidBlock {
            reason: reason.to_string(),
        }
    }

    /// Create coercion error for a value and reason
    pub fn uncoercible<T: fmt::Display>(value: T, reason: &str) -> Self {
        Self::UncoercibleValue {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Check if a stream parse can continue after this error
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidBlock { .. } | Self::InvalidBlockAt { .. })
    }
}

impl From<std::io::Error> for SubRipError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

impl From<fmt::Error> for SubRipError {
    fn from(_: fmt::Error) -> Self {
        Self::Io {
            message: "formatter error while rendering".to_string(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = core::result::Result<T, SubRipError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_block_errors_are_recoverable() {
        assert!(SubRipError::invalid_block("missing '-->'").is_recoverable());
        assert!(SubRipError::InvalidBlockAt {
            block: 3,
            line: 7,
            reason: "missing '-->'".to_string(),
            raw: "1\nfoo".to_string(),
        }
        .is_recoverable());
        assert!(!SubRipError::invalid_time("00:00:01").is_recoverable());
        assert!(!SubRipError::UnsupportedEncoding {
            name: "koi8-r".to_string(),
        }
        .is_recoverable());
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            SubRipError::invalid_time("foo").to_string(),
            "Invalid time format 'foo': expected HH:MM:SS,mmm"
        );
        assert_eq!(
            SubRipError::UnsupportedEncoding {
                name: "ebcdic".to_string()
            }
            .to_string(),
            "Unsupported encoding 'ebcdic'"
        );
    }

    #[test]
    fn io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "short read");
        let err: SubRipError = io.into();
        assert!(matches!(err, SubRipError::Io { .. }));
    }
}
