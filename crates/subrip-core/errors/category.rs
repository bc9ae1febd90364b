//! Error categorization for filtering and reporting

use super::SubRipError;
use core::fmt;

/// Error category for grouping related failures
///
/// # Examples
///
/// ```rust
/// use subrip_core::SubRipError;
/// use subrip_core::errors::ErrorCategory;
///
/// let error = SubRipError::invalid_block("too short");
/// assert_eq!(error.category(), ErrorCategory::Block);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Timestamp syntax problems
    Time,
    /// Block structure problems
    Block,
    /// Values that cannot become a time value
    Coercion,
    /// Byte decoding and encoder lookup
    Encoding,
    /// Rejected configuration values
    Config,
    /// Injected reader/writer failures
    Io,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Time => write!(f, "time"),
            Self::Block => write!(f, "block"),
            Self::Coercion => write!(f, "coercion"),
            Self::Encoding => write!(f, "encoding"),
            Self::Config => write!(f, "config"),
            Self::Io => write!(f, "io"),
        }
    }
}

impl SubRipError {
    /// Get the category of this error
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTimeFormat { .. } => ErrorCategory::Time,
            Self::InvalidBlock { .. } | Self::InvalidBlockAt { .. } => ErrorCategory::Block,
            Self::UncoercibleValue { .. } => ErrorCategory::Coercion,
            Self::Encoding { .. } | Self::UnsupportedEncoding { .. } => ErrorCategory::Encoding,
            Self::InvalidOption { .. } => ErrorCategory::Config,
            Self::Io { .. } => ErrorCategory::Io,
        }
    }
}
