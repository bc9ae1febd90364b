//! Single SubRip block: index, timing, optional position, and text
//!
//! Parsing is tolerant: the index line may be numeric, an arbitrary token or
//! absent; either timestamp may use `,` or `.` before the milliseconds;
//! anything after the end timestamp is kept verbatim as the position.
//!
//! # Examples
//!
//! ```rust
//! use subrip_core::{SubRipItem, SubtitleIndex};
//!
//! let item: SubRipItem = "1\n00:00:01,000 --> 00:00:02.000\nHi\n".parse()?;
//! assert_eq!(item.index, SubtitleIndex::Number(1));
//! assert_eq!(item.text, "Hi");
//! assert_eq!(item.to_string(), "1\n00:00:01,000 --> 00:00:02,000\nHi\n");
//! # Ok::<(), subrip_core::SubRipError>(())
//! ```

use crate::{time::Shift, Result, SubRipError, SubRipTime};
use core::{cmp::Ordering, fmt, str::FromStr};

mod handle;

pub use handle::ItemHandle;

/// Separator between the start and end timestamps
pub const TIMING_SEPARATOR: &str = "-->";

/// Display index of a block
///
/// Purely cosmetic: never used for lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SubtitleIndex {
    /// Numeric index, the normal case
    Number(i64),
    /// Non-numeric index line, kept as written
    Token(String),
    /// Block had no index line at all
    #[default]
    Missing,
}

impl SubtitleIndex {
    /// Interpret an index line
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        line.parse::<i64>()
            .map_or_else(|_| Self::Token(line.to_string()), Self::Number)
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl fmt::Display for SubtitleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Token(token) => f.write_str(token),
            Self::Missing => Ok(()),
        }
    }
}

impl From<i64> for SubtitleIndex {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for SubtitleIndex {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<&str> for SubtitleIndex {
    fn from(line: &str) -> Self {
        Self::parse(line)
    }
}

/// One subtitle block
///
/// `start <= end` is not enforced; malformed ranges are representable.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubRipItem {
    pub index: SubtitleIndex,
    pub start: SubRipTime,
    pub end: SubRipTime,
    /// Body text, lines separated by `\n`
    pub text: String,
    /// Raw positioning annotation after the end timestamp, empty if none
    pub position: String,
}

impl SubRipItem {
    /// Create a block without position
    pub fn new(
        index: impl Into<SubtitleIndex>,
        start: SubRipTime,
        end: SubRipTime,
        text: impl Into<String>,
    ) -> Self {
        Self {
            index: index.into(),
            start,
            end,
            text: text.into(),
            position: String::new(),
        }
    }

    /// Set the position annotation
    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }

    /// Parse one block of text
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::InvalidBlock`] when the block has fewer than two
    /// lines, lacks a `-->` separator, or carries an unreadable timestamp.
    pub fn parse(source: &str) -> Result<Self> {
        let lines: Vec<&str> = source.lines().collect();
        Self::from_lines(&lines)
    }

    /// Parse a block already split into lines
    ///
    /// Carriage returns are stripped from every line. When the first line is
    /// itself a timing line, the index is [`SubtitleIndex::Missing`].
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        if lines.len() < 2 {
            return Err(SubRipError::invalid_block(format!(
                "expected at least 2 lines, found {}",
                lines.len()
            )));
        }

        let lines: Vec<String> = lines.iter().map(|l| l.as_ref().replace('\r', "")).collect();

        let (index, timing, body) = if is_timing_line(&lines[0]) {
            (SubtitleIndex::Missing, &lines[0], &lines[1..])
        } else {
            (SubtitleIndex::parse(&lines[0]), &lines[1], &lines[2..])
        };

        let (start, end, position) = split_timestamps(timing)?;

        Ok(Self {
            index,
            start,
            end,
            text: body.join("\n"),
            position,
        })
    }

    /// Apply the same shift to start and end
    pub fn shift(&mut self, shift: &Shift) {
        self.start.shift(shift);
        self.end.shift(shift);
    }

    /// `end - start`, negative for malformed ranges
    #[must_use]
    pub fn duration(&self) -> SubRipTime {
        self.end - self.start
    }

    /// Order by `(start, end)`
    #[must_use]
    pub fn cmp_timing(&self, other: &Self) -> Ordering {
        self.start
            .cmp(&other.start)
            .then_with(|| self.end.cmp(&other.end))
    }

    /// Check whether `time` lies within `[start, end]`
    #[must_use]
    pub fn contains(&self, time: SubRipTime) -> bool {
        self.start <= time && time <= self.end
    }
}

/// Check for a line that starts the timing section of a block
fn is_timing_line(line: &str) -> bool {
    line.contains(TIMING_SEPARATOR) && SubRipTime::from_string(line.trim_start()).is_ok()
}

/// Split `start --> end [position]` into its three parts
///
/// The position keeps its inner spacing. Whitespace around it is stripped,
/// so padding after the end time does not survive a round trip; rendering
/// puts back a single space before it.
fn split_timestamps(line: &str) -> Result<(SubRipTime, SubRipTime, String)> {
    let (start, rest) = line.split_once(TIMING_SEPARATOR).ok_or_else(|| {
        SubRipError::invalid_block(format!("missing '{TIMING_SEPARATOR}' in timing line '{line}'"))
    })?;

    let rest = rest.trim_start();
    let (end, position) = rest
        .split_once(char::is_whitespace)
        .unwrap_or((rest, ""));

    let start = SubRipTime::from_string(start.trim())
        .map_err(|_| SubRipError::invalid_block(format!("invalid start time '{}'", start.trim())))?;
    let end = SubRipTime::from_string(end)
        .map_err(|_| SubRipError::invalid_block(format!("invalid end time '{end}'")))?;

    Ok((start, end, position.trim().to_string()))
}

impl fmt::Display for SubRipItem {
    /// Standalone rendering with `\n` line endings
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.index.is_missing() {
            writeln!(f, "{}", self.index)?;
        }
        write!(f, "{} {TIMING_SEPARATOR} {}", self.start, self.end)?;
        if !self.position.trim().is_empty() {
            write!(f, " {}", self.position)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.text)
    }
}

impl FromStr for SubRipItem {
    type Err = SubRipError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
