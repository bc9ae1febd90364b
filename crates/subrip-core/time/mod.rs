//! SubRip time values
//!
//! A [`SubRipTime`] is a single signed millisecond count (the *ordinal*).
//! Hours, minutes, seconds and milliseconds are views computed from it, and
//! writing a view replaces only that field's contribution to the ordinal, so
//! out-of-range writes carry into the neighbouring fields.
//!
//! # Examples
//!
//! ```rust
//! use subrip_core::SubRipTime;
//!
//! let mut time = SubRipTime::default();
//! time.set_seconds(90);
//! assert_eq!(time.parts(), (0, 1, 30, 0));
//!
//! let parsed: SubRipTime = "01:02:03,004".parse()?;
//! assert_eq!(parsed.ordinal(), 3_723_004);
//! assert_eq!(parsed.to_string(), "01:02:03,004");
//! # Ok::<(), subrip_core::SubRipError>(())
//! ```

use crate::{Result, SubRipError};
use core::{
    cmp::Ordering,
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
    str::FromStr,
};
use regex::Regex;
use std::sync::OnceLock;

mod coerce;
mod shift;

pub use coerce::{TimeFields, TimeLike, WallClock};
pub use shift::Shift;

/// Milliseconds in one second
pub const SECONDS_RATIO: i64 = 1_000;
/// Milliseconds in one minute
pub const MINUTES_RATIO: i64 = SECONDS_RATIO * 60;
/// Milliseconds in one hour
pub const HOURS_RATIO: i64 = MINUTES_RATIO * 60;

/// Accepted timestamp shape; anything after the match is ignored
///
/// `None` only if the pattern fails to compile, which makes every timestamp
/// invalid rather than panicking.
fn time_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^([0-9]{2}):([0-9]{2}):([0-9]{2})[,.]([0-9]{3})").ok())
        .as_ref()
}

/// One of the four views over a time value's ordinal
///
/// Each view is `(ordinal mod super_ratio) div ratio`, with floor semantics so
/// that negative ordinals decompose consistently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeField {
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl TimeField {
    /// All fields, most significant first
    pub const ALL: [Self; 4] = [Self::Hours, Self::Minutes, Self::Seconds, Self::Milliseconds];

    /// Milliseconds represented by one unit of this field
    #[must_use]
    pub const fn ratio(self) -> i64 {
        match self {
            Self::Hours => HOURS_RATIO,
            Self::Minutes => MINUTES_RATIO,
            Self::Seconds => SECONDS_RATIO,
            Self::Milliseconds => 1,
        }
    }

    /// Ratio of the next field up, `None` for hours which never wrap
    #[must_use]
    pub const fn super_ratio(self) -> Option<i64> {
        match self {
            Self::Hours => None,
            Self::Minutes => Some(HOURS_RATIO),
            Self::Seconds => Some(MINUTES_RATIO),
            Self::Milliseconds => Some(SECONDS_RATIO),
        }
    }
}

/// Millisecond-precision SubRip timestamp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct SubRipTime {
    ordinal: i64,
}

impl SubRipTime {
    /// Zero timestamp
    pub const ZERO: Self = Self { ordinal: 0 };

    /// Build from field values; out-of-range parts carry
    #[must_use]
    pub const fn new(hours: i64, minutes: i64, seconds: i64, milliseconds: i64) -> Self {
        Self {
            ordinal: hours * HOURS_RATIO
                + minutes * MINUTES_RATIO
                + seconds * SECONDS_RATIO
                + milliseconds,
        }
    }

    /// Build from a total millisecond count
    #[must_use]
    pub const fn from_ordinal(ordinal: i64) -> Self {
        Self { ordinal }
    }

    /// Parse `HH:MM:SS,mmm` (a `.` separator is also accepted)
    ///
    /// Only the leading timestamp is read; trailing characters are ignored so
    /// that stray junk after an end time does not abort block parsing.
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::InvalidTimeFormat`] when the text does not start
    /// with a timestamp.
    pub fn from_string(source: &str) -> Result<Self> {
        let captures = time_pattern()
            .and_then(|pattern| pattern.captures(source))
            .ok_or_else(|| SubRipError::invalid_time(source))?;

        let mut parts = [0_i64; 4];
        for (slot, group) in parts.iter_mut().zip(1..=4) {
            *slot = captures
                .get(group)
                .and_then(|m| m.as_str().parse().ok())
                .ok_or_else(|| SubRipError::invalid_time(source))?;
        }

        Ok(Self::new(parts[0], parts[1], parts[2], parts[3]))
    }

    /// Build from a wall-clock time of day, truncating to milliseconds
    #[must_use]
    pub const fn from_wall_clock(hour: u32, minute: u32, second: u32, microsecond: u32) -> Self {
        Self::new(
            hour as i64,
            minute as i64,
            second as i64,
            (microsecond / 1_000) as i64,
        )
    }

    /// Total milliseconds
    #[must_use]
    pub const fn ordinal(self) -> i64 {
        self.ordinal
    }

    /// Replace the total millisecond count
    pub fn set_ordinal(&mut self, ordinal: i64) {
        self.ordinal = ordinal;
    }

    /// Read one field view
    #[must_use]
    pub const fn field(self, field: TimeField) -> i64 {
        let scoped = match field.super_ratio() {
            Some(super_ratio) => self.ordinal.rem_euclid(super_ratio),
            None => self.ordinal,
        };
        scoped.div_euclid(field.ratio())
    }

    /// Write one field view, carrying overflow into the other fields
    ///
    /// The ordinal becomes `old - old_field * ratio + value * ratio`.
    pub fn set_field(&mut self, field: TimeField, value: i64) {
        self.ordinal += (value - self.field(field)) * field.ratio();
    }

    #[must_use]
    pub const fn hours(self) -> i64 {
        self.field(TimeField::Hours)
    }

    #[must_use]
    pub const fn minutes(self) -> i64 {
        self.field(TimeField::Minutes)
    }

    #[must_use]
    pub const fn seconds(self) -> i64 {
        self.field(TimeField::Seconds)
    }

    #[must_use]
    pub const fn milliseconds(self) -> i64 {
        self.field(TimeField::Milliseconds)
    }

    pub fn set_hours(&mut self, value: i64) {
        self.set_field(TimeField::Hours, value);
    }

    pub fn set_minutes(&mut self, value: i64) {
        self.set_field(TimeField::Minutes, value);
    }

    pub fn set_seconds(&mut self, value: i64) {
        self.set_field(TimeField::Seconds, value);
    }

    pub fn set_milliseconds(&mut self, value: i64) {
        self.set_field(TimeField::Milliseconds, value);
    }

    /// `(hours, minutes, seconds, milliseconds)`
    #[must_use]
    pub const fn parts(self) -> (i64, i64, i64, i64) {
        (
            self.hours(),
            self.minutes(),
            self.seconds(),
            self.milliseconds(),
        )
    }

    /// Multiply the ordinal by `ratio`, rounding to the nearest millisecond
    pub fn scale(&mut self, ratio: f64) {
        self.ordinal = (self.ordinal as f64 * ratio).round() as i64;
    }

    /// By-value variant of [`scale`](Self::scale)
    #[must_use]
    pub fn scaled(mut self, ratio: f64) -> Self {
        self.scale(ratio);
        self
    }

    /// Apply a shift in place: ratio first, then the field offsets
    pub fn shift(&mut self, shift: &Shift) {
        if let Some(ratio) = shift.ratio {
            self.scale(ratio);
        }
        self.ordinal += shift.offset();
    }

    /// Coerce any time-like value
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::UncoercibleValue`] when the value cannot be
    /// converted.
    pub fn coerce<T: Into<TimeLike>>(value: T) -> Result<Self> {
        value.into().coerce()
    }

    /// Add any coercible value
    ///
    /// # Errors
    ///
    /// Propagates coercion failures.
    pub fn try_add<T: Into<TimeLike>>(self, other: T) -> Result<Self> {
        Ok(self + Self::coerce(other)?)
    }

    /// Subtract any coercible value
    ///
    /// # Errors
    ///
    /// Propagates coercion failures.
    pub fn try_sub<T: Into<TimeLike>>(self, other: T) -> Result<Self> {
        Ok(self - Self::coerce(other)?)
    }

    /// Compare against any coercible value
    ///
    /// # Errors
    ///
    /// Propagates coercion failures.
    pub fn try_cmp<T: Into<TimeLike>>(&self, other: T) -> Result<Ordering> {
        Ok(self.ordinal.cmp(&Self::coerce(other)?.ordinal))
    }

    /// Equality against any coercible value
    ///
    /// # Errors
    ///
    /// Propagates coercion failures.
    pub fn try_eq<T: Into<TimeLike>>(&self, other: T) -> Result<bool> {
        self.try_cmp(other).map(Ordering::is_eq)
    }
}

impl fmt::Display for SubRipTime {
    /// Canonical `HH:MM:SS,mmm`; negative values render as zero
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clamped = Self::from_ordinal(self.ordinal.max(0));
        let (hours, minutes, seconds, milliseconds) = clamped.parts();
        write!(f, "{hours:02}:{minutes:02}:{seconds:02},{milliseconds:03}")
    }
}

impl FromStr for SubRipTime {
    type Err = SubRipError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_string(s)
    }
}

impl Add for SubRipTime {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_ordinal(self.ordinal + rhs.ordinal)
    }
}

impl Sub for SubRipTime {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_ordinal(self.ordinal - rhs.ordinal)
    }
}

impl AddAssign for SubRipTime {
    fn add_assign(&mut self, rhs: Self) {
        self.ordinal += rhs.ordinal;
    }
}

impl SubAssign for SubRipTime {
    fn sub_assign(&mut self, rhs: Self) {
        self.ordinal -= rhs.ordinal;
    }
}
