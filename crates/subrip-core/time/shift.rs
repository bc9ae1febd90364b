//! Time shift description shared by times, blocks and collections

use super::{HOURS_RATIO, MINUTES_RATIO, SECONDS_RATIO};

/// Offset and optional ratio applied by `shift`
///
/// When a ratio is set, the whole ordinal is scaled first and the field
/// offsets are added afterwards.
///
/// # Examples
///
/// ```rust
/// use subrip_core::{Shift, SubRipTime};
///
/// let mut time = SubRipTime::new(0, 1, 0, 0);
/// time.shift(&Shift::new().with_ratio(2.0).with_seconds(5));
/// assert_eq!(time, SubRipTime::new(0, 2, 5, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shift {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
    /// Scale factor applied before the offsets
    pub ratio: Option<f64>,
}

impl Shift {
    /// Empty shift
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            seconds: 0,
            milliseconds: 0,
            ratio: None,
        }
    }

    /// Pure offset in all four fields
    #[must_use]
    pub const fn from_parts(hours: i64, minutes: i64, seconds: i64, milliseconds: i64) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            milliseconds,
            ratio: None,
        }
    }

    #[must_use]
    pub const fn with_hours(mut self, hours: i64) -> Self {
        self.hours = hours;
        self
    }

    #[must_use]
    pub const fn with_minutes(mut self, minutes: i64) -> Self {
        self.minutes = minutes;
        self
    }

    #[must_use]
    pub const fn with_seconds(mut self, seconds: i64) -> Self {
        self.seconds = seconds;
        self
    }

    #[must_use]
    pub const fn with_milliseconds(mut self, milliseconds: i64) -> Self {
        self.milliseconds = milliseconds;
        self
    }

    #[must_use]
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }

    /// Total field offset in milliseconds
    #[must_use]
    pub const fn offset(&self) -> i64 {
        self.hours * HOURS_RATIO
            + self.minutes * MINUTES_RATIO
            + self.seconds * SECONDS_RATIO
            + self.milliseconds
    }
}
