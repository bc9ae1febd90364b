//! Conversion of time-like values into [`SubRipTime`]
//!
//! Every API that accepts "anything time-like" takes `impl Into<TimeLike>`
//! and funnels through [`TimeLike::coerce`]. Infallible shapes also convert
//! directly with `From`, and can be compared against a time value with the
//! ordinary comparison operators.

use super::{SubRipTime, HOURS_RATIO, MINUTES_RATIO, SECONDS_RATIO};
use crate::{Result, SubRipError};
use core::cmp::Ordering;

/// Any value accepted where a time value is expected
#[derive(Debug, Clone, PartialEq)]
pub enum TimeLike {
    /// Already a time value
    Time(SubRipTime),
    /// `(hours, minutes, seconds, milliseconds)`
    Parts(i64, i64, i64, i64),
    /// Named fields, missing ones count as zero
    Fields(TimeFields),
    /// Raw millisecond count
    Ordinal(i64),
    /// Time of day with microsecond precision
    WallClock(WallClock),
    /// `HH:MM:SS,mmm` text
    Text(String),
}

impl TimeLike {
    /// Convert into a time value
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::UncoercibleValue`] for text that is not a
    /// timestamp, wall-clock values outside a day, and field values whose
    /// total overflows.
    pub fn coerce(self) -> Result<SubRipTime> {
        match self {
            Self::Time(time) => Ok(time),
            Self::Ordinal(ordinal) => Ok(SubRipTime::from_ordinal(ordinal)),
            Self::Parts(h, m, s, ms) => checked_total(h, m, s, ms)
                .map(SubRipTime::from_ordinal)
                .ok_or_else(|| {
                    SubRipError::uncoercible(format!("({h}, {m}, {s}, {ms})"), "total overflows")
                }),
            Self::Fields(fields) => {
                let (h, m, s, ms) = fields.as_parts();
                checked_total(h, m, s, ms)
                    .map(SubRipTime::from_ordinal)
                    .ok_or_else(|| SubRipError::uncoercible(format!("{fields:?}"), "total overflows"))
            }
            Self::WallClock(clock) => clock.to_time(),
            Self::Text(text) => SubRipTime::from_string(&text)
                .map_err(|_| SubRipError::uncoercible(&text, "expected HH:MM:SS,mmm")),
        }
    }
}

fn checked_total(h: i64, m: i64, s: i64, ms: i64) -> Option<i64> {
    h.checked_mul(HOURS_RATIO)?
        .checked_add(m.checked_mul(MINUTES_RATIO)?)?
        .checked_add(s.checked_mul(SECONDS_RATIO)?)?
        .checked_add(ms)
}

/// Partial field mapping; unset fields are zero
///
/// # Examples
///
/// ```rust
/// use subrip_core::{SubRipTime, TimeFields};
///
/// let forty = TimeFields::new().seconds(40);
/// assert_eq!(SubRipTime::from(forty), SubRipTime::new(0, 0, 40, 0));
/// assert!(SubRipTime::new(0, 0, 41, 0) > forty);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeFields {
    pub hours: Option<i64>,
    pub minutes: Option<i64>,
    pub seconds: Option<i64>,
    pub milliseconds: Option<i64>,
}

impl TimeFields {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hours: None,
            minutes: None,
            seconds: None,
            milliseconds: None,
        }
    }

    #[must_use]
    pub const fn hours(mut self, value: i64) -> Self {
        self.hours = Some(value);
        self
    }

    #[must_use]
    pub const fn minutes(mut self, value: i64) -> Self {
        self.minutes = Some(value);
        self
    }

    #[must_use]
    pub const fn seconds(mut self, value: i64) -> Self {
        self.seconds = Some(value);
        self
    }

    #[must_use]
    pub const fn milliseconds(mut self, value: i64) -> Self {
        self.milliseconds = Some(value);
        self
    }

    const fn as_parts(self) -> (i64, i64, i64, i64) {
        (
            unwrap_or_zero(self.hours),
            unwrap_or_zero(self.minutes),
            unwrap_or_zero(self.seconds),
            unwrap_or_zero(self.milliseconds),
        )
    }
}

const fn unwrap_or_zero(value: Option<i64>) -> i64 {
    match value {
        Some(v) => v,
        None => 0,
    }
}

/// Time of day as reported by a clock: hour, minute, second, microsecond
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct WallClock {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub microsecond: u32,
}

impl WallClock {
    #[must_use]
    pub const fn new(hour: u32, minute: u32, second: u32, microsecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            microsecond,
        }
    }

    /// Convert to a time value, truncating microseconds
    ///
    /// A leap second (`second == 60`) is accepted, as clocks report it.
    ///
    /// # Errors
    ///
    /// Returns [`SubRipError::UncoercibleValue`] if any field is out of range.
    pub fn to_time(self) -> Result<SubRipTime> {
        if self.hour >= 24 || self.minute >= 60 || self.second > 60 || self.microsecond >= 1_000_000
        {
            return Err(SubRipError::uncoercible(
                format!(
                    "{:02}:{:02}:{:02}.{:06}",
                    self.hour, self.minute, self.second, self.microsecond
                ),
                "not a valid time of day",
            ));
        }
        Ok(SubRipTime::from_wall_clock(
            self.hour,
            self.minute,
            self.second,
            self.microsecond,
        ))
    }
}

#[cfg(feature = "chrono")]
mod wall_clock_chrono {
    use super::{SubRipTime, TimeLike, WallClock};
    use crate::{Result, SubRipError};
    use chrono::{NaiveTime, Timelike};

    impl From<NaiveTime> for WallClock {
        fn from(time: NaiveTime) -> Self {
            // chrono encodes a leap second as nanosecond >= 1_000_000_000
            let (second, nanosecond) = if time.nanosecond() >= 1_000_000_000 {
                (time.second() + 1, time.nanosecond() - 1_000_000_000)
            } else {
                (time.second(), time.nanosecond())
            };
            Self::new(time.hour(), time.minute(), second, nanosecond / 1_000)
        }
    }

    impl From<NaiveTime> for TimeLike {
        fn from(time: NaiveTime) -> Self {
            Self::WallClock(time.into())
        }
    }

    impl SubRipTime {
        /// Convert to a chrono time of day
        ///
        /// # Errors
        ///
        /// Returns [`SubRipError::UncoercibleValue`] for negative values and
        /// values of 24 hours or more.
        pub fn to_naive_time(self) -> Result<NaiveTime> {
            let (h, m, s, ms) = self.parts();
            if self.ordinal() < 0 || h >= 24 {
                return Err(SubRipError::uncoercible(self, "outside a single day"));
            }
            NaiveTime::from_hms_milli_opt(h as u32, m as u32, s as u32, ms as u32)
                .ok_or_else(|| SubRipError::uncoercible(self, "outside a single day"))
        }
    }
}

impl From<SubRipTime> for TimeLike {
    fn from(time: SubRipTime) -> Self {
        Self::Time(time)
    }
}

impl From<&SubRipTime> for TimeLike {
    fn from(time: &SubRipTime) -> Self {
        Self::Time(*time)
    }
}

impl From<TimeFields> for TimeLike {
    fn from(fields: TimeFields) -> Self {
        Self::Fields(fields)
    }
}

impl From<WallClock> for TimeLike {
    fn from(clock: WallClock) -> Self {
        Self::WallClock(clock)
    }
}

impl From<&str> for TimeLike {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TimeLike {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<TimeFields> for SubRipTime {
    fn from(fields: TimeFields) -> Self {
        let (h, m, s, ms) = fields.as_parts();
        Self::new(h, m, s, ms)
    }
}

// Integer shapes are implemented for both i32 and i64 so that untyped
// literals such as `(0, 0, 40)` resolve through the i32 fallback.
macro_rules! impl_integer_shapes {
    ($($int:ty),*) => {$(
        impl From<$int> for TimeLike {
            fn from(ordinal: $int) -> Self {
                Self::Ordinal(i64::from(ordinal))
            }
        }

        impl From<($int, $int, $int, $int)> for TimeLike {
            fn from((h, m, s, ms): ($int, $int, $int, $int)) -> Self {
                Self::Parts(i64::from(h), i64::from(m), i64::from(s), i64::from(ms))
            }
        }

        impl From<($int, $int, $int)> for TimeLike {
            fn from((h, m, s): ($int, $int, $int)) -> Self {
                Self::Parts(i64::from(h), i64::from(m), i64::from(s), 0)
            }
        }

        impl From<($int, $int, $int, $int)> for SubRipTime {
            fn from((h, m, s, ms): ($int, $int, $int, $int)) -> Self {
                Self::new(i64::from(h), i64::from(m), i64::from(s), i64::from(ms))
            }
        }

        impl From<($int, $int, $int)> for SubRipTime {
            fn from((h, m, s): ($int, $int, $int)) -> Self {
                Self::new(i64::from(h), i64::from(m), i64::from(s), 0)
            }
        }

        impl PartialEq<($int, $int, $int, $int)> for SubRipTime {
            fn eq(&self, other: &($int, $int, $int, $int)) -> bool {
                *self == Self::from(*other)
            }
        }

        impl PartialOrd<($int, $int, $int, $int)> for SubRipTime {
            fn partial_cmp(&self, other: &($int, $int, $int, $int)) -> Option<Ordering> {
                Some(self.cmp(&Self::from(*other)))
            }
        }

        impl PartialEq<($int, $int, $int)> for SubRipTime {
            fn eq(&self, other: &($int, $int, $int)) -> bool {
                *self == Self::from(*other)
            }
        }

        impl PartialOrd<($int, $int, $int)> for SubRipTime {
            fn partial_cmp(&self, other: &($int, $int, $int)) -> Option<Ordering> {
                Some(self.cmp(&Self::from(*other)))
            }
        }

        impl PartialEq<SubRipTime> for ($int, $int, $int, $int) {
            fn eq(&self, other: &SubRipTime) -> bool {
                SubRipTime::from(*self) == *other
            }
        }
    )*};
}

impl_integer_shapes!(i32, i64);

impl From<u32> for TimeLike {
    fn from(ordinal: u32) -> Self {
        Self::Ordinal(i64::from(ordinal))
    }
}

impl PartialEq<TimeFields> for SubRipTime {
    fn eq(&self, other: &TimeFields) -> bool {
        *self == Self::from(*other)
    }
}

impl PartialOrd<TimeFields> for SubRipTime {
    fn partial_cmp(&self, other: &TimeFields) -> Option<Ordering> {
        Some(self.cmp(&Self::from(*other)))
    }
}

impl PartialEq<SubRipTime> for TimeFields {
    fn eq(&self, other: &SubRipTime) -> bool {
        SubRipTime::from(*self) == *other
    }
}
