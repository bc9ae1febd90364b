//! Time-window filter for [`SubRipFile::slice`](super::SubRipFile::slice)

use crate::{time::TimeLike, Result, SubRipItem, SubRipTime};

/// Conjunction of optional strict bounds on block start and end
///
/// Unset bounds are not applied. Bounds accept any time-like value and are
/// coerced when the filter is applied.
///
/// # Examples
///
/// ```rust
/// use subrip_core::SliceFilter;
///
/// let filter = SliceFilter::new()
///     .starts_after((0, 0, 10, 0))
///     .ends_before("00:01:00,000");
/// assert!(filter.ends_before.is_some());
/// assert!(filter.starts_before.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliceFilter {
    pub starts_before: Option<TimeLike>,
    pub starts_after: Option<TimeLike>,
    pub ends_before: Option<TimeLike>,
    pub ends_after: Option<TimeLike>,
}

impl SliceFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep blocks with `start < time`
    #[must_use]
    pub fn starts_before(mut self, time: impl Into<TimeLike>) -> Self {
        self.starts_before = Some(time.into());
        self
    }

    /// Keep blocks with `start > time`
    #[must_use]
    pub fn starts_after(mut self, time: impl Into<TimeLike>) -> Self {
        self.starts_after = Some(time.into());
        self
    }

    /// Keep blocks with `end < time`
    #[must_use]
    pub fn ends_before(mut self, time: impl Into<TimeLike>) -> Self {
        self.ends_before = Some(time.into());
        self
    }

    /// Keep blocks with `end > time`
    #[must_use]
    pub fn ends_after(mut self, time: impl Into<TimeLike>) -> Self {
        self.ends_after = Some(time.into());
        self
    }

    pub(crate) fn compile(self) -> Result<Bounds> {
        let coerce = |bound: Option<TimeLike>| bound.map(TimeLike::coerce).transpose();
        Ok(Bounds {
            starts_before: coerce(self.starts_before)?,
            starts_after: coerce(self.starts_after)?,
            ends_before: coerce(self.ends_before)?,
            ends_after: coerce(self.ends_after)?,
        })
    }
}

/// Filter with every bound already coerced
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bounds {
    starts_before: Option<SubRipTime>,
    starts_after: Option<SubRipTime>,
    ends_before: Option<SubRipTime>,
    ends_after: Option<SubRipTime>,
}

impl Bounds {
    pub(crate) fn matches(&self, item: &SubRipItem) -> bool {
        holds(self.starts_before, |t| item.start < t)
            && holds(self.starts_after, |t| item.start > t)
            && holds(self.ends_before, |t| item.end < t)
            && holds(self.ends_after, |t| item.end > t)
    }
}

/// Unset bounds always hold
fn holds(bound: Option<SubRipTime>, check: impl FnOnce(SubRipTime) -> bool) -> bool {
    match bound {
        Some(bound) => check(bound),
        None => true,
    }
}
