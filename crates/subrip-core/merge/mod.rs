//! Two-track merge into one synchronized track
//!
//! Every start and end instant of both inputs is a breakpoint. Between two
//! consecutive breakpoints at most one block per track is speaking, so the
//! timeline splits into disjoint intervals, each carrying the text of the
//! block from each track that covers it.
//!
//! # Algorithm
//!
//! Breakpoints are sorted once. Each track keeps a cursor that only moves
//! forward, so the whole merge is a linear scan after sorting.
//!
//! # Example
//!
//! ```rust
//! use subrip_core::{merge_tracks, MergeOptions, SubRipFile, SubRipTime};
//!
//! let english = SubRipFile::parse_str("1\n00:00:00,000 --> 00:00:10,000\nHello\n")?;
//! let french = SubRipFile::parse_str("1\n00:00:05,000 --> 00:00:15,000\nBonjour\n")?;
//!
//! let merged = merge_tracks(&english, &french, &MergeOptions::new().with_delta(SubRipTime::ZERO));
//! assert_eq!(merged.len(), 3);
//! assert_eq!(merged[1].read().text, "Hello\nBonjour");
//! # Ok::<(), subrip_core::SubRipError>(())
//! ```

use crate::{SubRipFile, SubRipItem, SubRipTime, SubtitleIndex};

/// Merge configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MergeOptions {
    /// Intervals no longer than this are dropped
    pub delta: SubRipTime,
}

impl MergeOptions {
    /// Default shortest interval kept, exclusive
    pub const DEFAULT_DELTA: SubRipTime = SubRipTime::new(0, 0, 0, 500);

    #[must_use]
    pub const fn new() -> Self {
        Self {
            delta: Self::DEFAULT_DELTA,
        }
    }

    #[must_use]
    pub const fn with_delta(mut self, delta: SubRipTime) -> Self {
        self.delta = delta;
        self
    }
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Forward-only search over one time-sorted track
struct Track {
    items: Vec<SubRipItem>,
    cursor: usize,
}

impl Track {
    fn new(file: &SubRipFile) -> Self {
        let mut items = file.snapshot();
        items.sort_by(SubRipItem::cmp_timing);
        Self { items, cursor: 0 }
    }

    /// Text of the first block covering `[lo, hi]`, empty if none does
    ///
    /// Blocks skipped on the way end before `lo`, so they cannot cover a
    /// later interval either and the cursor stays past them.
    fn text_covering(&mut self, lo: SubRipTime, hi: SubRipTime) -> &str {
        while let Some(item) = self.items.get(self.cursor) {
            if item.start >= hi {
                break;
            }
            if item.start <= lo && hi <= item.end {
                return &item.text;
            }
            self.cursor += 1;
        }
        ""
    }
}

fn join_texts(first: &str, second: &str) -> String {
    if first.is_empty() || second.is_empty() {
        [first, second].concat()
    } else {
        format!("{first}\n{second}")
    }
}

/// Interleave two tracks into one collection of disjoint blocks
///
/// Neither input is modified. Intervals of length `delta` or less are
/// dropped, as are intervals where neither track has text. The result is
/// renumbered from 1.
#[must_use]
pub fn merge_tracks(a: &SubRipFile, b: &SubRipFile, options: &MergeOptions) -> SubRipFile {
    let mut first = Track::new(a);
    let mut second = Track::new(b);

    let mut breakpoints: Vec<SubRipTime> = first
        .items
        .iter()
        .chain(&second.items)
        .flat_map(|item| [item.start, item.end])
        .collect();
    breakpoints.sort_unstable();

    let mut merged = SubRipFile::new();
    for pair in breakpoints.windows(2) {
        let (lo, hi) = (pair[0], pair[1]);
        if hi - lo <= options.delta {
            continue;
        }
        let text = join_texts(first.text_covering(lo, hi), second.text_covering(lo, hi));
        if !text.is_empty() {
            merged.push(SubRipItem::new(SubtitleIndex::Number(0), lo, hi, text));
        }
    }
    merged.clean_indexes();

    tracing::debug!(
        first = first.items.len(),
        second = second.items.len(),
        breakpoints = breakpoints.len(),
        merged = merged.len(),
        "merged subtitle tracks"
    );
    merged
}
