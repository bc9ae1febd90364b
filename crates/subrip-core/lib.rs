//! # SubRip Core
//!
//! Parser, editor and merger for SubRip (`.srt`) subtitles.
//!
//! ## Features
//!
//! - **Carry-safe time model**: one millisecond ordinal with hour, minute,
//!   second and millisecond views that carry on write
//! - **Tolerant block codec**: numeric, token or missing indexes, `,` or `.`
//!   millisecond separators, verbatim position annotations
//! - **Stream parser**: lazy or eager, with `Pass`/`Log`/`Raise` handling of
//!   invalid blocks and byte-order-mark detection
//! - **Timeline operations**: slicing, point lookup, shifting, overlap
//!   removal and re-indexing over shared block handles
//! - **Two-track merge**: interleave two languages into one track
//!
//! ## Quick Start
//!
//! ```rust
//! use subrip_core::{merge_tracks, MergeOptions, Shift, SubRipFile};
//!
//! let source = "1\n00:00:01,000 --> 00:00:04,000\nHello\n\n2\n00:00:03,000 --> 00:00:06,000\nWorld\n";
//! let mut file = SubRipFile::parse_str(source)?;
//!
//! file.shift(&Shift::new().with_seconds(2));
//! file.remove_overlaps();
//! assert_eq!(file[0].read().end, (0, 0, 5, 0));
//!
//! let merged = merge_tracks(&file, &SubRipFile::new(), &MergeOptions::default());
//! assert_eq!(merged.len(), 2);
//! print!("{}", merged.render());
//! # Ok::<(), subrip_core::SubRipError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod encoding;
pub mod errors;
pub mod file;
pub mod item;
pub mod merge;
pub mod parser;
pub mod time;

pub use encoding::{EncodingSetting, TextEncoding};
pub use errors::{Result, SubRipError};
pub use file::{SliceFilter, SubRipFile};
pub use item::{ItemHandle, SubRipItem, SubtitleIndex};
pub use merge::{merge_tracks, MergeOptions};
pub use parser::{ErrorHandling, ParseOptions};
pub use time::{Shift, SubRipTime, TimeFields, TimeLike, WallClock};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
