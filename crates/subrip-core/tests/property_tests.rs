//! Property-based tests for subrip-core
//!
//! Uses proptest to check the timeline invariants across generated
//! collections.

use proptest::prelude::*;
use subrip_core::{
    merge_tracks, MergeOptions, SliceFilter, SubRipFile, SubRipItem, SubRipTime, SubtitleIndex,
};

/// Generate body text without blank lines
fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 ,.!?]{1,40}",
        "[a-z]{1,10}\n[a-z]{1,10}",
        "[\u{00C0}-\u{00FF}a-z ]{1,20}",
    ]
    .prop_filter("body must not be blank", |text| {
        text.lines().all(|line| !line.trim().is_empty())
    })
}

/// Generate a block with `start <= end` inside the first ten hours
fn arb_item() -> impl Strategy<Value = SubRipItem> {
    (0..36_000_000i64, 0..60_000i64, 1..10_000i64, arb_text()).prop_map(
        |(start, length, index, text)| {
            SubRipItem::new(
                index,
                SubRipTime::from_ordinal(start),
                SubRipTime::from_ordinal(start + length),
                text.trim().to_string(),
            )
        },
    )
}

fn arb_file() -> impl Strategy<Value = SubRipFile> {
    prop::collection::vec(arb_item(), 0..30).prop_map(SubRipFile::from_items)
}

fn intervals(file: &SubRipFile) -> Vec<(i64, i64)> {
    file.iter()
        .map(|h| {
            let item = h.read();
            (item.start.ordinal(), item.end.ordinal())
        })
        .collect()
}

proptest! {
    #[test]
    fn block_render_round_trips(item in arb_item()) {
        let reparsed = SubRipItem::parse(&item.to_string()).unwrap();
        prop_assert_eq!(reparsed, item);
    }

    #[test]
    fn file_render_round_trips(file in arb_file(), crlf in any::<bool>()) {
        let file = file.with_eol(if crlf { "\r\n" } else { "\n" });
        let reparsed = SubRipFile::parse_str(&file.render()).unwrap();
        prop_assert_eq!(reparsed.snapshot(), file.snapshot());
        if !file.is_empty() {
            prop_assert_eq!(reparsed.eol(), file.eol());
        }
    }

    #[test]
    fn field_views_match_ordinal(h in 0..100i64, m in 0..60i64, s in 0..60i64, ms in 0..1000i64) {
        let text = format!("{h:02}:{m:02}:{s:02},{ms:03}");
        let time = SubRipTime::from_string(&text).unwrap();
        prop_assert_eq!(time.ordinal(), h * 3_600_000 + m * 60_000 + s * 1_000 + ms);
        prop_assert_eq!(time.parts(), (h, m, s, ms));
        prop_assert_eq!(time.to_string(), text);
    }

    #[test]
    fn field_writes_carry(value in 0..10_000i64) {
        let mut time = SubRipTime::ZERO;
        time.set_seconds(value);
        prop_assert_eq!(time.ordinal(), value * 1_000);
        prop_assert_eq!(time.minutes() * 60 + time.hours() * 3_600 + time.seconds(), value);

        let mut time = SubRipTime::ZERO;
        time.set_milliseconds(value);
        prop_assert_eq!(time.ordinal(), value);
    }

    #[test]
    fn slice_partitions_by_end(file in arb_file(), bound in 0..36_060_000i64) {
        let bound = SubRipTime::from_ordinal(bound);
        let before = file.slice(SliceFilter::new().ends_before(bound)).unwrap().len();
        let after = file.slice(SliceFilter::new().ends_after(bound)).unwrap().len();
        let ties = file.iter().filter(|h| h.read().end == bound).count();
        prop_assert_eq!(before + after + ties, file.len());
    }

    #[test]
    fn remove_overlaps_leaves_adjacent_pairs_ordered(mut file in arb_file()) {
        file.remove_overlaps();
        for pair in intervals(&file).windows(2) {
            prop_assert!(pair[0].1 <= pair[1].0, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn clean_indexes_is_idempotent(mut file in arb_file()) {
        file.clean_indexes();
        let first: Vec<SubtitleIndex> = file.iter().map(|h| h.read().index.clone()).collect();
        file.clean_indexes();
        let second: Vec<SubtitleIndex> = file.iter().map(|h| h.read().index.clone()).collect();
        prop_assert_eq!(&first, &second);
        for (position, index) in first.iter().enumerate() {
            prop_assert_eq!(index.as_number(), Some(position as i64 + 1));
        }
    }

    #[test]
    fn merged_blocks_are_disjoint(a in arb_file(), b in arb_file(), delta in 0..1_000i64) {
        let options = MergeOptions::new().with_delta(SubRipTime::from_ordinal(delta));
        let merged = merge_tracks(&a, &b, &options);
        let spans = intervals(&merged);
        for pair in spans.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].0);
        }
        for (start, end) in spans {
            prop_assert!(end - start > delta);
        }
    }
}
