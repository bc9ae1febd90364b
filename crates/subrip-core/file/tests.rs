//! Unit tests for the block collection

use super::*;
use crate::parser::ParseIssue;
use pretty_assertions::assert_eq;

const THREE_BLOCKS: &str = "1\n00:00:01,000 --> 00:00:04,000\nOne\n\n\
    2\n00:00:03,000 --> 00:00:06,000\nTwo\n\n\
    3\n00:00:05,000 --> 00:00:08,000\nThree\n";

fn block(index: i64, start_ms: i64, end_ms: i64, text: &str) -> SubRipItem {
    SubRipItem::new(
        index,
        SubRipTime::from_ordinal(start_ms),
        SubRipTime::from_ordinal(end_ms),
        text,
    )
}

fn texts(file: &SubRipFile) -> Vec<String> {
    file.iter().map(|h| h.read().text.clone()).collect()
}

#[test]
fn parse_and_count() {
    let file = SubRipFile::parse_str(THREE_BLOCKS).unwrap();
    assert_eq!(file.len(), 3);
    assert_eq!(texts(&file), vec!["One", "Two", "Three"]);
    assert_eq!(file.text_encoding(), TextEncoding::Utf8);
    assert!(file.source_path().is_none());
}

#[test]
fn explicit_eol_wins_over_detected() {
    let crlf = THREE_BLOCKS.replace('\n', "\r\n");
    let detected = SubRipFile::parse_str(&crlf).unwrap();
    assert_eq!(detected.eol(), "\r\n");

    let options = ParseOptions::new().with_eol("\n");
    let explicit = SubRipFile::from_str_with_options(&crlf, &options).unwrap();
    assert_eq!(explicit.eol(), "\n");
}

#[test]
fn eol_defaults_to_platform() {
    let mut file = SubRipFile::new();
    assert_eq!(file.eol(), DEFAULT_EOL);
    file.detect_eol("\r\n");
    assert_eq!(file.eol(), "\r\n");
    file.detect_eol("\n");
    assert_eq!(file.eol(), "\r\n");
    file.set_eol("\n");
    assert_eq!(file.eol(), "\n");
}

#[test]
fn raise_policy_surfaces_block_position() {
    let source = "1\n00:00:01,000 --> 00:00:02,000\nok\n\n2\n00:00:01 --> 00:00:10\nbad\n";
    let options = ParseOptions::new().with_error_handling(ErrorHandling::Raise);
    let err = SubRipFile::from_str_with_options(source, &options).unwrap_err();
    assert!(matches!(err, SubRipError::InvalidBlockAt { block: 2, line: 5, .. }));
}

#[test]
fn log_policy_reports_to_sink() {
    let source = "junk\n\n1\n00:00:01,000 --> 00:00:02,000\nok\n";
    let options = ParseOptions::new().with_error_handling(ErrorHandling::Log);
    let mut issues: Vec<ParseIssue> = Vec::new();
    let file = SubRipFile::from_str_with_sink(source, &options, &mut issues).unwrap();
    assert_eq!(file.len(), 1);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].block, 1);
    assert_eq!(issues[0].raw, "junk");
}

#[test]
fn from_bytes_records_encoding() {
    let mut bytes = vec![0xFF, 0xFE];
    bytes.extend(TextEncoding::Utf16Le.encode(THREE_BLOCKS).unwrap());
    let file = SubRipFile::from_bytes(&bytes, &ParseOptions::default()).unwrap();
    assert_eq!(file.len(), 3);
    assert_eq!(file.text_encoding(), TextEncoding::Utf16Le);
}

#[test]
fn from_reader_with_explicit_encoding() {
    let bytes = TextEncoding::Windows1252
        .encode("1\n00:00:01,000 --> 00:00:02,000\n\u{201C}Caf\u{E9}\u{201D}\n")
        .unwrap();
    let options = ParseOptions::new().with_encoding(TextEncoding::Windows1252);
    let file = SubRipFile::from_reader(&bytes[..], &options).unwrap();
    assert_eq!(file[0].read().text, "\u{201C}Caf\u{E9}\u{201D}");
    assert_eq!(file.text_encoding(), TextEncoding::Windows1252);

    let err = SubRipFile::from_reader(&bytes[..], &ParseOptions::default()).unwrap_err();
    assert!(matches!(err, SubRipError::Encoding { .. }));
}

#[test]
fn read_and_stream_lines() {
    let lines = THREE_BLOCKS.lines().collect::<Vec<_>>();
    let file = SubRipFile::read(lines.clone(), &ParseOptions::default()).unwrap();
    assert_eq!(file.len(), 3);

    let mut stream = SubRipFile::stream(lines, ErrorHandling::Raise);
    assert_eq!(stream.next().unwrap().unwrap().text, "One");
    assert_eq!(stream.blocks_seen(), 1);
}

#[test]
fn slice_shares_blocks() {
    let file = SubRipFile::parse_str(THREE_BLOCKS).unwrap();
    let view = file
        .slice(SliceFilter::new().starts_after((0, 0, 2, 0)))
        .unwrap();
    assert_eq!(texts(&view), vec!["Two", "Three"]);

    view[0].write().text = "Deux".to_string();
    assert_eq!(file[1].read().text, "Deux");
    assert!(view[0].ptr_eq(&file[1]));
}

#[test]
fn slice_bounds_are_strict() {
    let file = SubRipFile::parse_str(THREE_BLOCKS).unwrap();
    let exact = (0, 0, 6, 0);
    assert_eq!(file.slice(SliceFilter::new().ends_before(exact)).unwrap().len(), 1);
    assert_eq!(file.slice(SliceFilter::new().ends_after(exact)).unwrap().len(), 1);
    assert_eq!(file.slice(SliceFilter::new().starts_before("00:00:03,000")).unwrap().len(), 1);
    assert_eq!(file.slice(SliceFilter::new()).unwrap().len(), 3);
}

#[test]
fn slice_combines_bounds() {
    let file = SubRipFile::parse_str(THREE_BLOCKS).unwrap();
    let filter = SliceFilter::new()
        .starts_after((0, 0, 1, 0))
        .ends_before(crate::TimeFields::new().seconds(8));
    assert_eq!(texts(&file.slice(filter).unwrap()), vec!["Two"]);
}

#[test]
fn slice_rejects_uncoercible_bound() {
    let file = SubRipFile::parse_str(THREE_BLOCKS).unwrap();
    let err = file.slice(SliceFilter::new().ends_before("soon")).unwrap_err();
    assert!(matches!(err, SubRipError::UncoercibleValue { .. }));
}

#[test]
fn at_is_inclusive() {
    let file = SubRipFile::parse_str(THREE_BLOCKS).unwrap();
    assert_eq!(texts(&file.at((0, 0, 4, 0)).unwrap()), vec!["One", "Two"]);
    assert_eq!(texts(&file.at(1_000_i64).unwrap()), vec!["One"]);
    assert!(file.at((0, 0, 9, 0)).unwrap().is_empty());
}

#[test]
fn text_at_joins_overlapping_blocks() {
    let file = SubRipFile::parse_str(THREE_BLOCKS).unwrap();
    assert_eq!(file.text_at((0, 0, 5, 500)).unwrap().as_deref(), Some("Two\nThree"));
    assert_eq!(file.text_at((0, 0, 0, 500)).unwrap(), None);
    assert_eq!(file.text_at(-1_i64).unwrap(), None);
    assert!(file.text_at("later").is_err());
}

#[test]
fn shift_every_block() {
    let mut file = SubRipFile::parse_str(THREE_BLOCKS).unwrap();
    file.shift(&Shift::new().with_seconds(1));
    assert_eq!(file[0].read().start, (0, 0, 2, 0));
    assert_eq!(file[2].read().end, (0, 0, 9, 0));

    file.shift(&Shift::new().with_ratio(2.0));
    assert_eq!(file[0].read().start, (0, 0, 4, 0));
}

#[test]
fn clean_indexes_sorts_and_renumbers() {
    let mut file = SubRipFile::from_items([
        block(7, 5_000, 6_000, "c"),
        block(3, 1_000, 3_000, "b"),
        block(9, 1_000, 2_000, "a"),
    ]);
    file.clean_indexes();
    assert_eq!(texts(&file), vec!["a", "b", "c"]);
    let indexes: Vec<_> = file.iter().map(|h| h.read().index.clone()).collect();
    assert_eq!(
        indexes,
        vec![
            SubtitleIndex::Number(1),
            SubtitleIndex::Number(2),
            SubtitleIndex::Number(3)
        ]
    );
}

#[test]
fn remove_overlaps_truncates_previous_end() {
    let mut file = SubRipFile::parse_str(THREE_BLOCKS).unwrap();
    assert_eq!(file.remove_overlaps(), 2);
    assert_eq!(file[0].read().end, (0, 0, 3, 0));
    assert_eq!(file[1].read().end, (0, 0, 5, 0));
    assert_eq!(file[2].read().end, (0, 0, 8, 0));
    assert_eq!(file.remove_overlaps(), 0);
}

#[test]
fn remove_overlaps_single_pass_over_nested_blocks() {
    // The long block ends up adjacent only to its first successor
    let mut file = SubRipFile::from_items([
        block(1, 0, 10_000, "long"),
        block(2, 2_000, 3_000, "short"),
        block(3, 4_000, 5_000, "later"),
    ]);
    file.remove_overlaps();
    assert_eq!(file[0].read().end, SubRipTime::from_ordinal(2_000));
    assert_eq!(file[1].read().end, SubRipTime::from_ordinal(3_000));
}

#[test]
fn render_substitutes_eol_and_separates_blocks() {
    let file = SubRipFile::from_items([block(1, 1_000, 2_000, "a\nb"), block(2, 3_000, 4_000, "c")])
        .with_eol("\r\n");
    assert_eq!(
        file.render(),
        "1\r\n00:00:01,000 --> 00:00:02,000\r\na\r\nb\r\n\r\n\
         2\r\n00:00:03,000 --> 00:00:04,000\r\nc\r\n\r\n"
    );
    assert_eq!(file.to_string(), file.render());
}

#[test]
fn render_matches_every_text_sink() {
    let file = SubRipFile::from_items([block(1, 1_000, 2_000, "a"), block(2, 3_000, 4_000, "b")])
        .with_eol("\r\n");
    let mut via_sink = String::new();
    file.render_to(&mut via_sink).unwrap();
    let mut via_eol = String::new();
    file.render_with(&mut via_eol, "\r\n").unwrap();
    assert_eq!(file.render(), via_sink);
    assert_eq!(file.render(), via_eol);
    assert!(SubRipFile::new().render().is_empty());
}

#[test]
fn render_does_not_double_blank_line_for_empty_text() {
    let file = SubRipFile::from_items([block(1, 0, 1_000, "")]).with_eol("\n");
    assert_eq!(file.render(), "1\n00:00:00,000 --> 00:00:01,000\n\n");
}

#[test]
fn render_round_trips() {
    let file = SubRipFile::parse_str(THREE_BLOCKS).unwrap().with_eol("\n");
    let reparsed = SubRipFile::parse_str(&file.render()).unwrap();
    assert_eq!(reparsed.snapshot(), file.snapshot());
}

#[test]
fn write_to_encodes_with_mark() {
    let file = SubRipFile::from_items([block(1, 0, 1_000, "é")]);
    let mut out = Vec::new();
    file.write_to(&mut out, TextEncoding::Utf16Be, "\n").unwrap();
    assert!(out.starts_with(&[0xFE, 0xFF]));
    let back = SubRipFile::from_bytes(&out, &ParseOptions::default()).unwrap();
    assert_eq!(back.snapshot(), file.snapshot());

    let mut plain = Vec::new();
    file.write_to(&mut plain, TextEncoding::Utf8, "\n").unwrap();
    assert!(plain.starts_with(b"1\n"));

    let err = file.write_to(Vec::<u8>::new(), TextEncoding::Ascii, "\n").unwrap_err();
    assert!(matches!(err, SubRipError::Encoding { .. }));
}

#[test]
fn clone_aliases_deep_clone_copies() {
    let file = SubRipFile::parse_str(THREE_BLOCKS).unwrap();
    let alias = file.clone();
    let copy = file.deep_clone();
    file[0].write().text = "edited".to_string();
    assert_eq!(alias[0].read().text, "edited");
    assert_eq!(copy[0].read().text, "One");
    assert_eq!(copy.eol(), file.eol());
}

#[test]
fn list_operations() {
    let mut file = SubRipFile::new();
    assert!(file.is_empty());
    file.push(block(1, 0, 1_000, "first"));
    file.insert(0, block(0, 0, 500, "zeroth"));
    file.insert(99, block(2, 2_000, 3_000, "last"));
    file.extend([block(3, 4_000, 5_000, "extra")]);
    assert_eq!(texts(&file), vec!["zeroth", "first", "last", "extra"]);

    let removed = file.remove(1).unwrap();
    assert_eq!(removed.read().text, "first");
    assert!(file.remove(10).is_none());
    assert_eq!(file.len(), 3);
    assert!(file.get(3).is_none());

    let shared = file[0].clone();
    file.push(shared);
    assert!(file[0].ptr_eq(&file[3]));

    let handles: SubRipFile = file.clone().into_iter().collect();
    assert_eq!(handles.len(), 4);
    assert_eq!((&handles).into_iter().count(), 4);
}
