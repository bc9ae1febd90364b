//! Benchmarks for SubRip parsing, rendering and merging
//!
//! Generates synthetic tracks programmatically so no fixture files are
//! needed.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::fmt::Write;
use subrip_core::{merge_tracks, ErrorHandling, MergeOptions, ParseOptions, SubRipFile, SubRipTime};

/// Build a track of `blocks` two-line blocks, `offset_ms` apart from the default grid
fn generate_track(blocks: usize, offset_ms: i64) -> String {
    let mut out = String::with_capacity(blocks * 64);
    for i in 0..blocks {
        let start = SubRipTime::from_ordinal(i as i64 * 2_500 + offset_ms);
        let end = SubRipTime::from_ordinal(i as i64 * 2_500 + offset_ms + 2_000);
        let _ = write!(
            out,
            "{}\n{start} --> {end}\nLine {i} of the track\nsecond line\n\n",
            i + 1
        );
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for blocks in [100, 1_000, 10_000] {
        let source = generate_track(blocks, 0);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("eager", blocks), &source, |b, source| {
            b.iter(|| SubRipFile::parse_str(black_box(source)));
        });
        group.bench_with_input(BenchmarkId::new("raise", blocks), &source, |b, source| {
            let options = ParseOptions::new().with_error_handling(ErrorHandling::Raise);
            b.iter(|| SubRipFile::from_str_with_options(black_box(source), &options));
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let file = SubRipFile::parse_str(&generate_track(1_000, 0))
        .expect("generated track parses")
        .with_eol("\r\n");
    c.bench_function("render_1000", |b| b.iter(|| black_box(&file).render()));
}

fn bench_timeline(c: &mut Criterion) {
    let source = generate_track(1_000, 0);
    c.bench_function("remove_overlaps_1000", |b| {
        b.iter_batched(
            || SubRipFile::parse_str(&source).expect("generated track parses"),
            |mut file| file.remove_overlaps(),
            criterion::BatchSize::SmallInput,
        );
    });

    let a = SubRipFile::parse_str(&source).expect("generated track parses");
    let b = SubRipFile::parse_str(&generate_track(1_000, 1_200)).expect("generated track parses");
    c.bench_function("merge_1000x1000", |bench| {
        bench.iter(|| merge_tracks(black_box(&a), black_box(&b), &MergeOptions::default()));
    });
}

criterion_group!(benches, bench_parse, bench_render, bench_timeline);
criterion_main!(benches);
