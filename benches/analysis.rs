//! Benchmarks for the aggregation engine.
//!
//! The uniqueness counter once shipped as a linear-membership scan over
//! growing arrays (O(n·u)); the hash-set version replaced it. Both are
//! measured here so the complexity gap stays documented; only the hash-set
//! version is production code.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use rewind::analysis::{aggregate_by_artist, aggregate_by_song, count_unique_artists_and_songs};
use rewind::generator::generate_events;
use rewind::types::{PlaybackEvent, UniqueCounts};

const SAMPLE_SIZES: &[usize] = &[1_000, 10_000, 50_000];

/// The retired linear-scan strategy, kept solely as the benchmark baseline.
fn count_unique_naive(events: &[PlaybackEvent]) -> UniqueCounts {
    let mut artists: Vec<&str> = Vec::new();
    let mut songs: Vec<&str> = Vec::new();

    for event in events {
        if let Some(artist) = event.artist_name.as_deref() {
            if !artists.contains(&artist) {
                artists.push(artist);
            }
        }
        let uri = event.track_uri.as_str();
        if !songs.contains(&uri) {
            songs.push(uri);
        }
    }

    UniqueCounts {
        unique_artist_count: artists.len() as u64,
        unique_song_count: songs.len() as u64,
    }
}

fn bench_unique_counting(c: &mut Criterion) {
    let mut group = c.benchmark_group("unique_counting");

    for &size in SAMPLE_SIZES {
        let events = generate_events(size, 42);

        // Both strategies must agree before their timings mean anything.
        assert_eq!(count_unique_naive(&events), count_unique_artists_and_songs(&events));

        group.bench_with_input(
            BenchmarkId::new("naive_linear_scan", size),
            &events,
            |b, events| b.iter(|| count_unique_naive(black_box(events))),
        );

        group.bench_with_input(
            BenchmarkId::new("hash_set", size),
            &events,
            |b, events| b.iter(|| count_unique_artists_and_songs(black_box(events))),
        );
    }

    group.finish();
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for &size in SAMPLE_SIZES {
        let events = generate_events(size, 42);

        group.bench_with_input(
            BenchmarkId::new("by_artist", size),
            &events,
            |b, events| b.iter(|| aggregate_by_artist(black_box(events))),
        );

        group.bench_with_input(BenchmarkId::new("by_song", size), &events, |b, events| {
            b.iter(|| aggregate_by_song(black_box(events)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_unique_counting, bench_aggregation);
criterion_main!(benches);
