use std::collections::BTreeMap;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::analysis::{
    aggregate_by_artist, aggregate_by_song, sort_artist_stats, sort_song_stats,
};
use crate::types::{ArtistStats, PlaybackEvent, SongStats, SortKey};

/// How many entries each top list keeps, and which key ranks them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WrappedOptions {
    pub top_n: usize,
    pub sort: SortKey,
}

impl Default for WrappedOptions {
    fn default() -> Self {
        Self {
            top_n: 5,
            sort: SortKey::default(),
        }
    }
}

/// Top-N snapshot for one time bucket (a month, or a whole year).
///
/// `total_streams` and `total_played_ms` cover every event in the bucket,
/// including null-artist entries that the top lists exclude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedBucket {
    pub top_artists: Vec<ArtistStats>,
    pub top_songs: Vec<SongStats>,
    pub total_streams: u64,
    pub total_played_ms: u64,
}

/// Wrapped summaries for every (year, month) bucket and every year.
///
/// Month keys are calendar months, 1–12. That 1-based numbering is part of
/// the API contract: an off-by-one here would silently mislabel every
/// monthly bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WrappedStats {
    pub by_month: BTreeMap<i32, BTreeMap<u32, WrappedBucket>>,
    pub by_year: BTreeMap<i32, WrappedBucket>,
}

fn build_bucket(events: &[&PlaybackEvent], options: &WrappedOptions) -> WrappedBucket {
    let mut top_artists = aggregate_by_artist(events.iter().copied());
    sort_artist_stats(&mut top_artists, options.sort);
    top_artists.truncate(options.top_n);

    let mut top_songs = aggregate_by_song(events.iter().copied());
    sort_song_stats(&mut top_songs, options.sort);
    top_songs.truncate(options.top_n);

    WrappedBucket {
        top_artists,
        top_songs,
        total_streams: events.len() as u64,
        total_played_ms: events.iter().map(|e| e.ms_played).sum(),
    }
}

/// Partitions events into (year, month) buckets in one pass, then derives a
/// [`WrappedBucket`] per month and per year. Every event lands in exactly one
/// monthly bucket, so the bucket stream totals sum back to the input length.
pub fn build_wrapped(events: &[PlaybackEvent], options: &WrappedOptions) -> WrappedStats {
    let mut clustered: BTreeMap<i32, BTreeMap<u32, Vec<&PlaybackEvent>>> = BTreeMap::new();
    for event in events {
        clustered
            .entry(event.ts.year())
            .or_default()
            .entry(event.ts.month())
            .or_default()
            .push(event);
    }

    let mut by_month: BTreeMap<i32, BTreeMap<u32, WrappedBucket>> = BTreeMap::new();
    let mut by_year: BTreeMap<i32, WrappedBucket> = BTreeMap::new();

    for (year, months) in &clustered {
        let year_events: Vec<&PlaybackEvent> =
            months.values().flat_map(|bucket| bucket.iter().copied()).collect();
        by_year.insert(*year, build_bucket(&year_events, options));

        let month_buckets = by_month.entry(*year).or_default();
        for (month, bucket_events) in months {
            month_buckets.insert(*month, build_bucket(bucket_events, options));
        }
    }

    WrappedStats { by_month, by_year }
}
