use serde::Serialize;

use crate::types::{ArtistStats, SongStats, Stats};
use crate::utils::{
    NumberFormatOptions, format_duration_ms, format_number, format_timestamp_for_display,
    month_name,
};
use crate::wrapped::{WrappedBucket, WrappedStats};

/// Everything the `stats` subcommand serializes to JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub stats: Option<Stats>,
    pub top_artists: Vec<ArtistStats>,
    pub top_songs: Vec<SongStats>,
    pub wrapped: WrappedStats,
}

pub fn print_summary(stats: &Stats, options: &NumberFormatOptions) {
    println!("Summary");
    println!(
        "  Streams:         {}",
        format_number(stats.playback_data_count, options)
    );
    println!(
        "  Time played:     {}",
        format_duration_ms((stats.total_seconds_played * 1000.0) as u64)
    );
    println!(
        "  Unique artists:  {}",
        format_number(stats.unique_artists, options)
    );
    println!(
        "  Unique songs:    {}",
        format_number(stats.unique_songs, options)
    );
    println!(
        "  First stream:    {}",
        format_timestamp_for_display(&stats.earliest_entry)
    );
    println!(
        "  Last stream:     {}",
        format_timestamp_for_display(&stats.latest_entry)
    );
}

pub fn print_top_artists(artists: &[ArtistStats], options: &NumberFormatOptions) {
    println!("Top Artists");
    for (index, artist) in artists.iter().enumerate() {
        println!(
            "  {:>3}. {:<40} {:>8} streams  {:>10}",
            index + 1,
            artist.name,
            format_number(artist.count, options),
            format_duration_ms(artist.ms_played)
        );
    }
}

pub fn print_top_songs(songs: &[SongStats], options: &NumberFormatOptions) {
    println!("Top Songs");
    for (index, song) in songs.iter().enumerate() {
        println!(
            "  {:>3}. {:<40} {:<25} {:>8} streams  {:>10}",
            index + 1,
            song.name,
            song.artist,
            format_number(song.count, options),
            format_duration_ms(song.ms_played)
        );
    }
}

fn print_bucket(bucket: &WrappedBucket, options: &NumberFormatOptions) {
    println!(
        "    {} streams, {} played",
        format_number(bucket.total_streams, options),
        format_duration_ms(bucket.total_played_ms)
    );
    for (index, artist) in bucket.top_artists.iter().enumerate() {
        println!(
            "      Artist #{}: {} ({} streams)",
            index + 1,
            artist.name,
            format_number(artist.count, options)
        );
    }
    for (index, song) in bucket.top_songs.iter().enumerate() {
        println!(
            "      Song #{}: {} by {} ({} streams)",
            index + 1,
            song.name,
            song.artist,
            format_number(song.count, options)
        );
    }
}

/// Prints the wrapped summaries, optionally restricted to one year.
pub fn print_wrapped(wrapped: &WrappedStats, year: Option<i32>, options: &NumberFormatOptions) {
    for (bucket_year, bucket) in &wrapped.by_year {
        if year.is_some_and(|y| y != *bucket_year) {
            continue;
        }

        println!("{bucket_year} Wrapped");
        print_bucket(bucket, options);

        if let Some(months) = wrapped.by_month.get(bucket_year) {
            for (month, month_bucket) in months {
                println!("  {} {}", month_name(*month), bucket_year);
                print_bucket(month_bucket, options);
            }
        }
        println!();
    }
}
