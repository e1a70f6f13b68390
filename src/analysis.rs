use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::types::{ArtistStats, PlaybackEvent, SongStats, SortKey, Stats, UniqueCounts};

/// Smallest element of a sequence in one linear pass. `None` on empty input.
pub fn minimum_of<T, I>(xs: I) -> Option<T>
where
    T: PartialOrd,
    I: IntoIterator<Item = T>,
{
    xs.into_iter()
        .fold(None, |min, x| match min {
            Some(m) if m <= x => Some(m),
            _ => Some(x),
        })
}

/// Largest element of a sequence in one linear pass. `None` on empty input.
pub fn maximum_of<T, I>(xs: I) -> Option<T>
where
    T: PartialOrd,
    I: IntoIterator<Item = T>,
{
    xs.into_iter()
        .fold(None, |max, x| match max {
            Some(m) if m >= x => Some(m),
            _ => Some(x),
        })
}

/// Counts distinct artists and distinct tracks in a single pass.
///
/// Artists without a name (podcast entries) are ignored; track URIs are
/// counted regardless of artist presence. O(n) time, O(u) space for u unique
/// keys.
pub fn count_unique_artists_and_songs(events: &[PlaybackEvent]) -> UniqueCounts {
    let mut artists: HashSet<&str> = HashSet::new();
    let mut songs: HashSet<&str> = HashSet::new();

    for event in events {
        if let Some(artist) = event.artist_name.as_deref() {
            artists.insert(artist);
        }
        songs.insert(event.track_uri.as_str());
    }

    UniqueCounts {
        unique_artist_count: artists.len() as u64,
        unique_song_count: songs.len() as u64,
    }
}

struct ArtistAccum {
    count: u64,
    ms_played: u64,
    first_stream: DateTime<Utc>,
    last_stream: DateTime<Utc>,
}

/// Groups qualifying events by artist name.
///
/// Output order is unspecified (hash map iteration); callers rank with
/// [`sort_artist_stats`].
pub fn aggregate_by_artist<'a, I>(events: I) -> Vec<ArtistStats>
where
    I: IntoIterator<Item = &'a PlaybackEvent>,
{
    let mut groups: HashMap<&str, ArtistAccum> = HashMap::new();

    for event in events {
        let Some(artist) = event.artist_name.as_deref() else {
            continue;
        };

        let acc = groups.entry(artist).or_insert_with(|| ArtistAccum {
            count: 0,
            ms_played: 0,
            first_stream: event.ts,
            last_stream: event.ts,
        });
        acc.count += 1;
        acc.ms_played += event.ms_played;
        acc.first_stream = acc.first_stream.min(event.ts);
        acc.last_stream = acc.last_stream.max(event.ts);
    }

    groups
        .into_iter()
        .map(|(name, acc)| ArtistStats {
            name: name.to_owned(),
            count: acc.count,
            ms_played: acc.ms_played,
            first_stream: acc.first_stream,
            last_stream: acc.last_stream,
        })
        .collect()
}

struct SongAccum<'a> {
    name: Option<&'a str>,
    artist: &'a str,
    count: u64,
    ms_played: u64,
    first_stream: DateTime<Utc>,
    last_stream: DateTime<Utc>,
}

/// Groups qualifying events by track URI.
///
/// A URI can appear with differing display names across an export (remasters,
/// metadata fixes). The resolved `name`/`artist` come from the event with the
/// latest timestamp in the group; equal timestamps resolve to the later
/// processed event. Output order is unspecified; callers rank with
/// [`sort_song_stats`].
pub fn aggregate_by_song<'a, I>(events: I) -> Vec<SongStats>
where
    I: IntoIterator<Item = &'a PlaybackEvent>,
{
    let mut groups: HashMap<&str, SongAccum<'_>> = HashMap::new();

    for event in events {
        let Some(artist) = event.artist_name.as_deref() else {
            continue;
        };

        let acc = groups
            .entry(event.track_uri.as_str())
            .or_insert_with(|| SongAccum {
                name: None,
                artist,
                count: 0,
                ms_played: 0,
                first_stream: event.ts,
                last_stream: event.ts,
            });
        if event.ts >= acc.last_stream {
            acc.name = event.track_name.as_deref();
            acc.artist = artist;
        }
        acc.count += 1;
        acc.ms_played += event.ms_played;
        acc.first_stream = acc.first_stream.min(event.ts);
        acc.last_stream = acc.last_stream.max(event.ts);
    }

    groups
        .into_values()
        .map(|acc| SongStats {
            name: acc.name.unwrap_or_default().to_owned(),
            artist: acc.artist.to_owned(),
            count: acc.count,
            ms_played: acc.ms_played,
            first_stream: acc.first_stream,
            last_stream: acc.last_stream,
        })
        .collect()
}

/// Sorts artist rollups descending by the given key. The sort is stable, so
/// equal keys keep their prior relative order and `rank = index + 1` is
/// deterministic for a deterministic input order.
pub fn sort_artist_stats(stats: &mut [ArtistStats], key: SortKey) {
    match key {
        SortKey::Count => stats.sort_by(|a, b| b.count.cmp(&a.count)),
        SortKey::MsPlayed => stats.sort_by(|a, b| b.ms_played.cmp(&a.ms_played)),
    }
}

/// Sorts song rollups descending by the given key (stable, see
/// [`sort_artist_stats`]).
pub fn sort_song_stats(stats: &mut [SongStats], key: SortKey) {
    match key {
        SortKey::Count => stats.sort_by(|a, b| b.count.cmp(&a.count)),
        SortKey::MsPlayed => stats.sort_by(|a, b| b.ms_played.cmp(&a.ms_played)),
    }
}

/// Headline statistics over a (possibly filtered) event array.
///
/// Returns `None` for an empty input so callers can tell "no data" apart from
/// a legitimate all-zero result. Totals cover ALL events, including those
/// without an artist.
pub fn summarize(events: &[PlaybackEvent]) -> Option<Stats> {
    if events.is_empty() {
        return None;
    }

    let unique = count_unique_artists_and_songs(events);
    let earliest = minimum_of(events.iter().map(|e| e.ts))?;
    let latest = maximum_of(events.iter().map(|e| e.ts))?;
    let total_ms: u64 = events.iter().map(|e| e.ms_played).sum();

    Some(Stats {
        playback_data_count: events.len() as u64,
        earliest_entry: earliest,
        latest_entry: latest,
        unique_artists: unique.unique_artist_count,
        unique_songs: unique.unique_song_count,
        total_seconds_played: total_ms as f64 / 1000.0,
    })
}
