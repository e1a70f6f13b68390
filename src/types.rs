use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One record of a single listen, already normalized by the import boundary.
///
/// `artist_name` is `None` for non-music entries (podcast episodes). Those
/// events never contribute to artist- or song-keyed aggregates, but they do
/// count toward raw summary and bucket totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackEvent {
    pub ts: DateTime<Utc>,
    pub ms_played: u64,
    /// Stable identifier for the played item. For music this is the track
    /// URI; podcast episodes carry their episode URI here.
    pub track_uri: String,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
}

impl PlaybackEvent {
    /// Whether this event is eligible for artist/song aggregation.
    pub fn is_qualifying(&self) -> bool {
        self.artist_name.is_some()
    }
}

/// Per-artist rollup over a set of qualifying events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistStats {
    pub name: String,
    pub count: u64,
    pub ms_played: u64,
    pub first_stream: DateTime<Utc>,
    pub last_stream: DateTime<Utc>,
}

/// Per-track rollup, keyed by track URI. `name` and `artist` are resolved
/// from the most recently played event in the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongStats {
    pub name: String,
    pub artist: String,
    pub count: u64,
    pub ms_played: u64,
    pub first_stream: DateTime<Utc>,
    pub last_stream: DateTime<Utc>,
}

/// Headline numbers over a (possibly filtered) event array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub playback_data_count: u64,
    pub earliest_entry: DateTime<Utc>,
    pub latest_entry: DateTime<Utc>,
    pub unique_artists: u64,
    pub unique_songs: u64,
    pub total_seconds_played: f64,
}

/// Result of the single-pass distinct-entity count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniqueCounts {
    pub unique_artist_count: u64,
    pub unique_song_count: u64,
}

/// Ranking key for top-artist/top-song lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Number of streams.
    #[default]
    Count,
    /// Total listening time.
    MsPlayed,
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            Self::Count => "streams",
            Self::MsPlayed => "listening time",
        }
    }
}
