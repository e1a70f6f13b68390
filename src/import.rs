use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::PlaybackEvent;

// STREAMING HISTORY EXPORT SCHEMA
//
// Each export file is one JSON array of these records. Music entries carry
// the `master_metadata_*`/`spotify_track_uri` fields; podcast entries carry
// the `episode`/`spotify_episode_uri` pair instead, with the music fields
// null. Unknown fields are ignored.

#[derive(Debug, Clone, Deserialize)]
struct RawStreamingEntry {
    ts: String,
    #[serde(default)]
    ms_played: u64,
    master_metadata_track_name: Option<String>,
    master_metadata_album_artist_name: Option<String>,
    spotify_track_uri: Option<String>,
    spotify_episode_uri: Option<String>,
}

// END OF SCHEMA

impl RawStreamingEntry {
    /// Normalizes one raw record. Returns `None` for records that identify
    /// neither a track nor an episode, or whose timestamp does not parse --
    /// those are dropped at this boundary rather than crashing aggregation.
    fn into_event(self) -> Option<PlaybackEvent> {
        let ts = DateTime::parse_from_rfc3339(&self.ts)
            .ok()?
            .with_timezone(&Utc);
        let track_uri = self.spotify_track_uri.or(self.spotify_episode_uri)?;

        Some(PlaybackEvent {
            ts,
            ms_played: self.ms_played,
            track_uri,
            track_name: self.master_metadata_track_name,
            // Podcast entries have no album artist; the null marks them as
            // non-qualifying for artist/song aggregation.
            artist_name: self.master_metadata_album_artist_name,
        })
    }
}

/// Parses one export file into normalized events.
pub fn parse_history_file(path: &Path) -> Result<Vec<PlaybackEvent>> {
    let mut bytes = fs::read(path)
        .with_context(|| format!("Failed to read history file: {}", path.display()))?;

    let entries: Vec<RawStreamingEntry> = simd_json::from_slice(&mut bytes)
        .with_context(|| format!("Failed to parse history file: {}", path.display()))?;

    Ok(entries
        .into_iter()
        .filter_map(RawStreamingEntry::into_event)
        .collect())
}

/// Finds export files under `dir` by their conventional names
/// (`Streaming_History_Audio_*.json` from current exports, `endsong_*.json`
/// from older ones).
pub fn discover_history_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in ["Streaming_History_Audio_*.json", "endsong_*.json"] {
        for entry in glob::glob(&format!("{}/{}", dir.display(), pattern))? {
            files.push(entry?);
        }
    }
    files.sort();
    Ok(files)
}

/// Loads and concatenates all given export files, parsing them in parallel.
/// Each file is independent, so results are concatenated, never merged. A
/// file that fails to read or parse is reported and skipped; the rest of the
/// import still succeeds.
pub fn load_history(paths: &[PathBuf]) -> Vec<PlaybackEvent> {
    paths
        .par_iter()
        .flat_map(|path| match parse_history_file(path) {
            Ok(events) => events,
            Err(e) => {
                eprintln!("⚠️  Skipping {}: {e:#}", path.display());
                Vec::new()
            }
        })
        .collect()
}
