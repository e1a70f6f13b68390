use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PlaybackEvent;

const ARTISTS: &[&str] = &[
    "The Velvet Antennas",
    "Marla Quinn",
    "Glass Harbor",
    "DJ Okonkwo",
    "Paper Lanterns",
    "Sora Fields",
    "The Borrowed Suns",
    "Ida & The Frost",
    "Neon Cartography",
    "Old Pine Choir",
    "Ruby Static",
    "Hollow Creek",
];

const TRACKS: &[&str] = &[
    "Night Ferry",
    "Second Balcony",
    "Copper Wire",
    "Slow Parade",
    "Marigold",
    "Last Transmission",
    "Harbor Lights",
    "Winter Arithmetic",
    "Stray Signal",
    "Palomino",
    "Glasshouse",
    "Afterglow",
    "Dune Letters",
    "Telescope Heart",
];

const EPISODES: &[&str] = &[
    "Why Bridges Hum",
    "A History of Static",
    "Interview: The Archivist",
    "Night Shift Stories",
];

const TEN_YEARS_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

/// Share of generated events that are podcast entries (null artist).
const PODCAST_PERCENT: u64 = 5;

/// Generates a reproducible stream of synthetic playback events for demos,
/// tests, and benchmarks: random artist/track pairs from a fixed pool,
/// durations between 200 ms and 5 minutes, timestamps within the last ten
/// years, and a small share of podcast entries.
pub fn generate_events(count: usize, seed: u64) -> Vec<PlaybackEvent> {
    let mut rng = StdRng::seed_from_u64(seed);
    let now = Utc::now();

    (0..count)
        .map(|_| {
            let ts = now - Duration::seconds(rng.random_range(0..TEN_YEARS_SECONDS));
            let ms_played = rng.random_range(200..300_000);

            if rng.random_range(0..100) < PODCAST_PERCENT {
                let episode = EPISODES[rng.random_range(0..EPISODES.len())];
                PlaybackEvent {
                    ts,
                    ms_played,
                    track_uri: format!("synthetic:episode:{episode}"),
                    track_name: None,
                    artist_name: None,
                }
            } else {
                let artist = ARTISTS[rng.random_range(0..ARTISTS.len())];
                let track = TRACKS[rng.random_range(0..TRACKS.len())];
                PlaybackEvent {
                    ts,
                    ms_played,
                    track_uri: format!("synthetic:track:{track}_{artist}"),
                    track_name: Some(track.to_owned()),
                    artist_name: Some(artist.to_owned()),
                }
            }
        })
        .collect()
}
