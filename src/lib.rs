//! Listening-history analytics: ingests streaming-history export files and
//! derives per-artist, per-song, time-bucketed, and headline statistics.

pub mod analysis;
pub mod config;
pub mod filter;
pub mod generator;
pub mod import;
pub mod report;
pub mod types;
pub mod utils;
pub mod wrapped;
