use chrono::{DateTime, Utc};
use num_format::{Locale, ToFormattedString};

#[derive(Debug, Clone)]
pub struct NumberFormatOptions {
    pub use_comma: bool,
    pub use_human: bool,
    pub locale: String,
    pub decimal_places: usize,
}

impl Default for NumberFormatOptions {
    fn default() -> Self {
        Self {
            use_comma: false,
            use_human: false,
            locale: "en".to_string(),
            decimal_places: 1,
        }
    }
}

/// Format a count for display. Accepts both u32 and u64.
pub fn format_number(n: impl Into<u64>, options: &NumberFormatOptions) -> String {
    let n: u64 = n.into();
    let locale = match options.locale.as_str() {
        "de" => Locale::de,
        "fr" => Locale::fr,
        "es" => Locale::es,
        "ja" => Locale::ja,
        _ => Locale::en,
    };

    if options.use_human {
        if n >= 1_000_000_000 {
            format!(
                "{:.prec$}b",
                n as f64 / 1_000_000_000.0,
                prec = options.decimal_places
            )
        } else if n >= 1_000_000 {
            format!(
                "{:.prec$}m",
                n as f64 / 1_000_000.0,
                prec = options.decimal_places
            )
        } else if n >= 1_000 {
            format!("{:.prec$}k", n as f64 / 1_000.0, prec = options.decimal_places)
        } else {
            n.to_string()
        }
    } else if options.use_comma {
        n.to_formatted_string(&locale)
    } else {
        n.to_string()
    }
}

/// Renders a played duration as the largest useful units, e.g. "3d 4h 12m",
/// "4h 12m", "12m 5s". Sub-second durations render as "0s".
pub fn format_duration_ms(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

/// Compact timestamp for report rows, e.g. "01/15/2023 14:32".
pub fn format_timestamp_for_display(ts: &DateTime<Utc>) -> String {
    ts.format("%m/%d/%Y %H:%M").to_string()
}

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Display name for a 1-based calendar month.
pub fn month_name(month: u32) -> &'static str {
    match month {
        1..=12 => MONTH_NAMES[(month - 1) as usize],
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests;
