use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::PlaybackEvent;

/// Criteria for the single filtering pass that runs before any aggregation.
///
/// `min_duration_ms` is an inclusive lower bound on `ms_played`; `from`/`to`
/// are inclusive bounds on the event timestamp. Whichever bounds are absent
/// are simply not checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub min_duration_ms: u64,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl FilterCriteria {
    /// Builds the combined predicate. Both date bounds are inclusive; a
    /// date-only upper bound should be extended with [`end_of_day`] before it
    /// gets here.
    pub fn build(&self) -> impl Fn(&PlaybackEvent) -> bool + '_ {
        move |event| {
            event.ms_played >= self.min_duration_ms
                && self.from.is_none_or(|from| event.ts >= from)
                && self.to.is_none_or(|to| event.ts <= to)
        }
    }

    /// Applies the predicate once, producing the filtered array every
    /// downstream aggregator shares.
    pub fn apply(&self, events: &[PlaybackEvent]) -> Vec<PlaybackEvent> {
        let accept = self.build();
        events.iter().filter(|e| accept(e)).cloned().collect()
    }
}

/// Last representable second of the given day, for turning a date-only upper
/// bound into an inclusive timestamp bound.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(23, 59, 59)
        .expect("23:59:59 is a valid time")
        .and_utc()
}
