// Day-Index Resolver
//
// Selects which of the 30 rotating messages to show: whole days elapsed
// since the stored start date, modulo 30. The index is derived on demand
// and never stored.
//
// Missing, unparseable, or future start dates all resolve to day 0.

use crate::types::MESSAGE_CYCLE;
use chrono::{DateTime, Local, NaiveDateTime};

// Matches the UI's ISO-like timestamps, with or without fractional seconds
const START_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Resolve the day index in [0, 29] for the given instant
pub fn resolve_day_index(start_date: Option<&str>, now: DateTime<Local>) -> u32 {
    let Some(raw) = start_date else {
        return 0;
    };

    let start = match NaiveDateTime::parse_from_str(raw, START_DATE_FORMAT) {
        Ok(start) => start,
        Err(e) => {
            eprintln!("[Rotation] Unparseable start date '{}', using day 0: {}", raw, e);
            return 0;
        }
    };

    let days_elapsed = (now.naive_local() - start).num_days();
    if days_elapsed < 0 {
        eprintln!("[Rotation] Start date '{}' is in the future, using day 0", raw);
        return 0;
    }

    (days_elapsed % MESSAGE_CYCLE) as u32
}
