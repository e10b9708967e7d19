// Fire-Time Computation
//
// Pure wall-clock math for the daily trigger. Seconds are always zeroed.
// Targets that fall in a DST gap have no local representation and yield None.

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone};

/// Local instant for the given date at hour:minute:00
pub fn at_wall_time(date: NaiveDate, hour: u32, minute: u32) -> Option<DateTime<Local>> {
    let naive = date.and_hms_opt(hour, minute, 0)?;
    Local.from_local_datetime(&naive).earliest()
}

/// Next occurrence of hour:minute — today if still strictly in the future,
/// otherwise tomorrow
pub fn next_occurrence(now: DateTime<Local>, hour: u32, minute: u32) -> Option<DateTime<Local>> {
    if hour > 23 || minute > 59 {
        return None;
    }

    match at_wall_time(now.date_naive(), hour, minute) {
        Some(today) if today > now => Some(today),
        _ => tomorrow_at(now, hour, minute),
    }
}

/// Tomorrow's date at hour:minute:00
pub fn tomorrow_at(now: DateTime<Local>, hour: u32, minute: u32) -> Option<DateTime<Local>> {
    if hour > 23 || minute > 59 {
        return None;
    }

    let tomorrow = now.date_naive().checked_add_days(Days::new(1))?;
    at_wall_time(tomorrow, hour, minute)
}
