//! Total order over sessions: canonical date first, then minute of day.
//!
//! Every table and list the consumers render is sorted through here, so the
//! order is a contract: comparisons are string/integer only (no locale, no
//! overflow) and all sorts are stable, so equal keys keep their input order.

use crate::session::{EVENING_TAG, MORNING_TAG, Session};

/// Re-order a canonical `dd-mm-yyyy` date into a zero-padded `yyyy-mm-dd`
/// key for lexicographic comparison. An unparseable date falls back to the
/// raw string so the order stays total and deterministic.
pub fn date_sort_key(date: &str) -> String {
    let mut parts = date.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(day), Some(month), Some(year))
            if is_numeric(day) && is_numeric(month) && is_numeric(year) =>
        {
            format!("{year:0>4}-{month:0>2}-{day:0>2}")
        }
        _ => date.to_owned(),
    }
}

/// Convert a 12-hour `HH:MM` plus period tag into the minute of day.
///
/// The evening tag maps hour 12 to itself and every other hour +12; the
/// morning tag maps hour 12 to 0 and leaves the rest alone. For canonical
/// input the result is in [0, 1439]. Malformed times sort first, as 0.
pub fn minute_of_day(time: &str, period: &str) -> u32 {
    let Some((raw_hours, raw_minutes)) = time.split_once(':') else {
        return 0;
    };
    let Ok(mut hours) = raw_hours.trim().parse::<u32>() else {
        return 0;
    };
    let minutes = raw_minutes.trim().parse::<u32>().unwrap_or(0);

    if period == EVENING_TAG && hours != 12 {
        hours += 12;
    }
    if period == MORNING_TAG && hours == 12 {
        hours = 0;
    }
    hours * 60 + minutes
}

/// Stable sort by date, then time of day.
pub fn sort_sessions(sessions: &mut [&Session]) {
    sessions.sort_by_key(|s| (date_sort_key(&s.date), minute_of_day(&s.time, &s.period)));
}

/// Stable sort by time of day only, for lists confined to a single date.
pub fn sort_sessions_by_time(sessions: &mut [&Session]) {
    sessions.sort_by_key(|s| minute_of_day(&s.time, &s.period));
}

fn is_numeric(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}
