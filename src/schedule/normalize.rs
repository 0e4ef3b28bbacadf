//! Rewrites raw spreadsheet date/time stamps into the canonical display form.
//!
//! The sheet serializes every date and time cell as an ISO-like stamp
//! (`1446-03-10T09:30:00.000Z`). Canonical form is what the rest of the
//! engine keys on: dates as zero-padded Hijri `dd-mm-yyyy`, times as
//! zero-padded 12-hour `HH:MM` with a two-valued period tag. Anything that
//! does not look like a stamp passes through untouched, so normalization is
//! idempotent and a malformed cell never takes down the batch.

use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use crate::session::{EVENING_TAG, MORNING_TAG, Session};

static STAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,4})-(\d{1,2})-(\d{1,2})T(\d{1,2}):(\d{1,2})").expect("stamp pattern")
});

/// Canonicalize a raw date cell. Stamps become `dd-mm-yyyy`; everything else
/// (including an already-canonical date) is returned unchanged.
pub fn normalize_date(raw: &str) -> String {
    if !raw.contains('T') {
        return raw.to_owned();
    }
    match STAMP.captures(raw) {
        Some(parts) => format!("{:0>2}-{:0>2}-{:0>4}", &parts[3], &parts[2], &parts[1]),
        None => {
            warn!(value = raw, "date stamp did not match the expected shape");
            raw.to_owned()
        }
    }
}

/// Canonicalize a raw time cell. Stamps become a 12-hour `HH:MM` plus the
/// derived period tag; anything else is passed through with no tag.
pub fn normalize_time(raw: &str) -> Option<(String, String)> {
    if !raw.contains('T') {
        return None;
    }
    let parts = match STAMP.captures(raw) {
        Some(parts) => parts,
        None => {
            warn!(value = raw, "time stamp did not match the expected shape");
            return None;
        }
    };
    // One or two digits by construction, so the parses cannot fail.
    let hours: u32 = parts[4].parse().ok()?;
    let minutes: u32 = parts[5].parse().ok()?;

    let tag = if hours >= 12 { EVENING_TAG } else { MORNING_TAG };
    let display_hours = match hours % 12 {
        0 => 12,
        h => h,
    };
    Some((format!("{display_hours:0>2}:{minutes:0>2}"), tag.to_owned()))
}

/// Normalize one session in place. Each record is handled independently;
/// defects stay isolated to the cell they came from.
pub fn normalize_session(session: &mut Session) {
    session.date = normalize_date(&session.date);
    if let Some((time, period)) = normalize_time(&session.time) {
        session.time = time;
        session.period = period;
    }
}
