//! "Upcoming" filtering against today's date in the Hijri calendar.
//!
//! Session dates are Hijri, so "today" has to come from a Hijri source too.
//! The conversion itself is not this crate's business: it sits behind
//! [`TodayProvider`], with an Umm al-Qura implementation on top of
//! `icu_calendar` and a fixed-date implementation for configuration pins and
//! tests. When no provider can produce a date the filter must pass
//! everything through rather than fail closed.

use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use icu_calendar::Date;
use icu_calendar::islamic::IslamicUmmAlQura;

/// A calendar date in the Hijri system. Field order gives the derived
/// ordering the `(year, month, day)` priority the comparison contract needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HijriDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl FromStr for HijriDate {
    type Err = ();

    /// Parses the canonical `dd-mm-yyyy` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '-');
        let day = parts.next().and_then(|p| p.parse::<u8>().ok()).ok_or(())?;
        let month = parts.next().and_then(|p| p.parse::<u8>().ok()).ok_or(())?;
        let year = parts.next().and_then(|p| p.parse::<i32>().ok()).ok_or(())?;
        if day == 0 || month == 0 {
            return Err(());
        }
        Ok(Self { year, month, day })
    }
}

impl fmt::Display for HijriDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }
}

/// Source of "today" in the Hijri calendar.
pub trait TodayProvider {
    fn today(&self) -> Option<HijriDate>;
}

/// A pinned date, used for the `HIJRI_TODAY` override and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedToday(pub HijriDate);

impl TodayProvider for FixedToday {
    fn today(&self) -> Option<HijriDate> {
        Some(self.0)
    }
}

/// Today per the system clock, converted through the Umm al-Qura calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemToday;

impl TodayProvider for SystemToday {
    fn today(&self) -> Option<HijriDate> {
        let now = chrono::Local::now().date_naive();
        hijri_from_gregorian(now.year(), now.month(), now.day())
    }
}

fn hijri_from_gregorian(year: i32, month: u32, day: u32) -> Option<HijriDate> {
    let iso = Date::try_new_iso_date(year, month as u8, day as u8).ok()?;
    let hijri = iso.to_calendar(IslamicUmmAlQura::new());
    Some(HijriDate {
        year: hijri.year().number,
        month: hijri.month().ordinal as u8,
        day: hijri.day_of_month().0 as u8,
    })
}

/// Whether a canonical date string is on or after `today`. Unparseable dates
/// are neither past nor future; they are conservatively excluded.
pub fn is_upcoming(date: &str, today: HijriDate) -> bool {
    match date.parse::<HijriDate>() {
        Ok(session_date) => session_date >= today,
        Err(()) => false,
    }
}

/// Retain the items dated today or later. With no known today this is a
/// no-op and the input comes back unfiltered.
pub fn retain_upcoming<T, F>(items: Vec<T>, today: Option<HijriDate>, date_of: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    match today {
        Some(today) => items
            .into_iter()
            .filter(|item| is_upcoming(date_of(item), today))
            .collect(),
        None => items,
    }
}
