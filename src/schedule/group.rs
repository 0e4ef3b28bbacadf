//! Partitioning of session collections by day and by exact time slot.

use std::collections::HashMap;

use crate::session::Session;

/// Composite key identifying one exact time slot. Membership is exact string
/// equality on all three fields; there is no fuzzy time matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub date: String,
    pub time: String,
    pub period: String,
}

impl SlotKey {
    pub fn of(session: &Session) -> Self {
        Self {
            date: session.date.clone(),
            time: session.time.clone(),
            period: session.period.clone(),
        }
    }
}

/// Partition sessions by canonical date. First-seen date order and the
/// source order within each date are both preserved; no re-sort happens here.
pub fn by_date<'a, I>(sessions: I) -> Vec<(String, Vec<&'a Session>)>
where
    I: IntoIterator<Item = &'a Session>,
{
    let mut days: Vec<(String, Vec<&'a Session>)> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    for session in sessions {
        match index.get(session.date.as_str()) {
            Some(&at) => days[at].1.push(session),
            None => {
                index.insert(session.date.as_str(), days.len());
                days.push((session.date.clone(), vec![session]));
            }
        }
    }
    days
}

/// Group sessions by exact `(date, time, period)` slot.
pub fn by_slot<'a, I>(sessions: I) -> HashMap<SlotKey, Vec<&'a Session>>
where
    I: IntoIterator<Item = &'a Session>,
{
    let mut slots: HashMap<SlotKey, Vec<&'a Session>> = HashMap::new();
    for session in sessions {
        slots.entry(SlotKey::of(session)).or_default().push(session);
    }
    slots
}
