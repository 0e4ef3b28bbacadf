//! Double-booking detection over exact time slots.
//!
//! A conflict is two or more sessions sharing an identical
//! `(date, time, period)` after normalization. The global detector ignores
//! who owns each session; entity-scoped detection works by filtering the
//! input down to one representative's or plaintiff's sessions *before*
//! grouping, so collisions with other entities never count against an
//! entity's own schedule.

use std::collections::HashSet;

use crate::session::Session;

use super::group::{SlotKey, by_slot};
use super::order::{date_sort_key, minute_of_day};

/// One fully-booked slot and everyone caught in it.
#[derive(Debug, Clone)]
pub struct ConflictGroup<'a> {
    pub date: String,
    pub time: String,
    pub period: String,
    pub sessions: Vec<&'a Session>,
}

impl ConflictGroup<'_> {
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

/// Entity a conflict scan can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityRef<'a> {
    Representative(&'a str),
    Plaintiff(&'a str),
}

impl EntityRef<'_> {
    pub fn matches(&self, session: &Session) -> bool {
        match self {
            Self::Representative(name) => session.representative() == name.trim(),
            Self::Plaintiff(name) => session.plaintiff() == name.trim(),
        }
    }
}

/// Ids of every session that shares its exact slot with at least one other.
/// Membership is binary: colliding with three others counts once.
pub fn conflict_ids<'a, I>(sessions: I) -> HashSet<i64>
where
    I: IntoIterator<Item = &'a Session>,
{
    let mut ids = HashSet::new();
    for members in by_slot(sessions).into_values() {
        if members.len() >= 2 {
            ids.extend(members.iter().map(|s| s.id));
        }
    }
    ids
}

/// The richer form: every conflicting slot with its full member list, ordered
/// by date then time of day so reports come out deterministic.
pub fn conflict_groups<'a, I>(sessions: I) -> Vec<ConflictGroup<'a>>
where
    I: IntoIterator<Item = &'a Session>,
{
    let mut groups: Vec<ConflictGroup<'a>> = by_slot(sessions)
        .into_iter()
        .filter(|(_, members)| members.len() >= 2)
        .map(|(key, members)| {
            let SlotKey { date, time, period } = key;
            ConflictGroup {
                date,
                time,
                period,
                sessions: members,
            }
        })
        .collect();
    groups.sort_by_key(|g| (date_sort_key(&g.date), minute_of_day(&g.time, &g.period)));
    groups
}

/// Every conflicting session, flattened out of its group and ordered by date
/// then time. Backs the "all detected conflicts" table.
pub fn conflict_sessions<'a, I>(sessions: I) -> Vec<&'a Session>
where
    I: IntoIterator<Item = &'a Session>,
{
    conflict_groups(sessions)
        .into_iter()
        .flat_map(|g| g.sessions)
        .collect()
}

/// Conflict ids among one entity's own sessions only.
pub fn entity_conflict_ids<'a, I>(sessions: I, entity: EntityRef<'_>) -> HashSet<i64>
where
    I: IntoIterator<Item = &'a Session>,
{
    conflict_ids(sessions.into_iter().filter(|s| entity.matches(s)))
}
