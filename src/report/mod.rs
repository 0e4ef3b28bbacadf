//! Derived views: calendar summaries, dashboard stats, distributions, and
//! the per-representative / per-plaintiff audit reports.
//!
//! Everything is recomputed from the canonical session list on demand;
//! nothing here is stored.

pub mod query;

use std::collections::HashMap;

use crate::schedule::{
    ConflictGroup, EntityRef, by_date, conflict_groups, conflict_ids, date_sort_key,
};
use crate::session::Session;

/// Hijri month names, indexed by month number - 1.
pub const HIJRI_MONTHS: [&str; 12] = [
    "محرم",
    "صفر",
    "ربيع الأول",
    "ربيع الثاني",
    "جمادى الأولى",
    "جمادى الآخرة",
    "رجب",
    "شعبان",
    "رمضان",
    "شوال",
    "ذو القعدة",
    "ذو الحجة",
];

/// Label used when a session's circuit cell is empty.
pub const UNSPECIFIED_CIRCUIT: &str = "غير محدد";

/// One calendar day as the day list renders it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDaySummary {
    pub date: String,
    /// Sessions on this date.
    pub total: usize,
    /// Distinct sessions implicated in any same-day slot collision.
    pub conflicts: usize,
    /// Distinct non-empty representative names seen this day.
    pub representatives: usize,
}

/// One summary per distinct date, ordered by date.
pub fn calendar_days(sessions: &[Session]) -> Vec<CalendarDaySummary> {
    let mut days: Vec<CalendarDaySummary> = by_date(sessions)
        .into_iter()
        .map(|(date, on_date)| {
            let mut representatives: Vec<&str> = on_date
                .iter()
                .map(|s| s.representative())
                .filter(|name| !name.is_empty())
                .collect();
            representatives.sort_unstable();
            representatives.dedup();

            CalendarDaySummary {
                date,
                total: on_date.len(),
                conflicts: conflict_ids(on_date.iter().copied()).len(),
                representatives: representatives.len(),
            }
        })
        .collect();
    days.sort_by_key(|day| date_sort_key(&day.date));
    days
}

/// Circuit chips for one day's detail view: circuit name to session count,
/// first-seen order, stable-sorted by count descending. Empty circuits fall
/// into the "غير محدد" bucket.
pub fn circuit_breakdown<'a, I>(sessions: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Session>,
{
    counted_by(sessions, |s| {
        let name = s.circuit.trim();
        if name.is_empty() { UNSPECIFIED_CIRCUIT } else { name }
    })
}

/// Headline dashboard numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub assigned: usize,
    pub unassigned: usize,
    /// Distinct sessions caught in any conflict, across all dates.
    pub conflicts: usize,
}

pub fn dashboard_stats(sessions: &[Session]) -> DashboardStats {
    let unassigned = sessions.iter().filter(|s| !s.is_assigned()).count();
    DashboardStats {
        total: sessions.len(),
        assigned: sessions.len() - unassigned,
        unassigned,
        conflicts: conflict_ids(sessions).len(),
    }
}

/// Which slice of the session set the dashboard distributions describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardFilter {
    #[default]
    All,
    Conflicts,
    Assigned,
    Unassigned,
}

impl DashboardFilter {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Conflicts => "conflicts",
            Self::Assigned => "assigned",
            Self::Unassigned => "unassigned",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            "conflicts" => Some(Self::Conflicts),
            "assigned" => Some(Self::Assigned),
            "unassigned" => Some(Self::Unassigned),
            _ => None,
        }
    }

    pub fn apply<'a>(self, sessions: &'a [Session]) -> Vec<&'a Session> {
        match self {
            Self::All => sessions.iter().collect(),
            Self::Assigned => sessions.iter().filter(|s| s.is_assigned()).collect(),
            Self::Unassigned => sessions.iter().filter(|s| !s.is_assigned()).collect(),
            Self::Conflicts => {
                let ids = conflict_ids(sessions);
                sessions.iter().filter(|s| ids.contains(&s.id)).collect()
            }
        }
    }
}

/// Session counts per Hijri month, zero-filled across all twelve months.
/// Months the sheet left unusable (0) are not counted anywhere.
pub fn by_month<'a, I>(sessions: I) -> [(u8, &'static str, usize); 12]
where
    I: IntoIterator<Item = &'a Session>,
{
    let mut counts = [0usize; 12];
    for session in sessions {
        if (1..=12).contains(&session.month) {
            counts[session.month as usize - 1] += 1;
        }
    }
    std::array::from_fn(|i| (i as u8 + 1, HIJRI_MONTHS[i], counts[i]))
}

/// Session counts per court, first-seen order, stable-sorted descending.
pub fn by_court<'a, I>(sessions: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Session>,
{
    counted_by(sessions, |s| s.court.trim())
}

/// Session counts per circuit, first-seen order, stable-sorted descending.
pub fn by_circuit<'a, I>(sessions: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Session>,
{
    counted_by(sessions, |s| s.circuit.trim())
}

/// Audit row for one representative or one plaintiff.
#[derive(Debug, Clone)]
pub struct EntityStats<'a> {
    pub name: String,
    /// Sessions carrying this name.
    pub total: usize,
    /// Member-sum across this entity's own conflicting slots (a 3-way
    /// collision contributes 3), matching how the audit report counts.
    pub conflict_count: usize,
    /// This entity's self-collisions only; collisions with other entities'
    /// sessions do not appear here.
    pub conflicts: Vec<ConflictGroup<'a>>,
    pub sessions: Vec<&'a Session>,
}

/// Per-representative audit report, stable-sorted by session count
/// descending. Unassigned sessions are excluded entirely.
pub fn lawyer_report(sessions: &[Session]) -> Vec<EntityStats<'_>> {
    entity_report(sessions, |s| s.representative())
}

/// Per-plaintiff audit report; sessions with an empty plaintiff cell are
/// excluded entirely.
pub fn plaintiff_report(sessions: &[Session]) -> Vec<EntityStats<'_>> {
    entity_report(sessions, |s| s.plaintiff())
}

/// Conflict ids scoped to one entity, for "show only this entity's
/// collisions" filtering.
pub fn entity_conflict_ids(
    sessions: &[Session],
    entity: EntityRef<'_>,
) -> std::collections::HashSet<i64> {
    crate::schedule::entity_conflict_ids(sessions, entity)
}

fn entity_report<'a>(
    sessions: &'a [Session],
    name_of: impl Fn(&Session) -> &str,
) -> Vec<EntityStats<'a>> {
    let mut entries: Vec<EntityStats<'a>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for session in sessions {
        let name = name_of(session);
        if name.is_empty() {
            continue;
        }
        let at = *index.entry(name.to_owned()).or_insert_with(|| {
            entries.push(EntityStats {
                name: name.to_owned(),
                total: 0,
                conflict_count: 0,
                conflicts: Vec::new(),
                sessions: Vec::new(),
            });
            entries.len() - 1
        });
        entries[at].total += 1;
        entries[at].sessions.push(session);
    }

    for entry in &mut entries {
        let groups = conflict_groups(entry.sessions.iter().copied());
        entry.conflict_count = groups.iter().map(ConflictGroup::len).sum();
        entry.conflicts = groups;
    }

    entries.sort_by_key(|entry| std::cmp::Reverse(entry.total));
    entries
}

/// Count sessions per label, preserving first-seen label order, then
/// stable-sort by count descending so ties keep that order.
fn counted_by<'a, I>(sessions: I, label_of: impl Fn(&Session) -> &str) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Session>,
{
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for session in sessions {
        let label = label_of(session);
        if label.is_empty() {
            continue;
        }
        match index.get(label) {
            Some(&at) => counts[at].1 += 1,
            None => {
                index.insert(label.to_owned(), counts.len());
                counts.push((label.to_owned(), 1));
            }
        }
    }
    counts.sort_by_key(|(_, count)| std::cmp::Reverse(*count));
    counts
}
