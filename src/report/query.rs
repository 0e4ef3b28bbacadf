//! The assignments-table filter set: one query struct instead of a filter
//! re-implementation per view.

use crate::schedule::{EntityRef, conflict_ids, date_sort_key, entity_conflict_ids};
use crate::session::Session;

/// Filters applied to the session table. All name matches compare trimmed
/// strings. With neither a representative nor a plaintiff pinned, the base
/// set is assigned sessions only (the assignments view's default); pinning
/// either widens the base to every session of that entity.
#[derive(Debug, Clone, Default)]
pub struct SessionQuery {
    pub circuit: Option<String>,
    pub representative: Option<String>,
    pub plaintiff: Option<String>,
    pub date: Option<String>,
    /// Restrict to colliding sessions: entity-scoped when a representative
    /// or plaintiff is pinned, global otherwise.
    pub conflicts_only: bool,
}

impl SessionQuery {
    pub fn apply<'a>(&self, sessions: &'a [Session]) -> Vec<&'a Session> {
        let entity = self
            .representative
            .as_deref()
            .map(EntityRef::Representative)
            .or_else(|| self.plaintiff.as_deref().map(EntityRef::Plaintiff));

        let mut rows: Vec<&'a Session> = sessions
            .iter()
            .filter(|s| entity.is_some() || s.is_assigned())
            .filter(|s| match self.circuit.as_deref() {
                Some(circuit) => s.circuit.trim() == circuit.trim(),
                None => true,
            })
            .filter(|s| match self.date.as_deref() {
                Some(date) => s.date.trim() == date.trim(),
                None => true,
            })
            .filter(|s| match self.plaintiff.as_deref() {
                Some(plaintiff) => s.plaintiff() == plaintiff.trim(),
                None => true,
            })
            .filter(|s| match self.representative.as_deref() {
                Some(representative) => s.representative() == representative.trim(),
                None => true,
            })
            .collect();

        if self.conflicts_only {
            let ids = match entity {
                Some(entity) => entity_conflict_ids(sessions, entity),
                None => conflict_ids(sessions),
            };
            rows.retain(|s| ids.contains(&s.id));
        }
        rows
    }
}

/// Distinct non-empty circuit names, alphabetical.
pub fn distinct_circuits(sessions: &[Session]) -> Vec<String> {
    distinct(sessions, |s| s.circuit.trim())
}

/// Distinct non-empty representative names, alphabetical.
pub fn distinct_representatives(sessions: &[Session]) -> Vec<String> {
    distinct(sessions, |s| s.representative())
}

/// Distinct non-empty plaintiff names, alphabetical.
pub fn distinct_plaintiffs(sessions: &[Session]) -> Vec<String> {
    distinct(sessions, |s| s.plaintiff())
}

/// Distinct dates in chronological order.
pub fn distinct_dates(sessions: &[Session]) -> Vec<String> {
    let mut dates = distinct(sessions, |s| s.date.trim());
    dates.sort_by_key(|date| date_sort_key(date));
    dates
}

fn distinct(sessions: &[Session], value_of: impl Fn(&Session) -> &str) -> Vec<String> {
    let mut values: Vec<String> = sessions
        .iter()
        .map(&value_of)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect();
    values.sort_unstable();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::session::Session;

    use super::{SessionQuery, distinct_dates, distinct_representatives};

    #[test]
    fn default_query_shows_assigned_sessions_only() {
        let rows = sessions(&[
            (1, "10-03-1446", "09:00", "ص", "خالد", "شركة أ", "الأولى"),
            (2, "10-03-1446", "10:00", "ص", "", "شركة أ", "الأولى"),
        ]);
        let out = SessionQuery::default().apply(&rows);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn pinning_a_representative_widens_the_base_to_their_sessions() {
        let rows = sessions(&[
            (1, "10-03-1446", "09:00", "ص", "خالد", "شركة أ", "الأولى"),
            (2, "10-03-1446", "10:00", "ص", "", "شركة أ", "الأولى"),
        ]);
        let query = SessionQuery {
            representative: Some("سعيد".to_owned()),
            ..SessionQuery::default()
        };
        // No sessions for this name at all, even though unpinned defaults
        // would have shown the assigned one.
        assert!(query.apply(&rows).is_empty());
    }

    #[test]
    fn field_filters_compose() {
        let rows = sessions(&[
            (1, "10-03-1446", "09:00", "ص", "خالد", "شركة أ", "الأولى"),
            (2, "10-03-1446", "10:00", "ص", "خالد", "شركة ب", "الثانية"),
            (3, "11-03-1446", "09:00", "ص", "خالد", "شركة أ", "الأولى"),
        ]);
        let query = SessionQuery {
            circuit: Some("الأولى".to_owned()),
            date: Some("10-03-1446".to_owned()),
            ..SessionQuery::default()
        };
        let out = query.apply(&rows);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn conflicts_only_is_entity_scoped_when_an_entity_is_pinned() {
        let rows = sessions(&[
            // Khalid vs Saeed at the same slot: global conflict only.
            (1, "10-03-1446", "09:00", "ص", "خالد", "شركة أ", "الأولى"),
            (2, "10-03-1446", "09:00", "ص", "سعيد", "شركة أ", "الأولى"),
            // Khalid vs Khalid: his own collision.
            (3, "12-03-1446", "10:00", "ص", "خالد", "شركة أ", "الأولى"),
            (4, "12-03-1446", "10:00", "ص", "خالد", "شركة أ", "الأولى"),
        ]);

        let global = SessionQuery {
            conflicts_only: true,
            ..SessionQuery::default()
        };
        assert_eq!(global.apply(&rows).len(), 4);

        let scoped = SessionQuery {
            representative: Some("خالد".to_owned()),
            conflicts_only: true,
            ..SessionQuery::default()
        };
        let ids: Vec<i64> = scoped.apply(&rows).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn distinct_lists_are_deduplicated_and_ordered() {
        let rows = sessions(&[
            (1, "10-03-1446", "09:00", "ص", "خالد", "شركة أ", "الأولى"),
            (2, "02-01-1447", "10:00", "ص", "خالد", "شركة ب", "الثانية"),
            (3, "11-03-1446", "09:00", "ص", " ", "شركة أ", "الأولى"),
        ]);
        assert_eq!(distinct_representatives(&rows), vec!["خالد".to_owned()]);
        assert_eq!(
            distinct_dates(&rows),
            vec![
                "10-03-1446".to_owned(),
                "11-03-1446".to_owned(),
                "02-01-1447".to_owned(),
            ]
        );
    }

    fn sessions(specs: &[(i64, &str, &str, &str, &str, &str, &str)]) -> Vec<Session> {
        specs
            .iter()
            .map(|(id, date, time, period, representative, plaintiff, circuit)| {
                serde_json::from_value(serde_json::json!({
                    "id": id,
                    "التاريخ": date,
                    "وقت الموعد": time,
                    "ص- م": period,
                    "التكليف": representative,
                    "المدعي": plaintiff,
                    "الدائرة": circuit,
                }))
                .expect("test session")
            })
            .collect()
    }
}
