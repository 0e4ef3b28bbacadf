//! End-to-end tests over the ingestion → normalization → detection pipeline:
//! raw API rows in, conflict sets, calendar summaries, and optimistic
//! assignment out.

use jalsah::report::{self, query::SessionQuery};
use jalsah::schedule::{self, FixedToday, HijriDate, TodayProvider, retain_upcoming};
use jalsah::sheet::sessions_from_rows;
use jalsah::state::Registry;

fn approved() -> Vec<String> {
    vec!["شركة محمد للتجارة".to_owned()]
}

fn raw_rows() -> Vec<serde_json::Value> {
    vec![
        // Two rows that land on the same slot after normalization.
        serde_json::json!({
            "id": 1,
            "رقم الدعوى": 100,
            " المدعي ": "شركة محمد للتجارة",
            "المحكمة": "المحكمة الإدارية",
            "الدائرة": "الأولى",
            "الشهر": 5,
            "التاريخ": "1446-05-01T00:00:00.000Z",
            "وقت الموعد": "1446-05-01T09:00:00.000Z",
        }),
        serde_json::json!({
            "id": 2,
            "رقم الدعوى": "101",
            "المدعي": "شركة محمد للتجارة",
            "المحكمة": "المحكمة الإدارية",
            "الدائرة": "الثانية",
            "الشهر": 5,
            "التاريخ": "1446-05-01T00:00:00.000Z",
            "وقت الموعد": "1446-05-01T09:00:00.000Z",
        }),
        // Same day, different slot.
        serde_json::json!({
            "id": 3,
            "المدعي": "شركة محمد للتجارة",
            "الدائرة": "الأولى",
            "الشهر": 5,
            "التاريخ": "1446-05-01T00:00:00.000Z",
            "وقت الموعد": "1446-05-01T13:30:00.000Z",
            "التكليف": "خالد",
        }),
        // Earlier day.
        serde_json::json!({
            "id": 4,
            "المدعي": "شركة محمد للتجارة",
            "الشهر": 4,
            "التاريخ": "1446-04-20T00:00:00.000Z",
            "وقت الموعد": "1446-04-20T10:00:00.000Z",
        }),
        // Noise the ingester must survive: a null row and an off-list
        // plaintiff.
        serde_json::Value::Null,
        serde_json::json!({
            "id": 5,
            "المدعي": "جهة أخرى",
            "التاريخ": "1446-05-01T00:00:00.000Z",
            "وقت الموعد": "1446-05-01T09:00:00.000Z",
        }),
    ]
}

#[test]
fn two_rows_on_one_slot_become_a_two_member_conflict() {
    let sessions = sessions_from_rows(raw_rows(), &approved());
    assert_eq!(sessions.len(), 4);

    let ids = schedule::conflict_ids(&sessions);
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&1) && ids.contains(&2));

    let days = report::calendar_days(&sessions);
    let day = days
        .iter()
        .find(|d| d.date == "01-05-1446")
        .expect("summary for the shared day");
    assert_eq!(day.total, 3);
    assert_eq!(day.conflicts, 2);
    assert_eq!(day.representatives, 1);
}

#[test]
fn a_bare_two_session_collision_reports_total_two_conflicts_two() {
    let rows = vec![
        serde_json::json!({
            "id": 1,
            "المدعي": "شركة محمد للتجارة",
            "التاريخ": "1446-05-01T00:00:00.000Z",
            "وقت الموعد": "1446-05-01T09:00:00.000Z",
        }),
        serde_json::json!({
            "id": 2,
            "المدعي": "شركة محمد للتجارة",
            "التاريخ": "1446-05-01T00:00:00.000Z",
            "وقت الموعد": "1446-05-01T09:00:00.000Z",
        }),
    ];
    let sessions = sessions_from_rows(rows, &approved());

    let ids = schedule::conflict_ids(&sessions);
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&1) && ids.contains(&2));

    let days = report::calendar_days(&sessions);
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].date, "01-05-1446");
    assert_eq!(days[0].total, 2);
    assert_eq!(days[0].conflicts, 2);
}

#[test]
fn normalization_is_canonical_and_idempotent_through_ingestion() {
    let sessions = sessions_from_rows(raw_rows(), &approved());
    let first = sessions.iter().find(|s| s.id == 1).expect("session 1");
    assert_eq!(first.date, "01-05-1446");
    assert_eq!(first.time, "09:00");
    assert_eq!(first.period, "ص");

    let evening = sessions.iter().find(|s| s.id == 3).expect("session 3");
    assert_eq!(evening.time, "01:30");
    assert_eq!(evening.period, "م");
    assert_eq!(schedule::minute_of_day(&evening.time, &evening.period), 810);

    // Running the normalizer again over already-canonical fields changes
    // nothing.
    let mut again = first.clone();
    schedule::normalize_session(&mut again);
    assert_eq!(again.date, first.date);
    assert_eq!(again.time, first.time);
    assert_eq!(again.period, first.period);
}

#[test]
fn sorted_views_and_upcoming_filter_compose() {
    let sessions = sessions_from_rows(raw_rows(), &approved());

    let mut rows: Vec<_> = sessions.iter().collect();
    schedule::sort_sessions(&mut rows);
    let ids: Vec<i64> = rows.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![4, 1, 2, 3]);

    let today = FixedToday(HijriDate {
        year: 1446,
        month: 5,
        day: 1,
    })
    .today();
    let upcoming = retain_upcoming(rows, today, |s| s.date.as_str());
    let ids: Vec<i64> = upcoming.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn assignment_applies_locally_and_feeds_the_reports() {
    let mut registry = Registry::from_sessions(sessions_from_rows(raw_rows(), &approved()));

    assert!(registry.assign(1, "سعيد"));
    assert!(!registry.assign(999, "سعيد"));

    let report = report::lawyer_report(registry.sessions());
    let names: Vec<&str> = report.iter().map(|e| e.name.as_str()).collect();
    assert!(names.contains(&"سعيد") && names.contains(&"خالد"));

    // Saeed's single session collides with #2 globally but not with any of
    // his own, so his audit row stays clean.
    let saeed = report.iter().find(|e| e.name == "سعيد").expect("entry");
    assert_eq!(saeed.total, 1);
    assert_eq!(saeed.conflict_count, 0);

    let query = SessionQuery {
        conflicts_only: true,
        ..SessionQuery::default()
    };
    let ids: Vec<i64> = query
        .apply(registry.sessions())
        .iter()
        .map(|s| s.id)
        .collect();
    // Global conflicts restricted to the assigned-only default base.
    assert_eq!(ids, vec![1]);
}
