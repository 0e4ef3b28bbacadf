//! Turns raw API rows into normalized [`Session`] records.
//!
//! The sheet is hand-maintained: null rows are dropped, column headers
//! arrive with stray whitespace and are trimmed before field mapping, rows
//! that still fail to deserialize are discarded with a warning, and only
//! sessions whose plaintiff is on the approved allow-list survive. Each row
//! is processed independently; one bad row never poisons the batch.

use serde_json::{Map, Value};
use tracing::warn;

use crate::schedule::normalize_session;
use crate::session::Session;

/// Build the session set from raw rows. The allow-list decision is made
/// outside this crate; it is only applied here, against trimmed names.
pub fn sessions_from_rows(rows: Vec<Value>, approved_plaintiffs: &[String]) -> Vec<Session> {
    rows.into_iter()
        .filter_map(clean_row)
        .filter_map(|row| match serde_json::from_value::<Session>(Value::Object(row)) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(error = %err, "discarding row that does not map to a session");
                None
            }
        })
        .filter(|session| {
            approved_plaintiffs
                .iter()
                .any(|approved| approved.trim() == session.plaintiff())
        })
        .map(|mut session| {
            normalize_session(&mut session);
            session
        })
        .collect()
}

/// Drop null/non-object rows and trim every key.
fn clean_row(row: Value) -> Option<Map<String, Value>> {
    match row {
        Value::Object(fields) => Some(
            fields
                .into_iter()
                .map(|(key, value)| (key.trim().to_owned(), value))
                .collect(),
        ),
        Value::Null => None,
        other => {
            warn!(row = %other, "discarding non-object row");
            None
        }
    }
}
