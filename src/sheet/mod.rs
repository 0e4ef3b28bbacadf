//! The spreadsheet-backed sessions API: fetch, ingestion, and the
//! unconfirmed assignment update.

pub mod client;
pub mod ingest;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::SheetError;

pub use client::SheetClient;
pub use ingest::sessions_from_rows;

/// The remote collaborator the engine talks to.
///
/// `fetch_rows` either yields the complete row set or one error; callers
/// never see partial data. `submit_assignment` is fire-and-forget by
/// contract: the Apps Script transport cannot report an outcome, so the
/// method exposes no success or failure signal at all. Delivery is
/// at-most-once and unconfirmed, and callers apply the change to local
/// state the moment the request is issued.
#[async_trait]
pub trait SheetApi: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<Value>, SheetError>;

    async fn submit_assignment(&self, id: i64, representative: &str);
}
