use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::error::SheetError;

use super::SheetApi;

/// HTTP client for the Apps Script endpoint in front of the sheet.
///
/// One GET returns every row; one POST patches a single field of a single
/// row and returns nothing usable.
#[derive(Debug, Clone)]
pub struct SheetClient {
    http: reqwest::Client,
    endpoint: Url,
}

#[derive(Debug, Deserialize)]
struct FetchEnvelope {
    success: bool,
    #[serde(default)]
    data: Vec<Value>,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    id: String,
    patch: AssignmentPatch<'a>,
}

#[derive(Debug, Serialize)]
struct AssignmentPatch<'a> {
    #[serde(rename = "التكليف")]
    representative: &'a str,
}

impl SheetClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl SheetApi for SheetClient {
    async fn fetch_rows(&self) -> Result<Vec<Value>, SheetError> {
        debug!(endpoint = %self.endpoint, "fetching session rows");
        let response = self.http.get(self.endpoint.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SheetError::Status { status });
        }
        let envelope: FetchEnvelope = response.json().await?;
        if !envelope.success {
            return Err(SheetError::Rejected);
        }
        debug!(rows = envelope.data.len(), "fetched session rows");
        Ok(envelope.data)
    }

    /// Issue the patch and move on. The endpoint accepts the POST but its
    /// response carries no verifiable outcome, so nothing is awaited beyond
    /// the send itself; a transport failure is logged and otherwise
    /// indistinguishable from success (see the trait contract).
    async fn submit_assignment(&self, id: i64, representative: &str) {
        let payload = UpdateRequest {
            id: id.to_string(),
            patch: AssignmentPatch { representative },
        };
        match self
            .http
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
        {
            Ok(_) => debug!(id, "assignment patch handed to the transport"),
            Err(err) => warn!(id, error = %err, "assignment patch may not have been delivered"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{AssignmentPatch, FetchEnvelope, UpdateRequest};

    #[test]
    fn update_payload_matches_the_apps_script_shape() {
        let payload = UpdateRequest {
            id: 42.to_string(),
            patch: AssignmentPatch {
                representative: "خالد",
            },
        };
        let json = serde_json::to_value(&payload).expect("payload serializes");
        assert_eq!(
            json,
            serde_json::json!({ "id": "42", "patch": { "التكليف": "خالد" } })
        );
    }

    #[test]
    fn fetch_envelope_tolerates_missing_data_on_failure() {
        let envelope: FetchEnvelope =
            serde_json::from_value(serde_json::json!({ "success": false }))
                .expect("envelope deserializes");
        assert!(!envelope.success);
        assert!(envelope.data.is_empty());
    }
}
