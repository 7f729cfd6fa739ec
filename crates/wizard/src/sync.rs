//! Best-effort push of the combined wizard state to the remote endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use roster_company::CompanyRecord;
use roster_employees::EmployeeRecords;

/// Fixed endpoint the saved data is posted to.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/api/saveData";

/// Request body: `{ "companyData": ..., "employeeData": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub company_data: CompanyRecord,
    pub employee_data: EmployeeRecords,
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

/// Receiver of saved wizard data.
#[async_trait]
pub trait RemoteSink: Send + Sync {
    /// Send the payload once. `Ok` carries the parsed response body.
    async fn push(&self, payload: &SavePayload) -> Result<Value, SyncError>;
}

/// JSON-over-HTTP sink. No retry and no timeout.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Use a preconfigured client (proxy, TLS roots, ...).
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl RemoteSink for HttpSink {
    async fn push(&self, payload: &SavePayload) -> Result<Value, SyncError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| SyncError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SyncError::Api(
                status.as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        resp.json().await.map_err(|e| SyncError::Parse(e.to_string()))
    }
}
