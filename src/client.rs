use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;

use crate::error::TelemetryError;
use crate::registry::TelemetryReport;

/// Everything except unreserved characters gets escaped, so free-text
/// feedback containing `&`, `=`, spaces or non-ASCII cannot corrupt the
/// query string.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn escape(component: &str) -> String {
    utf8_percent_encode(component, QUERY_COMPONENT).to_string()
}

/// Transport seam for the staged flow. [`SheetsClient`] is the production
/// impl; tests substitute a recording mock.
#[allow(async_fn_in_trait)]
pub trait SubmitTransport {
    async fn submit(
        &self,
        timestamp: &str,
        version: &str,
        id: &str,
        fields: &TelemetryReport,
    ) -> Result<(), TelemetryError>;
}

/// Client for the spreadsheet-backed telemetry endpoint. Payloads travel as
/// URL query parameters on plain GET requests; there is no body, no auth and
/// no retry.
#[derive(Debug, Clone)]
pub struct SheetsClient {
    http: Client,
    base_url: String,
}

impl SheetsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Deterministic query construction, separated from the send so encoding
    /// and ordering are checkable without a server. The three fixed identity
    /// parameters come first, then one pair per report entry in insertion
    /// order; an empty report still yields a valid request.
    pub fn submit_url(
        &self,
        timestamp: &str,
        version: &str,
        id: &str,
        fields: &TelemetryReport,
    ) -> String {
        let mut url = format!(
            "{}?action=post&timestamp={}&version={}&id={}",
            self.base_url,
            escape(timestamp),
            escape(version),
            escape(id)
        );
        for (key, value) in fields.iter() {
            url.push('&');
            url.push_str(&escape(key));
            url.push('=');
            url.push_str(&escape(value));
        }
        url
    }

    pub fn retrieve_url(&self, id: &str, index: u32) -> String {
        format!(
            "{}?action=retrieve&id={}&index={}",
            self.base_url,
            escape(id),
            escape(&index.to_string())
        )
    }

    /// Raw row lookup. Defined by the endpoint but not exercised by the
    /// staged flow; kept for hosts that read values back.
    pub async fn retrieve(&self, id: &str, index: u32) -> Result<String, TelemetryError> {
        let response = self.http.get(self.retrieve_url(id, index)).send().await?;
        if !response.status().is_success() {
            return Err(TelemetryError::Status(response.status()));
        }
        Ok(response.text().await?)
    }
}

impl SubmitTransport for SheetsClient {
    /// Fire-and-forget send. Both outcomes land in the diagnostic log; the
    /// response body is never parsed and failures are never retried.
    async fn submit(
        &self,
        timestamp: &str,
        version: &str,
        id: &str,
        fields: &TelemetryReport,
    ) -> Result<(), TelemetryError> {
        let url = self.submit_url(timestamp, version, id, fields);
        match self.http.get(&url).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(version, "playtest data sent");
                Ok(())
            }
            Ok(response) => {
                tracing::warn!(version, status = %response.status(), "playtest submission rejected");
                Err(TelemetryError::Status(response.status()))
            }
            Err(err) => {
                tracing::warn!(version, error = %err, "playtest submission failed");
                Err(TelemetryError::Transport(err))
            }
        }
    }
}
