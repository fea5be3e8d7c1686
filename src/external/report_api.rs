use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::external::report_provider::{ReportProvider, ReportProviderError};
use crate::models::ReportPayload;

/// Client for the report-generation endpoint.
///
/// One POST per report, no retry and no timeout at this layer; failures are
/// surfaced to the caller, which logs them and leaves the user to retry.
pub struct HttpReportProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ReportRequest<'a> {
    symbol: &'a str,
}

// Non-2xx responses carry { "error": "..." }
#[derive(Debug, Deserialize)]
struct ReportErrorBody {
    error: Option<String>,
}

impl HttpReportProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl ReportProvider for HttpReportProvider {
    async fn fetch_report(&self, symbol: &str) -> Result<ReportPayload, ReportProviderError> {
        let url = format!("{}/generate_stock_report", self.base_url.trim_end_matches('/'));

        let resp = self
            .client
            .post(&url)
            .json(&ReportRequest { symbol })
            .send()
            .await
            .map_err(|e| ReportProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            let message = match resp.json::<ReportErrorBody>().await {
                Ok(body) => body
                    .error
                    .unwrap_or_else(|| "Failed to fetch stock report".to_string()),
                Err(_) => "Failed to fetch stock report".to_string(),
            };
            return Err(ReportProviderError::Api(message));
        }

        resp.json::<ReportPayload>()
            .await
            .map_err(|e| ReportProviderError::Parse(e.to_string()))
    }
}
