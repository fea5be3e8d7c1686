use async_trait::async_trait;
use thiserror::Error;

use crate::models::ReportPayload;

#[derive(Debug, Error)]
pub enum ReportProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("{0}")]
    Api(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Source of report payloads for one stock symbol.
#[async_trait]
pub trait ReportProvider: Send + Sync {
    async fn fetch_report(&self, symbol: &str) -> Result<ReportPayload, ReportProviderError>;
}
