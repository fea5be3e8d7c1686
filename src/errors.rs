use thiserror::Error;

use crate::external::report_provider::ReportProviderError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no report data available")]
    MissingPayload,
    #[error("fetch error: {0}")]
    Fetch(#[from] ReportProviderError),
    #[error("render error: {0}")]
    Render(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
