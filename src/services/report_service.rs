use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{error, info};

use crate::errors::ReportError;
use crate::external::report_provider::ReportProvider;
use crate::models::ReportPayload;
use crate::pdf::layout::build_report_layout;
use crate::pdf::render::render_pdf;

/// Fetches the report payload for a symbol and turns it into a saved PDF.
///
/// One invocation is one fetch plus one file write; nothing is cached and
/// concurrent invocations are not coordinated.
pub struct ReportService {
    provider: Arc<dyn ReportProvider>,
    output_dir: PathBuf,
}

impl ReportService {
    pub fn new(provider: Arc<dyn ReportProvider>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            output_dir: output_dir.into(),
        }
    }

    pub async fn generate(&self, symbol: &str) -> Result<PathBuf, ReportError> {
        info!("Fetching report data for {}", symbol);
        let payload = match self.provider.fetch_report(symbol).await {
            Ok(payload) => payload,
            Err(e) => {
                error!("Error fetching stock report for {}: {}", symbol, e);
                return Err(e.into());
            }
        };
        self.save_report(Some(&payload))
    }

    /// Builds and writes the document. Fails with `MissingPayload` before any
    /// layout work when no data is available; the PDF is rendered fully in
    /// memory, so no partial file is ever visible.
    pub fn save_report(&self, payload: Option<&ReportPayload>) -> Result<PathBuf, ReportError> {
        let payload = payload.ok_or(ReportError::MissingPayload)?;

        let layout = build_report_layout(payload);
        let title = format!("{} Investment Analysis", payload.symbol);
        let bytes = render_pdf(&layout, &title)?;

        let filename = report_filename(&payload.symbol, Local::now().date_naive());
        let path = self.output_dir.join(filename);
        std::fs::write(&path, &bytes)?;

        info!(
            "Report written to {} ({} pages, {} bytes)",
            path.display(),
            layout.pages.len(),
            bytes.len()
        );
        Ok(path)
    }
}

pub fn report_filename(symbol: &str, date: NaiveDate) -> String {
    format!("{}_Investment_Analysis_{}.pdf", symbol, date.format("%Y-%m-%d"))
}
