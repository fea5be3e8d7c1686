use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use equity_report::config::AppConfig;
use equity_report::external::report_api::HttpReportProvider;
use equity_report::logging::{init_logging, LoggingConfig};
use equity_report::services::ReportService;

/// Generate an investment analysis PDF for a stock symbol.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Stock symbol, e.g. AAPL or INFY.NS
    symbol: String,

    /// Directory the PDF is written into (overrides REPORT_OUTPUT_DIR)
    #[arg(short, long)]
    output_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    init_logging(&LoggingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize logging: {}", e))?;

    let provider = Arc::new(HttpReportProvider::new(config.report_api_url.clone()));
    let output_dir = cli.output_dir.unwrap_or(config.output_dir);
    let service = ReportService::new(provider, output_dir);

    let path = service
        .generate(&cli.symbol)
        .await
        .with_context(|| format!("could not generate report for {}", cli.symbol))?;

    println!("{}", path.display());
    Ok(())
}
