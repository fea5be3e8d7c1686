use serde::{Deserialize, Serialize};

/// Full report payload returned by the report endpoint for one symbol.
///
/// Every metric is optional; absent values render as "N/A" in the document
/// rather than failing the build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportPayload {
    pub symbol: String,
    pub company_name: String,
    pub report_date: String,
    pub overview: Overview,
    /// Placeholder kept so the payload round-trips the endpoint's shape.
    pub fundamentals: Option<serde_json::Value>,
    pub valuation: Valuation,
    pub technicals: Technicals,
    pub financials: Financials,
    pub news_analysis: Vec<NewsItem>,
    pub ai_insights: AiInsights,
    pub peer_comparison: Vec<PeerCompany>,
}

impl ReportPayload {
    /// True for NSE/BSE listings; controls the currency symbol and unit
    /// label in the document, nothing else.
    pub fn is_indian_listing(&self) -> bool {
        self.symbol.ends_with(".NS")
            || self.symbol.ends_with(".BO")
            || self.symbol.ends_with(".BSE")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Overview {
    pub exchange: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub high_low: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Valuation {
    pub pe: Option<f64>,
    #[serde(rename = "forwardPE")]
    pub forward_pe: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub price_to_book: Option<f64>,
    pub price_to_sales: Option<f64>,
    pub ev_to_ebitda: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Technicals {
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub ma50: Option<f64>,
    pub ma200: Option<f64>,
    pub avg_volume: Option<f64>,
    pub beta: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Financials {
    pub revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub eps: Option<f64>,
    pub profit_margin: Option<f64>,
    pub roe: Option<f64>,
    pub debt_to_equity: Option<f64>,
}

/// One analyzed news article; at most the first five are rendered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsItem {
    pub title: String,
    pub date: String,
    pub sentiment: String,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiInsights {
    pub summary: Option<String>,
    pub strengths: Vec<String>,
    pub risks: Vec<String>,
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PeerCompany {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub pe: Option<f64>,
    pub market_cap: Option<f64>,
    pub roe: Option<f64>,
}
