mod report;

pub use report::{
    AiInsights, Financials, NewsItem, Overview, PeerCompany, ReportPayload, Technicals, Valuation,
};
