//! Layout engine for the investment analysis report.
//!
//! Pages are computed into an explicit ordered `Vec<PageContent>` of draw
//! ops before any PDF bytes exist. The vertical cursor is measured in mm
//! from the top of an A4 page and is threaded through every section
//! renderer explicitly; a section that would start past its threshold opens
//! a fresh page and resets the cursor to the top margin. A finalization
//! pass stamps every page with a centered "Page X of N" footer and puts the
//! disclaimer on the last page only.

use crate::models::ReportPayload;
use crate::pdf::format::{
    format_currency, format_grouped, format_percent, format_plain, format_text,
};

pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;

const MARGIN_LEFT: f64 = 20.0;
const CONTENT_RIGHT: f64 = 190.0;
const CONTENT_WIDTH: f64 = 170.0;
const TOP_MARGIN: f64 = 20.0;
const CENTER_X: f64 = 105.0;
const SECTION_GAP: f64 = 10.0;
const ROW_HEIGHT: f64 = 8.0;
const LINE_HEIGHT: f64 = 5.0;
const SMALL_LINE_HEIGHT: f64 = 4.0;
const FOOTER_Y: f64 = 290.0;
const DISCLAIMER_Y: f64 = 280.0;

const HEADING_COLOR: (u8, u8, u8) = (0, 51, 102);
const BODY_COLOR: (u8, u8, u8) = (60, 60, 60);
const TEXT_COLOR: (u8, u8, u8) = (0, 0, 0);
const MUTED_COLOR: (u8, u8, u8) = (100, 100, 100);
const FOOTER_COLOR: (u8, u8, u8) = (150, 150, 150);
const GRID_COLOR: (u8, u8, u8) = (200, 200, 200);

pub const DISCLAIMER: &str = "Disclaimer: This report is generated using AI and should not be considered as financial advice. Always conduct your own research before making investment decisions.";

// Helvetica average advance, used for wrapping and centering. Points to mm.
const PT_TO_MM: f64 = 0.352_778;
const AVG_GLYPH_EM: f64 = 0.5;

#[derive(Debug, Clone)]
pub enum DrawOp {
    Text {
        x: f64,
        y: f64,
        size: f64,
        bold: bool,
        color: (u8, u8, u8),
        text: String,
    },
    Rule {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: (u8, u8, u8),
    },
}

#[derive(Debug, Clone, Default)]
pub struct PageContent {
    pub ops: Vec<DrawOp>,
}

impl PageContent {
    /// All text fragments on this page, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            DrawOp::Rule { .. } => None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ReportLayout {
    pub pages: Vec<PageContent>,
}

pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * AVG_GLYPH_EM * PT_TO_MM
}

/// Greedy word wrap against the approximate character budget for `width` mm
/// at `size` pt. Words longer than a full line are hard-broken at the budget.
pub fn wrap_text(text: &str, width: f64, size: f64) -> Vec<String> {
    let max_chars = (width / (size * AVG_GLYPH_EM * PT_TO_MM)).floor().max(1.0) as usize;

    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let chars: Vec<char> = word.chars().collect();
            for chunk in chars.chunks(max_chars) {
                if chunk.len() == max_chars {
                    lines.push(chunk.iter().collect());
                } else {
                    current = chunk.iter().collect();
                }
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Accumulates pages; the cursor itself is owned by the caller and passed
/// through every call that moves it.
struct PageBuilder {
    pages: Vec<PageContent>,
}

impl PageBuilder {
    fn new() -> Self {
        Self {
            pages: vec![PageContent::default()],
        }
    }

    fn new_page(&mut self) -> f64 {
        self.pages.push(PageContent::default());
        TOP_MARGIN
    }

    /// Page-break check run before a section: past the threshold the section
    /// starts on a fresh page.
    fn ensure_room(&mut self, cursor: f64, threshold: f64) -> f64 {
        if cursor > threshold {
            self.new_page()
        } else {
            cursor
        }
    }

    fn text(
        &mut self,
        x: f64,
        y: f64,
        size: f64,
        bold: bool,
        color: (u8, u8, u8),
        text: impl Into<String>,
    ) {
        let page = self.pages.last_mut().unwrap();
        page.ops.push(DrawOp::Text {
            x,
            y,
            size,
            bold,
            color,
            text: text.into(),
        });
    }

    fn text_centered(
        &mut self,
        cx: f64,
        y: f64,
        size: f64,
        bold: bool,
        color: (u8, u8, u8),
        text: impl Into<String>,
    ) {
        let text = text.into();
        let x = cx - text_width(&text, size) / 2.0;
        self.text(x, y, size, bold, color, text);
    }

    fn rule(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: (u8, u8, u8)) {
        let page = self.pages.last_mut().unwrap();
        page.ops.push(DrawOp::Rule { x1, y1, x2, y2, color });
    }

    fn heading(&mut self, cursor: f64, title: &str) -> f64 {
        self.text(MARGIN_LEFT, cursor, 14.0, false, HEADING_COLOR, title);
        cursor + 8.0
    }

    /// Wrapped text block at `x`; returns the cursor just past the last line.
    fn wrapped(
        &mut self,
        x: f64,
        cursor: f64,
        size: f64,
        color: (u8, u8, u8),
        lines: &[String],
        line_height: f64,
    ) -> f64 {
        for (i, line) in lines.iter().enumerate() {
            self.text(x, cursor + i as f64 * line_height, size, false, color, line);
        }
        cursor + lines.len() as f64 * line_height
    }

    /// Label/value grid with a header row. Returns the cursor at the bottom
    /// edge of the grid.
    fn table(
        &mut self,
        cursor: f64,
        headers: &[&str],
        rows: &[Vec<String>],
        widths: &[f64],
        font_size: f64,
    ) -> f64 {
        let top = cursor;
        let bottom = top + (rows.len() as f64 + 1.0) * ROW_HEIGHT;

        // Column x positions, left edge of each cell plus the right border.
        let mut edges = vec![MARGIN_LEFT];
        for w in widths {
            edges.push(edges.last().unwrap() + w);
        }

        for (c, header) in headers.iter().enumerate() {
            self.text(
                edges[c] + 2.0,
                top + 5.5,
                font_size,
                true,
                HEADING_COLOR,
                *header,
            );
        }
        for (r, row) in rows.iter().enumerate() {
            let row_top = top + (r as f64 + 1.0) * ROW_HEIGHT;
            for (c, cell) in row.iter().enumerate() {
                self.text(
                    edges[c] + 2.0,
                    row_top + 5.5,
                    font_size,
                    false,
                    BODY_COLOR,
                    cell,
                );
            }
        }

        // Grid lines.
        for r in 0..=(rows.len() + 1) {
            let y = top + r as f64 * ROW_HEIGHT;
            self.rule(edges[0], y, *edges.last().unwrap(), y, GRID_COLOR);
        }
        for x in &edges {
            self.rule(*x, top, *x, bottom, GRID_COLOR);
        }

        bottom
    }
}

/// Builds the complete page sequence for one report payload.
pub fn build_report_layout(report: &ReportPayload) -> ReportLayout {
    let indian = report.is_indian_listing();
    let mut pb = PageBuilder::new();

    let mut cursor = page_header(&mut pb, report);

    cursor = overview_section(&mut pb, report, indian, cursor);

    cursor = pb.ensure_room(cursor, 250.0);
    cursor = financials_section(&mut pb, report, indian, cursor);

    cursor = pb.ensure_room(cursor, 220.0);
    cursor = valuation_section(&mut pb, report, cursor);

    cursor = pb.ensure_room(cursor, 220.0);
    cursor = technicals_section(&mut pb, report, cursor);

    // AI insights always open a fresh page.
    cursor = pb.new_page();
    cursor = insights_section(&mut pb, report, cursor);

    if !report.peer_comparison.is_empty() {
        cursor = pb.ensure_room(cursor, 200.0);
        cursor = peers_section(&mut pb, report, indian, cursor);
    }

    if !report.news_analysis.is_empty() {
        cursor = pb.ensure_room(cursor, 180.0);
        news_section(&mut pb, report, cursor);
    }

    finalize(pb.pages)
}

fn page_header(pb: &mut PageBuilder, report: &ReportPayload) -> f64 {
    let title = if report.company_name.is_empty() {
        report.symbol.clone()
    } else {
        format!("{} ({})", report.company_name, report.symbol)
    };
    pb.text_centered(CENTER_X, 15.0, 20.0, false, HEADING_COLOR, title);
    pb.text_centered(
        CENTER_X,
        22.0,
        12.0,
        false,
        MUTED_COLOR,
        "Investment Analysis Report",
    );
    let date = if report.report_date.is_empty() {
        "N/A"
    } else {
        report.report_date.as_str()
    };
    pb.text_centered(
        CENTER_X,
        28.0,
        12.0,
        false,
        MUTED_COLOR,
        format!("Generated on: {}", date),
    );
    pb.rule(MARGIN_LEFT, 32.0, CONTENT_RIGHT, 32.0, GRID_COLOR);
    40.0
}

fn overview_section(
    pb: &mut PageBuilder,
    report: &ReportPayload,
    indian: bool,
    cursor: f64,
) -> f64 {
    let o = &report.overview;
    let mut cursor = pb.heading(cursor, "Company Overview");

    let rows = vec![
        vec!["Exchange".to_string(), format_text(o.exchange.as_deref())],
        vec!["Sector".to_string(), format_text(o.sector.as_deref())],
        vec!["Industry".to_string(), format_text(o.industry.as_deref())],
        vec!["Current Price".to_string(), format_plain(o.current_price)],
        vec![
            "Market Cap".to_string(),
            format_currency(o.market_cap, indian),
        ],
        vec![
            "52 Week High/Low".to_string(),
            format_text(o.high_low.as_deref()),
        ],
    ];
    cursor = pb.table(cursor, &["Parameter", "Value"], &rows, &[60.0, 110.0], 10.0)
        + SECTION_GAP;

    if let Some(description) = &o.description {
        pb.text(
            MARGIN_LEFT,
            cursor,
            11.0,
            false,
            BODY_COLOR,
            "Business Description:",
        );
        cursor += 6.0;
        let lines = wrap_text(description, CONTENT_WIDTH, 9.0);
        cursor = pb.wrapped(MARGIN_LEFT, cursor, 9.0, BODY_COLOR, &lines, LINE_HEIGHT) + 10.0;
    }
    cursor
}

fn financials_section(
    pb: &mut PageBuilder,
    report: &ReportPayload,
    indian: bool,
    cursor: f64,
) -> f64 {
    let f = &report.financials;
    let cursor = pb.heading(cursor, "Key Financial Metrics");

    let rows = vec![
        vec![
            "Revenue (TTM)".to_string(),
            format_currency(f.revenue, indian),
        ],
        vec![
            "Net Income (TTM)".to_string(),
            format_currency(f.net_income, indian),
        ],
        vec!["EPS (TTM)".to_string(), format_plain(f.eps)],
        vec!["Profit Margin".to_string(), format_percent(f.profit_margin)],
        vec!["ROE".to_string(), format_percent(f.roe)],
        vec!["Debt to Equity".to_string(), format_plain(f.debt_to_equity)],
    ];
    pb.table(cursor, &["Metric", "Value"], &rows, &[60.0, 110.0], 10.0) + SECTION_GAP
}

fn valuation_section(pb: &mut PageBuilder, report: &ReportPayload, cursor: f64) -> f64 {
    let v = &report.valuation;
    let cursor = pb.heading(cursor, "Valuation Metrics");

    let rows = vec![
        vec!["P/E Ratio".to_string(), format_plain(v.pe)],
        vec!["Forward P/E".to_string(), format_plain(v.forward_pe)],
        vec!["PEG Ratio".to_string(), format_plain(v.peg_ratio)],
        vec!["Price to Book".to_string(), format_plain(v.price_to_book)],
        vec!["Price to Sales".to_string(), format_plain(v.price_to_sales)],
        vec!["EV/EBITDA".to_string(), format_plain(v.ev_to_ebitda)],
    ];
    pb.table(cursor, &["Metric", "Value"], &rows, &[60.0, 110.0], 10.0) + SECTION_GAP
}

fn technicals_section(pb: &mut PageBuilder, report: &ReportPayload, cursor: f64) -> f64 {
    let t = &report.technicals;
    let cursor = pb.heading(cursor, "Technical Analysis");

    let rows = vec![
        vec!["RSI (14)".to_string(), format_plain(t.rsi)],
        vec!["MACD".to_string(), format_plain(t.macd)],
        vec!["Moving Avg (50)".to_string(), format_plain(t.ma50)],
        vec!["Moving Avg (200)".to_string(), format_plain(t.ma200)],
        vec!["Volume (Avg)".to_string(), format_grouped(t.avg_volume)],
        vec!["Beta".to_string(), format_plain(t.beta)],
    ];
    pb.table(cursor, &["Indicator", "Value"], &rows, &[60.0, 110.0], 10.0) + SECTION_GAP
}

fn insights_section(pb: &mut PageBuilder, report: &ReportPayload, cursor: f64) -> f64 {
    let ai = &report.ai_insights;
    let mut cursor = pb.heading(cursor, "AI-Generated Investment Insights");

    pb.text(
        MARGIN_LEFT,
        cursor,
        11.0,
        false,
        TEXT_COLOR,
        "Executive Summary:",
    );
    cursor += 6.0;
    let summary = ai.summary.as_deref().unwrap_or("No AI insights available.");
    let lines = wrap_text(summary, CONTENT_WIDTH, 10.0);
    cursor = pb.wrapped(MARGIN_LEFT, cursor, 10.0, TEXT_COLOR, &lines, LINE_HEIGHT) + 8.0;

    if !ai.strengths.is_empty() {
        pb.text(MARGIN_LEFT, cursor, 11.0, false, TEXT_COLOR, "Key Strengths:");
        cursor += 6.0;
        for strength in &ai.strengths {
            let lines = wrap_text(&format!("\u{2022} {}", strength), CONTENT_WIDTH, 10.0);
            cursor = pb.wrapped(MARGIN_LEFT, cursor, 10.0, TEXT_COLOR, &lines, LINE_HEIGHT) + 2.0;
        }
        cursor += 4.0;
    }

    if !ai.risks.is_empty() {
        pb.text(MARGIN_LEFT, cursor, 11.0, false, TEXT_COLOR, "Key Risks:");
        cursor += 6.0;
        for risk in &ai.risks {
            let lines = wrap_text(&format!("\u{2022} {}", risk), CONTENT_WIDTH, 10.0);
            cursor = pb.wrapped(MARGIN_LEFT, cursor, 10.0, TEXT_COLOR, &lines, LINE_HEIGHT) + 2.0;
        }
        cursor += 4.0;
    }

    cursor = pb.ensure_room(cursor, 240.0);
    pb.text(
        MARGIN_LEFT,
        cursor,
        11.0,
        false,
        TEXT_COLOR,
        "Investment Recommendation:",
    );
    cursor += 6.0;
    let recommendation = ai
        .recommendation
        .as_deref()
        .unwrap_or("No recommendation available.");
    let lines = wrap_text(recommendation, CONTENT_WIDTH, 10.0);
    pb.wrapped(MARGIN_LEFT, cursor, 10.0, TEXT_COLOR, &lines, LINE_HEIGHT) + 8.0
}

fn peers_section(
    pb: &mut PageBuilder,
    report: &ReportPayload,
    indian: bool,
    cursor: f64,
) -> f64 {
    let cursor = pb.heading(cursor, "Peer Comparison");

    let rows: Vec<Vec<String>> = report
        .peer_comparison
        .iter()
        .map(|peer| {
            vec![
                format_text(peer.name.as_deref()),
                format_plain(peer.price),
                format_plain(peer.pe),
                format_currency(peer.market_cap, indian),
                format_percent(peer.roe),
            ]
        })
        .collect();

    pb.table(
        cursor,
        &["Company", "Price", "P/E", "Market Cap", "ROE"],
        &rows,
        &[58.0, 26.0, 22.0, 40.0, 24.0],
        9.0,
    ) + SECTION_GAP
}

fn news_section(pb: &mut PageBuilder, report: &ReportPayload, cursor: f64) -> f64 {
    let mut cursor = pb.heading(cursor, "Recent News Analysis");

    for (i, news) in report.news_analysis.iter().take(5).enumerate() {
        let lines = wrap_text(&format!("{}. {}", i + 1, news.title), CONTENT_WIDTH, 10.0);
        cursor = pb.wrapped(MARGIN_LEFT, cursor, 10.0, TEXT_COLOR, &lines, LINE_HEIGHT) + 2.0;

        pb.text(
            MARGIN_LEFT,
            cursor,
            9.0,
            false,
            MUTED_COLOR,
            format!("Date: {} | Sentiment: {}", news.date, news.sentiment),
        );
        cursor += 5.0;

        if let Some(summary) = &news.summary {
            let lines = wrap_text(summary, CONTENT_WIDTH, 8.0);
            cursor = pb.wrapped(
                MARGIN_LEFT,
                cursor,
                8.0,
                MUTED_COLOR,
                &lines,
                SMALL_LINE_HEIGHT,
            ) + 6.0;
        } else {
            cursor += 6.0;
        }
    }
    cursor
}

/// Footer pass over the finished page sequence.
fn finalize(mut pages: Vec<PageContent>) -> ReportLayout {
    let total = pages.len();
    let mut pb = PageBuilder { pages: Vec::new() };

    for (i, page) in pages.drain(..).enumerate() {
        pb.pages.push(page);
        pb.text_centered(
            CENTER_X,
            FOOTER_Y,
            8.0,
            false,
            FOOTER_COLOR,
            format!("Page {} of {}", i + 1, total),
        );
        if i + 1 == total {
            let lines = wrap_text(DISCLAIMER, CONTENT_WIDTH, 8.0);
            for (j, line) in lines.iter().enumerate() {
                pb.text_centered(
                    CENTER_X,
                    DISCLAIMER_Y + j as f64 * SMALL_LINE_HEIGHT,
                    8.0,
                    false,
                    FOOTER_COLOR,
                    line.clone(),
                );
            }
        }
    }

    ReportLayout { pages: pb.pages }
}
