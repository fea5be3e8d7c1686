use equity_report::models::{
    AiInsights, Financials, NewsItem, Overview, PeerCompany, ReportPayload, Technicals, Valuation,
};
use equity_report::pdf::layout::{build_report_layout, ReportLayout, DISCLAIMER};

fn full_payload(symbol: &str) -> ReportPayload {
    ReportPayload {
        symbol: symbol.to_string(),
        company_name: "Apple Inc.".to_string(),
        report_date: "12 Apr 2025".to_string(),
        overview: Overview {
            exchange: Some("NASDAQ".to_string()),
            sector: Some("Technology".to_string()),
            industry: Some("Consumer Electronics".to_string()),
            current_price: Some(189.84),
            market_cap: Some(2_500_000.0),
            high_low: Some("199.62 - 164.08".to_string()),
            description: Some(
                "Apple Inc. designs, manufactures, and markets smartphones, personal \
                 computers, tablets, wearables, and accessories worldwide."
                    .to_string(),
            ),
        },
        fundamentals: None,
        valuation: Valuation {
            pe: Some(29.5),
            forward_pe: Some(26.1),
            peg_ratio: Some(2.2),
            price_to_book: Some(44.6),
            price_to_sales: Some(7.3),
            ev_to_ebitda: Some(22.4),
        },
        technicals: Technicals {
            rsi: Some(55.2),
            macd: Some(1.3),
            ma50: Some(182.5),
            ma200: Some(175.9),
            avg_volume: Some(58_234_100.0),
            beta: Some(1.28),
        },
        financials: Financials {
            revenue: Some(383_285.0),
            net_income: Some(96_995.0),
            eps: Some(6.13),
            profit_margin: Some(25.3),
            roe: Some(147.4),
            debt_to_equity: Some(1.78),
        },
        news_analysis: vec![
            NewsItem {
                title: "Quarterly results beat expectations".to_string(),
                date: "10 Apr 2025".to_string(),
                sentiment: "positive".to_string(),
                summary: Some("Revenue and earnings both came in above consensus.".to_string()),
            },
            NewsItem {
                title: "New product line announced".to_string(),
                date: "08 Apr 2025".to_string(),
                sentiment: "positive".to_string(),
                summary: None,
            },
        ],
        ai_insights: AiInsights {
            summary: Some("Strong franchise with durable cash flows.".to_string()),
            strengths: vec![
                "Leading brand loyalty".to_string(),
                "High-margin services segment".to_string(),
            ],
            risks: vec![
                "Hardware demand cyclicality".to_string(),
                "Regulatory pressure on app store economics".to_string(),
            ],
            recommendation: Some("Hold with a positive bias.".to_string()),
        },
        peer_comparison: vec![
            PeerCompany {
                name: Some("Microsoft".to_string()),
                price: Some(410.2),
                pe: Some(35.1),
                market_cap: Some(3_050_000.0),
                roe: Some(38.5),
            },
            PeerCompany {
                name: Some("Alphabet".to_string()),
                price: Some(158.7),
                pe: Some(26.4),
                market_cap: Some(1_980_000.0),
                roe: Some(29.8),
            },
        ],
    }
}

fn all_texts(layout: &ReportLayout) -> Vec<String> {
    layout
        .pages
        .iter()
        .flat_map(|p| p.texts().map(|t| t.to_string()))
        .collect()
}

#[test]
fn test_full_payload_has_no_na_tokens() {
    let layout = build_report_layout(&full_payload("AAPL"));
    for text in all_texts(&layout) {
        assert!(!text.contains("N/A"), "unexpected N/A in: {}", text);
    }
}

#[test]
fn test_absent_field_renders_na_without_panic() {
    let mut payload = full_payload("AAPL");
    payload.overview.sector = None;
    let layout = build_report_layout(&payload);
    let na_count = all_texts(&layout).iter().filter(|t| *t == "N/A").count();
    assert_eq!(na_count, 1, "exactly the missing field renders N/A");
}

#[test]
fn test_every_page_stamped_exactly_once() {
    let layout = build_report_layout(&full_payload("AAPL"));
    let total = layout.pages.len();
    for (i, page) in layout.pages.iter().enumerate() {
        let expected = format!("Page {} of {}", i + 1, total);
        let stamps: Vec<_> = page.texts().filter(|t| t.starts_with("Page ")).collect();
        assert_eq!(stamps, vec![expected.as_str()], "page {} footer", i + 1);
    }
}

#[test]
fn test_disclaimer_only_on_last_page() {
    let layout = build_report_layout(&full_payload("AAPL"));
    let last = layout.pages.len() - 1;
    for (i, page) in layout.pages.iter().enumerate() {
        let has_disclaimer = page.texts().any(|t| t.starts_with("Disclaimer:"));
        assert_eq!(has_disclaimer, i == last, "page {}", i + 1);
    }
    // The wrapped disclaimer reassembles to the fixed string.
    let rebuilt = layout.pages[last]
        .texts()
        .skip_while(|t| !t.starts_with("Disclaimer:"))
        .take_while(|t| !t.starts_with("Page "))
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(rebuilt, DISCLAIMER);
}

#[test]
fn test_currency_labels_follow_listing_suffix() {
    let us = build_report_layout(&full_payload("AAPL"));
    let indian = build_report_layout(&full_payload("INFY.NS"));

    let us_texts = all_texts(&us);
    let in_texts = all_texts(&indian);

    assert!(us_texts.iter().any(|t| t == "$2,500,000 M"), "US market cap");
    assert!(
        in_texts.iter().any(|t| t == "₹25,00,000 Cr"),
        "Indian market cap"
    );
}

#[test]
fn test_news_capped_at_five_items() {
    let mut payload = full_payload("AAPL");
    payload.news_analysis = (1..=7)
        .map(|i| NewsItem {
            title: format!("Headline {}", i),
            date: "01 Apr 2025".to_string(),
            sentiment: "neutral".to_string(),
            summary: None,
        })
        .collect();

    let layout = build_report_layout(&payload);
    let texts = all_texts(&layout);
    let rendered = texts
        .iter()
        .filter(|t| t.starts_with("Date: "))
        .count();
    assert_eq!(rendered, 5);
    assert!(texts.iter().any(|t| t.contains("5. Headline 5")));
    assert!(!texts.iter().any(|t| t.contains("6. Headline 6")));
}

#[test]
fn test_empty_sections_are_skipped() {
    let mut payload = full_payload("AAPL");
    payload.peer_comparison.clear();
    payload.news_analysis.clear();
    let layout = build_report_layout(&payload);
    let texts = all_texts(&layout);
    assert!(!texts.iter().any(|t| t == "Peer Comparison"));
    assert!(!texts.iter().any(|t| t == "Recent News Analysis"));
}

#[test]
fn test_insights_start_on_fresh_page() {
    let layout = build_report_layout(&full_payload("AAPL"));
    let page = layout
        .pages
        .iter()
        .position(|p| p.texts().any(|t| t == "AI-Generated Investment Insights"))
        .expect("insights section present");
    assert!(page >= 1, "insights never share page one with the header");
    let first_heading = layout.pages[page]
        .texts()
        .find(|t| !t.starts_with("Page ") && !t.starts_with("Disclaimer:"))
        .unwrap();
    assert_eq!(first_heading, "AI-Generated Investment Insights");
}

#[test]
fn test_long_content_paginates_with_correct_footers() {
    let mut payload = full_payload("AAPL");
    payload.overview.description = Some("A very long business description. ".repeat(60));
    payload.ai_insights.strengths = (0..20)
        .map(|i| format!("Strength number {} with some elaboration attached", i))
        .collect();
    payload.ai_insights.risks = (0..20)
        .map(|i| format!("Risk number {} with some elaboration attached", i))
        .collect();

    let layout = build_report_layout(&payload);
    assert!(layout.pages.len() >= 3, "long content should paginate");

    let total = layout.pages.len();
    for (i, page) in layout.pages.iter().enumerate() {
        let stamps = page.texts().filter(|t| t.starts_with("Page ")).count();
        assert_eq!(stamps, 1, "page {} of {}", i + 1, total);
    }
}
