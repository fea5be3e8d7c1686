//! Value formatting for report rows.
//!
//! Every helper resolves an optional field to a display string, falling back
//! to the literal "N/A" when the value is absent. Currency formatting is
//! locale-dependent in symbol and unit label only: Indian listings render as
//! `₹{en-IN grouped} Cr`, everything else as `${en-US grouped} M`. The
//! numeric magnitude is passed through unchanged.

pub const NOT_AVAILABLE: &str = "N/A";

/// Currency with locale-dependent symbol and unit label.
pub fn format_currency(value: Option<f64>, indian: bool) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(v) if indian => format!("₹{} Cr", group_number(v, true)),
        Some(v) => format!("${} M", group_number(v, false)),
    }
}

/// Plain number with en-US thousands grouping (average volume).
pub fn format_grouped(value: Option<f64>) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(v) => group_number(v, false),
    }
}

/// Raw numeric value, e.g. ratios and prices.
pub fn format_plain(value: Option<f64>) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(v) => plain(v),
    }
}

/// Percentage: the value is already in percent units, only "%" is appended.
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(v) => format!("{}%", plain(v)),
    }
}

pub fn format_text(value: Option<&str>) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(s) => s.to_string(),
    }
}

fn plain(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

/// Digit grouping. Western grouping inserts a separator every three digits;
/// Indian grouping separates the last three digits, then every two
/// (25,00,000 for 2500000).
fn group_number(v: f64, indian: bool) -> String {
    // Two fraction digits, trailing zeros trimmed.
    let s = format!("{:.2}", v.abs());
    let (int_digits, frac_digits) = s.split_once('.').unwrap_or((s.as_str(), ""));

    let grouped = if indian {
        group_indian(int_digits)
    } else {
        group_western(int_digits)
    };

    let mut out = String::new();
    if v < 0.0 {
        out.push('-');
    }
    out.push_str(&grouped);

    let frac = frac_digits.trim_end_matches('0');
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_western(digits: &str) -> String {
    let mut out = String::new();
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn group_indian(digits: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(len - 3);

    // Head gets two-digit groups, right to left.
    let mut out = String::new();
    let head_len = head.len();
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (head_len - i) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(tail);
    out
}
