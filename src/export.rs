//! Downloadable table of the visible products at one week.
//!
//! Rows carry already formatted text. A missing previous week is written as
//! the localized NA marker in all three previous-week columns, never as 0.

use serde::Serialize;

use crate::i18n::{label, Label, Language};
use crate::metrics;
use crate::models::ProductWithPrices;

/// One exported line, one formatted cell per column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub commodity: String,
    pub week: String,
    pub weekly_price: String,
    pub reference_price: String,
    pub percent_vs_reference: String,
    pub diff_vs_reference: String,
    pub previous_price: String,
    pub percent_vs_previous: String,
    pub diff_vs_previous: String,
}

impl ExportRow {
    pub fn cells(&self) -> [&str; 9] {
        [
            self.commodity.as_str(),
            self.week.as_str(),
            self.weekly_price.as_str(),
            self.reference_price.as_str(),
            self.percent_vs_reference.as_str(),
            self.diff_vs_reference.as_str(),
            self.previous_price.as_str(),
            self.percent_vs_previous.as_str(),
            self.diff_vs_previous.as_str(),
        ]
    }
}

pub fn export_headers(language: Language) -> [&'static str; 9] {
    [
        Label::ColCommodity,
        Label::ColWeek,
        Label::ColWeeklyPrice,
        Label::ColIndicativePrice,
        Label::ColChangeVsIndicativePct,
        Label::ColChangeVsIndicativeAbs,
        Label::ColPreviousWeekPrice,
        Label::ColChangeVsPreviousPct,
        Label::ColChangeVsPreviousAbs,
    ]
    .map(|key| label(language, key))
}

/// Rows for `visible` at `week`, in the given order.
pub fn export_rows(
    visible: &[&ProductWithPrices],
    week: u32,
    language: Language,
) -> Vec<ExportRow> {
    let na = label(language, Label::NotApplicable);

    visible
        .iter()
        .map(|&product| {
            let change = metrics::compute_change(product, week);
            let (previous_price, percent_vs_previous, diff_vs_previous) =
                match change.previous_price {
                    Some(prev) => (
                        fixed(prev, 2),
                        fixed(change.percent_vs_previous.unwrap_or(0.0), 1),
                        fixed(change.diff_vs_previous.unwrap_or(0.0), 2),
                    ),
                    None => (na.to_string(), na.to_string(), na.to_string()),
                };

            ExportRow {
                commodity: product.name().to_string(),
                week: week.to_string(),
                weekly_price: fixed(change.current_price, 2),
                reference_price: fixed(change.reference_price, 2),
                percent_vs_reference: fixed(change.percent_vs_reference, 1),
                diff_vs_reference: fixed(change.diff_vs_reference, 2),
                previous_price,
                percent_vs_previous,
                diff_vs_previous,
            }
        })
        .collect()
}

/// Render rows as a UTF-8 HTML table that spreadsheet programs open
/// directly. Starts with a byte-order mark; Arabic tables are right-to-left.
pub fn export_html(rows: &[ExportRow], language: Language) -> String {
    let dir = if language.is_rtl() { "rtl" } else { "ltr" };

    let mut html = String::from("\u{feff}");
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"utf-8\" /></head><body>");
    html.push_str(&format!("<table dir=\"{}\" border=\"1\">", dir));

    html.push_str("<thead><tr>");
    for header in export_headers(language) {
        html.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    html.push_str("</tr></thead><tbody>");

    for row in rows {
        html.push_str("<tr>");
        for cell in row.cells() {
            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        html.push_str("</tr>");
    }

    html.push_str("</tbody></table></body></html>");
    html
}

pub fn export_file_name(week: u32, language: Language) -> String {
    format!("ramadan_prices_week_{}_{}.xls", week, language.code())
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Fixed-point text with `decimals` places; negative zero prints as zero.
pub fn fixed(value: f64, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        text[1..].to_string()
    } else {
        text
    }
}

/// `+1.5%`, `−1.5%` (with U+2212) or `0.0%`.
pub fn format_signed_percent(value: f64, decimals: usize) -> String {
    let sign = if value > 0.0 {
        "+"
    } else if value < 0.0 {
        "\u{2212}"
    } else {
        ""
    };
    format!("{}{}%", sign, fixed(value.abs(), decimals))
}
