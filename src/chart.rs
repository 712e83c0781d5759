//! Series behind the weekly price chart of the selected product.

use serde::Serialize;

use crate::i18n::{label, Label, Language};
use crate::models::ProductWithPrices;
use crate::weeks::{format_week_label, WeekCalendar};

/// Which datasets the chart draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMode {
    #[default]
    All,
    Price,
    Change,
}

impl ChartMode {
    pub fn shows_price(self) -> bool {
        matches!(self, ChartMode::All | ChartMode::Price)
    }

    pub fn shows_change(self) -> bool {
        matches!(self, ChartMode::All | ChartMode::Change)
    }
}

/// Bars of weekly prices plus a line of percent vs. reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub product_id: String,
    pub weeks: Vec<u32>,
    pub labels: Vec<String>,
    pub prices: Vec<f64>,
    /// Rounded to two decimals; all 0 when the reference price is 0.
    pub percent_vs_reference: Vec<f64>,
    pub reference_price: f64,
    pub price_label: &'static str,
    pub change_label: &'static str,
    pub reference_label: &'static str,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

/// Series for `product` up to and including `week`; later weeks are not
/// drawn so that selecting week 1 shows week 1 alone.
pub fn chart_series(
    product: &ProductWithPrices,
    week: u32,
    language: Language,
    calendar: &WeekCalendar,
) -> ChartSeries {
    let reference = product.product.reference_price;
    let mut points: Vec<_> = product
        .prices
        .iter()
        .filter(|p| p.week_number <= week)
        .collect();
    points.sort_by_key(|p| p.week_number);

    let prices: Vec<f64> = points.iter().map(|p| p.price).collect();
    let percent_vs_reference = prices
        .iter()
        .map(|price| {
            if reference == 0.0 {
                0.0
            } else {
                round2((price - reference) / reference * 100.0)
            }
        })
        .collect();

    ChartSeries {
        product_id: product.id().to_string(),
        weeks: points.iter().map(|p| p.week_number).collect(),
        labels: points
            .iter()
            .map(|p| format_week_label(p.week_number, language, p.week_date.as_deref(), calendar))
            .collect(),
        prices,
        percent_vs_reference,
        reference_price: reference,
        price_label: label(language, Label::WeeklyPrice),
        change_label: label(language, Label::ChangeVsIndicative),
        reference_label: label(language, Label::IndicativePrice),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// File name for a downloaded chart image.
pub fn chart_file_name(product: &ProductWithPrices, week: u32) -> String {
    format!("chart_{}_week{}.png", product.id(), week)
}
