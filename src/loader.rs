//! Builds the product model from the two published tables.
//!
//! Both tables are fetched at the same time, parsed, coerced field by field,
//! and joined: products are ordered by display rank and each one receives
//! its weekly points in ascending week order. Unusable rows are dropped
//! silently; the load as a whole fails only when a fetch fails or nothing
//! usable remains, and [`load_or_sample`] turns that failure into the
//! built-in sample dataset.

use std::collections::{BTreeMap, HashMap};
use std::thread;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::error::{MonitorError, Result};
use crate::i18n::{label, Label, Language};
use crate::icons;
use crate::models::{Product, ProductWithPrices, WeeklyPricePoint};
use crate::sample;
use crate::source::DataSource;
use crate::tabular::{self, Row};

// ---------------------------------------------------------------------------
// Raw records, one per table row, every column as text
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProductRecord {
    id: String,
    name_ar: String,
    name_en: String,
    unit_ar: String,
    unit_en: String,
    icon: String,
    color: String,
    reference_price: String,
    display_order: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PriceRecord {
    product_id: String,
    week_number: String,
    price: String,
    week_date: String,
}

fn to_record<T: DeserializeOwned>(row: Row) -> Result<T> {
    Ok(serde_json::from_value(serde_json::to_value(row)?)?)
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

/// Read a number out of loosely formatted text.
///
/// Every character except ASCII digits, `.`, `+` and `-` is removed first,
/// so `"12,345.6 ₪"` reads as `12345.6`. Text that still does not parse,
/// or parses to a non-finite value, yields `fallback`.
pub fn coerce_number(raw: &str, fallback: f64) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'))
        .collect();
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => fallback,
    }
}

/// Prices and reference prices: 0 when unreadable or negative.
pub fn coerce_price(raw: &str) -> f64 {
    let n = coerce_number(raw, 0.0);
    if n < 0.0 {
        0.0
    } else {
        n
    }
}

/// Display rank; unreadable or zero ranks sort last.
pub fn coerce_display_order(raw: &str) -> f64 {
    let n = coerce_number(raw, 0.0);
    if n == 0.0 {
        config::MISSING_DISPLAY_ORDER
    } else {
        n
    }
}

/// Week number, `None` unless it reads as a whole number of at least 1.
pub fn coerce_week(raw: &str) -> Option<u32> {
    let n = coerce_number(raw, 0.0);
    if n >= 1.0 && n.fract() == 0.0 && n <= u32::MAX as f64 {
        Some(n as u32)
    } else {
        None
    }
}

fn optional_text(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

// ---------------------------------------------------------------------------
// Table conversion
// ---------------------------------------------------------------------------

/// Products table rows, labels resolved for `language`. Rows without an id
/// are dropped. Order is the table order.
pub fn parse_products(text: &str, language: Language) -> Result<Vec<Product>> {
    let rows = tabular::parse(text);
    let total = rows.len();
    let mut products = Vec::with_capacity(total);

    for row in rows {
        let rec: ProductRecord = to_record(row)?;
        let id = rec.id.trim().to_string();
        if id.is_empty() {
            continue;
        }

        let name = language.pick(&rec.name_ar, &rec.name_en).to_string();
        let unit = language.pick(&rec.unit_ar, &rec.unit_en).to_string();
        products.push(Product {
            icon: icons::resolve_icon(&rec.icon, &name),
            color: icons::resolve_color(&rec.color, &name),
            id,
            name,
            unit,
            reference_price: coerce_price(&rec.reference_price),
            display_order: coerce_display_order(&rec.display_order),
        });
    }

    let dropped = total - products.len();
    if dropped > 0 {
        tracing::debug!(dropped, "dropped product rows without an id");
    }
    Ok(products)
}

/// Weekly price rows. Rows without a product id or a usable week are dropped.
pub fn parse_prices(text: &str) -> Result<Vec<WeeklyPricePoint>> {
    let rows = tabular::parse(text);
    let total = rows.len();
    let mut points = Vec::with_capacity(total);

    for row in rows {
        let rec: PriceRecord = to_record(row)?;
        let product_id = rec.product_id.trim().to_string();
        let Some(week_number) = coerce_week(&rec.week_number) else {
            continue;
        };
        if product_id.is_empty() {
            continue;
        }
        points.push(WeeklyPricePoint {
            product_id,
            week_number,
            price: coerce_price(&rec.price),
            week_date: optional_text(&rec.week_date),
        });
    }

    let dropped = total - points.len();
    if dropped > 0 {
        tracing::debug!(dropped, "dropped price rows without a product or week");
    }
    Ok(points)
}

/// Attach price points to products.
///
/// Products are stably sorted by display rank, so equal ranks keep table
/// order. Each product gets its points ascending by week; when the same
/// (product, week) pair appears more than once the row that comes last in
/// the table wins. Points for unknown products are ignored.
pub fn join(mut products: Vec<Product>, points: Vec<WeeklyPricePoint>) -> Vec<ProductWithPrices> {
    let mut by_product: HashMap<String, BTreeMap<u32, WeeklyPricePoint>> = HashMap::new();
    for point in points {
        by_product
            .entry(point.product_id.clone())
            .or_default()
            .insert(point.week_number, point);
    }

    products.sort_by(|a, b| a.display_order.total_cmp(&b.display_order));

    products
        .into_iter()
        .map(|product| {
            let prices = by_product
                .get(&product.id)
                .map(|weeks| weeks.values().cloned().collect())
                .unwrap_or_default();
            ProductWithPrices { product, prices }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Build the model from already-fetched table text.
///
/// Fails with [`MonitorError::SourceUnavailable`] when no product survives.
pub fn load_from_text(
    products_csv: &str,
    prices_csv: &str,
    language: Language,
) -> Result<Vec<ProductWithPrices>> {
    let products = parse_products(products_csv, language)?;
    let points = parse_prices(prices_csv)?;
    tracing::debug!(
        products = products.len(),
        points = points.len(),
        "parsed price tables"
    );

    let joined = join(products, points);
    if joined.is_empty() {
        return Err(MonitorError::SourceUnavailable(
            "the products table has no usable rows".into(),
        ));
    }
    Ok(joined)
}

/// Fetch both tables concurrently and build the model.
///
/// Any fetch failure, including a non-success HTTP status, is reported as
/// [`MonitorError::SourceUnavailable`].
pub fn load(source: &dyn DataSource, language: Language) -> Result<Vec<ProductWithPrices>> {
    let (products_csv, prices_csv) = fetch_both(source)?;
    let products = load_from_text(&products_csv, &prices_csv, language)?;
    tracing::info!(
        source = %source.describe(),
        products = products.len(),
        %language,
        "loaded price tables"
    );
    Ok(products)
}

fn fetch_both(source: &dyn DataSource) -> Result<(String, String)> {
    let (products, prices) = thread::scope(|s| {
        let products = s.spawn(|| source.fetch(config::PRODUCTS_FILE));
        let prices = s.spawn(|| source.fetch(config::WEEKLY_PRICES_FILE));
        (
            settle(products.join(), config::PRODUCTS_FILE),
            settle(prices.join(), config::WEEKLY_PRICES_FILE),
        )
    });
    Ok((products?, prices?))
}

fn settle(joined: thread::Result<Result<String>>, file: &str) -> Result<String> {
    match joined {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(MonitorError::SourceUnavailable(format!("{}: {}", file, e))),
        Err(_) => Err(MonitorError::SourceUnavailable(format!(
            "{}: fetch thread panicked",
            file
        ))),
    }
}

/// Load from `source`, substituting the sample dataset on any failure.
pub fn load_or_sample(source: &dyn DataSource, language: Language) -> Dataset {
    match load(source, language) {
        Ok(products) => Dataset::remote(products),
        Err(e) => {
            tracing::warn!(
                source = %source.describe(),
                error = %e,
                "price tables unavailable, showing sample data"
            );
            Dataset::sample(language)
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataOrigin {
    Remote,
    Sample,
}

/// A complete product model and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub products: Vec<ProductWithPrices>,
    pub origin: DataOrigin,
}

impl Dataset {
    pub fn remote(products: Vec<ProductWithPrices>) -> Self {
        Self {
            products,
            origin: DataOrigin::Remote,
        }
    }

    pub fn sample(language: Language) -> Self {
        Self {
            products: sample::sample_products(language),
            origin: DataOrigin::Sample,
        }
    }

    pub fn is_sample(&self) -> bool {
        self.origin == DataOrigin::Sample
    }

    /// Highest week with any price, or 1 for an empty model. This is the
    /// week shown right after a load.
    pub fn latest_week(&self) -> u32 {
        self.products
            .iter()
            .filter_map(|p| p.latest_week())
            .max()
            .unwrap_or(1)
            .max(1)
    }

    /// The degraded-mode notice, shown only for sample data.
    pub fn notice(&self, language: Language) -> Option<&'static str> {
        self.is_sample()
            .then(|| label(language, Label::SampleDataNotice))
    }
}
