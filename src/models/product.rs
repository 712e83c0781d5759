use serde::{Deserialize, Serialize};

use super::price::WeeklyPricePoint;

// ---------------------------------------------------------------------------
// Product - One monitored commodity, labels already resolved for a language
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Product {
    /// Source code, kept verbatim (leading zeros are significant).
    pub id: String,
    pub name: String,
    /// Unit or weight label, e.g. "1 kg".
    pub unit: String,
    /// Indicative price every percentage is measured against.
    pub reference_price: f64,
    /// Ascending sort key; fractional ranks are allowed.
    pub display_order: f64,
    pub icon: String,
    pub color: String,
}

// ---------------------------------------------------------------------------
// ProductWithPrices - A product and its weekly series, ascending by week
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProductWithPrices {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default)]
    pub prices: Vec<WeeklyPricePoint>,
}

impl ProductWithPrices {
    pub fn id(&self) -> &str {
        &self.product.id
    }

    pub fn name(&self) -> &str {
        &self.product.name
    }

    /// The point recorded for exactly `week`, if any.
    pub fn point_at(&self, week: u32) -> Option<&WeeklyPricePoint> {
        self.prices.iter().find(|p| p.week_number == week)
    }

    pub fn price_at(&self, week: u32) -> Option<f64> {
        self.point_at(week).map(|p| p.price)
    }

    /// Highest week number with a recorded price.
    pub fn latest_week(&self) -> Option<u32> {
        self.prices.iter().map(|p| p.week_number).max()
    }
}
