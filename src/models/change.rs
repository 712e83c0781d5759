use serde::{Deserialize, Serialize};

use super::product::ProductWithPrices;
use crate::config;

// ---------------------------------------------------------------------------
// ChangeCategory - Direction of a change, with a noise deadband
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCategory {
    Increase,
    Decrease,
    Stable,
}

impl ChangeCategory {
    /// Classify a percent change: beyond +/-0.5 is a move, anything inside
    /// the band is stable.
    pub fn of(percent: f64) -> Self {
        if percent > config::STABLE_DEADBAND {
            ChangeCategory::Increase
        } else if percent < -config::STABLE_DEADBAND {
            ChangeCategory::Decrease
        } else {
            ChangeCategory::Stable
        }
    }
}

// ---------------------------------------------------------------------------
// PriceChange - Derived view of one product at one week
// ---------------------------------------------------------------------------

/// Price deltas of a product at a given week.
///
/// Borrowed from the loaded model and rebuilt on every computation; nothing
/// here is cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PriceChange<'a> {
    pub product: &'a ProductWithPrices,
    pub week: u32,
    /// Price at the week, 0 when the week has no point.
    pub current_price: f64,
    pub reference_price: f64,
    pub diff_vs_reference: f64,
    pub percent_vs_reference: f64,
    /// Price at the week before; absent for week 1 or a missing point.
    pub previous_price: Option<f64>,
    pub diff_vs_previous: Option<f64>,
    /// Absent when there is no previous price or it is 0.
    pub percent_vs_previous: Option<f64>,
    pub category: ChangeCategory,
}

impl<'a> PriceChange<'a> {
    /// Borrowed from the model, so it outlives this change.
    pub fn product_id(&self) -> &'a str {
        self.product.id()
    }

    pub fn is_large_change(&self) -> bool {
        self.percent_vs_reference.abs() > config::LARGE_CHANGE_PERCENT
    }
}

// ---------------------------------------------------------------------------
// Extremes - KPI aggregate across all products at one week
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Extremes<'a> {
    pub max_increase: Option<PriceChange<'a>>,
    pub max_decrease: Option<PriceChange<'a>>,
}
