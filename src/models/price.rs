use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// WeeklyPricePoint - Observed price of one product in one reporting week
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WeeklyPricePoint {
    pub product_id: String,
    /// 1-based reporting week.
    pub week_number: u32,
    pub price: f64,
    /// Free-form date label published with the week, e.g. "08/02".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub week_date: Option<String>,
}
