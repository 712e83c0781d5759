use std::time::Duration;

/// Products table, relative to the data location.
pub const PRODUCTS_FILE: &str = "products.csv";
/// Weekly prices table, relative to the data location.
pub const WEEKLY_PRICES_FILE: &str = "weekly_prices.csv";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Sent with every fetch; the tables are republished weekly in place.
pub const CACHE_CONTROL: &str = "no-store";

/// Icon token the source uses when nobody picked one.
pub const SENTINEL_ICON: &str = "fa-box";
/// Color token the source uses when nobody picked one.
pub const SENTINEL_COLOR: &str = "#0056b3";

pub const GENERIC_ICON: &str = "fa-box";
pub const GENERIC_COLOR: &str = "#0EA5E9";

/// Rank given to products without a usable display order.
pub const MISSING_DISPLAY_ORDER: f64 = 9999.0;

/// Percent changes within +/- this band count as stable.
pub const STABLE_DEADBAND: f64 = 0.5;

/// Cards flag changes vs. the reference price above this many percent.
pub const LARGE_CHANGE_PERCENT: f64 = 5.0;

/// Number of weeks offered by the week selector.
pub const WEEK_OPTIONS: u32 = 10;

/// Comma-separated ISO dates, one per week, e.g. `2026-02-08,2026-02-15`.
pub const WEEK_STARTS_ENV: &str = "WEEK_STARTS";
