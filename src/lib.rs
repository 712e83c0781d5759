//! Ramadan commodity price monitor.
//!
//! Loads the weekly consumer-price tables published by the statistics
//! bureau (a products table and a weekly prices table, both CSV), joins them
//! into per-product price series, and derives what a dashboard shows: price
//! changes against the indicative price and the previous week, the largest
//! increase and decrease, the filtered product list and the selection.
//!
//! # Quick start
//!
//! ```no_run
//! use ramadan_prices::{Filter, Language, PriceMonitor};
//!
//! let monitor = PriceMonitor::builder()
//!     .base_url("https://example.org/ramadan2026/data")
//!     .build()
//!     .unwrap();
//!
//! // Never fails: falls back to built-in sample data.
//! let mut dashboard = monitor.dashboard(Language::English);
//! dashboard.set_filter(Filter::Increase);
//!
//! let view = dashboard.view();
//! if let Some(top) = &view.extremes.max_increase {
//!     println!("{}: {:+.1}%", top.product.name(), top.percent_vs_reference);
//! }
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod catalog;
pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod i18n;
pub mod icons;
pub mod loader;
pub mod metrics;
pub mod models;
pub mod sample;
pub mod selection;
pub mod source;
pub mod tabular;
pub mod weeks;

#[cfg(feature = "async")]
pub use async_client::AsyncPriceMonitor;
pub use chart::{ChartMode, ChartSeries};
pub use error::{MonitorError, Result};
pub use i18n::Language;
pub use loader::{DataOrigin, Dataset};
pub use models::{
    ChangeCategory, Extremes, PriceChange, Product, ProductWithPrices, WeeklyPricePoint,
};
pub use selection::{Dashboard, DashboardView, Filter};
pub use source::{DataSource, DirSource, HttpSource, StaticSource};
pub use weeks::WeekCalendar;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// PriceMonitorBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`PriceMonitor`].
///
/// Exactly one data location is used. An explicit [`source`](Self::source)
/// wins over [`data_dir`](Self::data_dir), which wins over
/// [`base_url`](Self::base_url).
pub struct PriceMonitorBuilder {
    base_url: Option<String>,
    data_dir: Option<PathBuf>,
    source: Option<Box<dyn DataSource>>,
    timeout: Duration,
    calendar: WeekCalendar,
}

impl Default for PriceMonitorBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            data_dir: None,
            source: None,
            timeout: config::DEFAULT_TIMEOUT,
            calendar: WeekCalendar::default(),
        }
    }
}

impl PriceMonitorBuilder {
    /// Fetch the tables over HTTP from `{url}/products.csv` and
    /// `{url}/weekly_prices.csv`.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Read the tables from a local directory instead.
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use a custom [`DataSource`].
    pub fn source<S: DataSource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Week start dates used for week range labels.
    pub fn week_calendar(mut self, calendar: WeekCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Build the monitor. Nothing is fetched until the first load.
    pub fn build(self) -> Result<PriceMonitor> {
        let source: Box<dyn DataSource> = match (self.source, self.data_dir, self.base_url) {
            (Some(source), _, _) => source,
            (None, Some(dir), _) => Box::new(DirSource::new(dir)),
            (None, None, Some(url)) => Box::new(HttpSource::new(&url, self.timeout)?),
            (None, None, None) => {
                return Err(MonitorError::InvalidArgument(
                    "no data location configured; set base_url, data_dir or source".into(),
                ))
            }
        };
        Ok(PriceMonitor {
            source,
            calendar: self.calendar,
        })
    }
}

// ---------------------------------------------------------------------------
// PriceMonitor
// ---------------------------------------------------------------------------

/// The main entry point: owns the data source and week calendar and
/// produces loaded datasets and dashboards.
///
/// Created via [`PriceMonitor::builder()`].
pub struct PriceMonitor {
    source: Box<dyn DataSource>,
    calendar: WeekCalendar,
}

impl PriceMonitor {
    pub fn builder() -> PriceMonitorBuilder {
        PriceMonitorBuilder::default()
    }

    /// Fetch both tables and build the product model.
    ///
    /// Fails with [`MonitorError::SourceUnavailable`] when a fetch fails or
    /// no product is usable.
    pub fn load(&self, language: Language) -> Result<Vec<ProductWithPrices>> {
        loader::load(self.source.as_ref(), language)
    }

    /// Like [`load`](Self::load), but substitutes the sample dataset on
    /// failure. Check [`Dataset::origin`] to tell the two apart.
    pub fn load_or_sample(&self, language: Language) -> Dataset {
        loader::load_or_sample(self.source.as_ref(), language)
    }

    /// Load (or fall back) and open a dashboard on the latest week.
    pub fn dashboard(&self, language: Language) -> Dashboard {
        Dashboard::new(self.load_or_sample(language), language)
    }

    /// Chart series for `product` up to `week`, using this monitor's calendar.
    pub fn chart(&self, product: &ProductWithPrices, week: u32, language: Language) -> ChartSeries {
        chart::chart_series(product, week, language, &self.calendar)
    }

    /// Localized label for `week`, using this monitor's calendar.
    pub fn week_label(&self, week: u32, language: Language, week_date: Option<&str>) -> String {
        weeks::format_week_label(week, language, week_date, &self.calendar)
    }

    pub fn calendar(&self) -> &WeekCalendar {
        &self.calendar
    }

    pub fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for PriceMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PriceMonitor(source={}, calendar_weeks={})",
            self.source.describe(),
            self.calendar.len()
        )
    }
}
