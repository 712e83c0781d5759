//! Async wrapper around [`PriceMonitor`] for use in async runtimes (Tokio, etc.).
//!
//! Loads run on the blocking thread pool via [`tokio::task::spawn_blocking`],
//! keeping the event loop free while both tables are fetched.
//!
//! # Example
//!
//! ```no_run
//! use ramadan_prices::{AsyncPriceMonitor, Dashboard, Language};
//!
//! # async fn example() -> ramadan_prices::Result<()> {
//! let monitor = AsyncPriceMonitor::builder()
//!     .base_url("https://example.org/ramadan2026/data")
//!     .build()
//!     .await?;
//!
//! let dataset = monitor.load_or_sample(Language::Arabic).await?;
//! let dashboard = Dashboard::new(dataset, Language::Arabic);
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::config;
use crate::error::{MonitorError, Result};
use crate::i18n::Language;
use crate::loader::Dataset;
use crate::models::ProductWithPrices;
use crate::weeks::WeekCalendar;
use crate::PriceMonitor;

// ---------------------------------------------------------------------------
// AsyncPriceMonitorBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncPriceMonitor`].
pub struct AsyncPriceMonitorBuilder {
    base_url: Option<String>,
    data_dir: Option<PathBuf>,
    timeout: Duration,
    calendar: WeekCalendar,
}

impl Default for AsyncPriceMonitorBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            data_dir: None,
            timeout: config::DEFAULT_TIMEOUT,
            calendar: WeekCalendar::default(),
        }
    }
}

impl AsyncPriceMonitorBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn week_calendar(mut self, calendar: WeekCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Build the monitor on the blocking pool; the blocking HTTP client
    /// must not be created on an async worker thread.
    pub async fn build(self) -> Result<AsyncPriceMonitor> {
        tokio::task::spawn_blocking(move || {
            let mut builder = PriceMonitor::builder()
                .timeout(self.timeout)
                .week_calendar(self.calendar);
            if let Some(dir) = self.data_dir {
                builder = builder.data_dir(dir);
            }
            if let Some(url) = self.base_url {
                builder = builder.base_url(&url);
            }
            Ok(AsyncPriceMonitor::from_monitor(builder.build()?))
        })
        .await
        .map_err(|e| MonitorError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncPriceMonitor
// ---------------------------------------------------------------------------

/// Async wrapper around [`PriceMonitor`].
///
/// The monitor holds no mutable state, so it is shared behind an [`Arc`]
/// and several loads may run at once. Whichever result the caller applies
/// last wins; see [`Dashboard::replace_dataset`](crate::Dashboard::replace_dataset).
#[derive(Clone)]
pub struct AsyncPriceMonitor {
    inner: Arc<PriceMonitor>,
}

impl AsyncPriceMonitor {
    pub fn builder() -> AsyncPriceMonitorBuilder {
        AsyncPriceMonitorBuilder::default()
    }

    /// Wrap an already built monitor.
    pub fn from_monitor(monitor: PriceMonitor) -> Self {
        Self {
            inner: Arc::new(monitor),
        }
    }

    /// Run a sync monitor operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&PriceMonitor) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let monitor = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&monitor))
            .await
            .map_err(|e| MonitorError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// See [`PriceMonitor::load`].
    pub async fn load(&self, language: Language) -> Result<Vec<ProductWithPrices>> {
        self.run(move |m| m.load(language)).await
    }

    /// See [`PriceMonitor::load_or_sample`]. Only a failed task join is an
    /// error here.
    pub async fn load_or_sample(&self, language: Language) -> Result<Dataset> {
        self.run(move |m| Ok(m.load_or_sample(language))).await
    }

    /// Release the monitor on the blocking pool, where dropping the blocking
    /// HTTP client is allowed.
    pub async fn close(self) -> Result<()> {
        tokio::task::spawn_blocking(move || drop(self.inner))
            .await
            .map_err(|e| MonitorError::InvalidArgument(format!("Task join error: {e}")))
    }
}
