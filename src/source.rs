//! Where the two price tables come from.
//!
//! A [`DataSource`] hands back the raw text of a named table. The monitor
//! ships three: an HTTP source for the published site, a directory source
//! for offline copies, and an in-memory source for hosts that already hold
//! the text.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CACHE_CONTROL;

use crate::config;
use crate::error::{MonitorError, Result};

/// A provider of raw table text, looked up by file name.
///
/// Implementations must be shareable across threads: the loader fetches
/// both tables at the same time.
pub trait DataSource: Send + Sync {
    /// Return the full text of `file` (e.g. `"products.csv"`).
    fn fetch(&self, file: &str) -> Result<String>;

    /// Short human-readable location, used in logs and errors.
    fn describe(&self) -> String;
}

// ---------------------------------------------------------------------------
// HttpSource
// ---------------------------------------------------------------------------

/// Fetches tables over HTTP from `{base_url}/{file}`.
pub struct HttpSource {
    base_url: String,
    client: Client,
}

impl HttpSource {
    /// Create a source rooted at `base_url`, e.g. `https://example.org/ramadan2026/data`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(MonitorError::InvalidArgument(
                "HTTP source needs a non-empty base URL".into(),
            ));
        }
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { base_url, client })
    }

    pub fn url_for(&self, file: &str) -> String {
        format!("{}/{}", self.base_url, file)
    }
}

impl DataSource for HttpSource {
    /// Non-success statuses are errors; the body is never inspected.
    fn fetch(&self, file: &str) -> Result<String> {
        let url = self.url_for(file);
        tracing::info!(%url, "fetching table");
        let resp = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, config::CACHE_CONTROL)
            .send()?
            .error_for_status()?;
        Ok(resp.text()?)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

// ---------------------------------------------------------------------------
// DirSource
// ---------------------------------------------------------------------------

/// Reads tables from a local directory.
pub struct DirSource {
    dir: PathBuf,
}

impl DirSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl DataSource for DirSource {
    fn fetch(&self, file: &str) -> Result<String> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Err(MonitorError::NotFound(format!(
                "{} does not exist",
                path.display()
            )));
        }
        tracing::debug!(path = %path.display(), "reading table");
        Ok(fs::read_to_string(&path)?)
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}

// ---------------------------------------------------------------------------
// StaticSource
// ---------------------------------------------------------------------------

/// Serves tables from memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    files: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source holding both tables under their standard names.
    pub fn with_tables(products_csv: &str, prices_csv: &str) -> Self {
        Self::new()
            .with_file(config::PRODUCTS_FILE, products_csv)
            .with_file(config::WEEKLY_PRICES_FILE, prices_csv)
    }

    pub fn with_file(mut self, file: &str, text: &str) -> Self {
        self.files.insert(file.to_string(), text.to_string());
        self
    }
}

impl DataSource for StaticSource {
    fn fetch(&self, file: &str) -> Result<String> {
        self.files
            .get(file)
            .cloned()
            .ok_or_else(|| MonitorError::NotFound(format!("No in-memory table named {}", file)))
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
