//! Visible subset and current selection of the dashboard.
//!
//! The selection invariant is restored explicitly: after every change to
//! the filter, week, search text or dataset the selected id is checked
//! against the new visible list with [`reconcile_selection`]. A cleared
//! selection means "show the first visible product", not "show nothing".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::MonitorError;
use crate::i18n::{label, Label, Language};
use crate::loader::Dataset;
use crate::metrics;
use crate::models::{ChangeCategory, Extremes, PriceChange, ProductWithPrices};

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    #[default]
    All,
    Increase,
    Decrease,
    Stable,
}

impl Filter {
    pub fn matches(self, category: ChangeCategory) -> bool {
        match self {
            Filter::All => true,
            Filter::Increase => category == ChangeCategory::Increase,
            Filter::Decrease => category == ChangeCategory::Decrease,
            Filter::Stable => category == ChangeCategory::Stable,
        }
    }

    pub fn label(self, language: Language) -> &'static str {
        let key = match self {
            Filter::All => Label::FilterAll,
            Filter::Increase => Label::FilterIncrease,
            Filter::Decrease => Label::FilterDecrease,
            Filter::Stable => Label::FilterStable,
        };
        label(language, key)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Filter::All => "all",
            Filter::Increase => "increase",
            Filter::Decrease => "decrease",
            Filter::Stable => "stable",
        })
    }
}

impl FromStr for Filter {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "increase" => Ok(Filter::Increase),
            "decrease" => Ok(Filter::Decrease),
            "stable" => Ok(Filter::Stable),
            other => Err(MonitorError::InvalidArgument(format!(
                "Unknown filter: {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Pure selection functions
// ---------------------------------------------------------------------------

/// Products whose change category at `week` passes `filter`, in model order.
pub fn visible_products(
    products: &[ProductWithPrices],
    filter: Filter,
    week: u32,
) -> Vec<&ProductWithPrices> {
    products
        .iter()
        .filter(|p| {
            filter == Filter::All || filter.matches(metrics::compute_change(p, week).category)
        })
        .collect()
}

/// Whether `product` matches a free-text search.
///
/// Compares diacritic-folded text against the loaded name, the catalog
/// label and the product code. A blank query matches everything.
pub fn matches_search(product: &ProductWithPrices, language: Language, query: &str) -> bool {
    let needle = catalog::normalize_for_search(query);
    if needle.is_empty() {
        return true;
    }
    [
        product.name(),
        catalog::display_name(product, language),
        product.id(),
    ]
    .iter()
    .any(|hay| catalog::normalize_for_search(hay).contains(&needle))
}

/// Keep `previous` only if it is still visible.
pub fn reconcile_selection(
    previous: Option<&str>,
    visible: &[&ProductWithPrices],
) -> Option<String> {
    let id = previous?;
    visible
        .iter()
        .any(|p| p.id() == id)
        .then(|| id.to_string())
}

/// The product to show: the selected one, else the first visible one.
pub fn effective_selection<'a>(
    selected: Option<&str>,
    visible: &[&'a ProductWithPrices],
) -> Option<&'a ProductWithPrices> {
    selected
        .and_then(|id| visible.iter().find(|p| p.id() == id))
        .or_else(|| visible.first())
        .copied()
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Dashboard state over one loaded dataset.
///
/// Setters never leave a selection pointing outside the visible list.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Dataset,
    language: Language,
    week: u32,
    filter: Filter,
    search: String,
    selected: Option<String>,
}

/// Everything a presentation layer needs for one render.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub week: u32,
    pub filter: Filter,
    /// Visible products with their changes, in display order.
    pub visible: Vec<PriceChange<'a>>,
    /// Product to chart; `None` only when nothing is visible.
    pub selected: Option<&'a ProductWithPrices>,
    /// KPI extremes over all products, not just the visible ones.
    pub extremes: Extremes<'a>,
    pub notice: Option<&'static str>,
}

impl Dashboard {
    /// Start on the latest week with the first product selected.
    pub fn new(dataset: Dataset, language: Language) -> Self {
        let mut dashboard = Self {
            dataset,
            language,
            week: 1,
            filter: Filter::All,
            search: String::new(),
            selected: None,
        };
        dashboard.reset_to_dataset();
        dashboard
    }

    /// Swap in a freshly loaded dataset as a whole. The last completed load
    /// wins; week and selection reset the same way as in [`Dashboard::new`].
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.reset_to_dataset();
    }

    fn reset_to_dataset(&mut self) {
        self.week = self.dataset.latest_week();
        self.selected = self.dataset.products.first().map(|p| p.id().to_string());
        self.reconcile();
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// The explicitly selected id, if it survived the last reconciliation.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Week 0 is treated as week 1.
    pub fn set_week(&mut self, week: u32) {
        self.week = week.max(1);
        self.reconcile();
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.reconcile();
    }

    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_string();
        self.reconcile();
    }

    /// Select a product. Returns `false` (and clears the selection) when it
    /// is not currently visible.
    pub fn select(&mut self, id: &str) -> bool {
        self.selected = Some(id.to_string());
        self.reconcile();
        self.selected.is_some()
    }

    /// Visible products under the current filter, week and search.
    pub fn visible(&self) -> Vec<&ProductWithPrices> {
        let mut visible = visible_products(&self.dataset.products, self.filter, self.week);
        visible.retain(|p| matches_search(p, self.language, &self.search));
        visible
    }

    fn reconcile(&mut self) {
        let next = reconcile_selection(self.selected.as_deref(), &self.visible());
        if next.is_none() && self.selected.is_some() {
            tracing::debug!(
                filter = %self.filter,
                week = self.week,
                "selected product filtered out, clearing selection"
            );
        }
        self.selected = next;
    }

    pub fn view(&self) -> DashboardView<'_> {
        let visible = self.visible();
        let selected = effective_selection(self.selected.as_deref(), &visible);
        DashboardView {
            week: self.week,
            filter: self.filter,
            visible: visible
                .iter()
                .map(|&p| metrics::compute_change(p, self.week))
                .collect(),
            selected,
            extremes: metrics::extremes(&self.dataset.products, self.week),
            notice: self.dataset.notice(self.language),
        }
    }
}
