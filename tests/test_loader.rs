//! Loader tests: field coercion, the product/price join, language
//! selection, icon fallback, concurrent fetches and the sample fallback.

mod common;

use std::fs;
use std::sync::atomic::Ordering;

use common::{approx, CHICKEN, PRICES_CSV, PRODUCTS_CSV, RICE, SUGAR, TAHINI};
use ramadan_prices::loader::{
    coerce_display_order, coerce_number, coerce_price, coerce_week, join, load, load_from_text,
    load_or_sample, parse_prices, parse_products,
};
use ramadan_prices::{
    DataOrigin, Dataset, DirSource, HttpSource, Language, MonitorError, PriceMonitor, Product,
    StaticSource, WeeklyPricePoint,
};

fn ids(products: &[ramadan_prices::ProductWithPrices]) -> Vec<&str> {
    products.iter().map(|p| p.id()).collect()
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

#[test]
fn coerce_number_strips_currency_and_grouping() {
    assert!(approx(coerce_number("12,345.6 ₪", 0.0), 12345.6));
    assert!(approx(coerce_number(" +7.25 ", 0.0), 7.25));
    assert!(approx(coerce_number("-3", 0.0), -3.0));
}

#[test]
fn coerce_number_falls_back_on_garbage() {
    assert!(approx(coerce_number("abc", 0.0), 0.0));
    assert!(approx(coerce_number("", 42.0), 42.0));
    assert!(approx(coerce_number("1.2.3", 7.0), 7.0));
    assert!(approx(coerce_number("--5", 7.0), 7.0));
}

#[test]
fn coerce_price_rejects_negative_values() {
    assert!(approx(coerce_price("-4.5"), 0.0));
    assert!(approx(coerce_price("4.5 NIS"), 4.5));
}

#[test]
fn coerce_display_order_defaults_to_low_priority() {
    assert_eq!(coerce_display_order(""), 9999.0);
    assert_eq!(coerce_display_order("n/a"), 9999.0);
    assert_eq!(coerce_display_order("0"), 9999.0);
    assert_eq!(coerce_display_order("3"), 3.0);
    assert_eq!(coerce_display_order("1.5"), 1.5);
}

#[test]
fn coerce_week_accepts_whole_positive_numbers_only() {
    assert_eq!(coerce_week("1"), Some(1));
    assert_eq!(coerce_week("week 4"), Some(4));
    assert_eq!(coerce_week("0"), None);
    assert_eq!(coerce_week("-2"), None);
    assert_eq!(coerce_week("1.5"), None);
    assert_eq!(coerce_week("abc"), None);
}

// ---------------------------------------------------------------------------
// Table conversion
// ---------------------------------------------------------------------------

#[test]
fn parse_products_drops_rows_without_id() {
    let products = parse_products(PRODUCTS_CSV, Language::English).unwrap();
    assert_eq!(products.len(), 4);
    assert!(products.iter().all(|p| !p.id.is_empty()));
}

#[test]
fn parse_products_keeps_identifiers_verbatim() {
    let products = parse_products("id,name_en\n  00042 ,Thing\n", Language::English).unwrap();
    assert_eq!(products[0].id, "00042");
}

#[test]
fn parse_products_coerces_prices_and_ranks() {
    let products = parse_products(PRODUCTS_CSV, Language::English).unwrap();
    let sugar = products.iter().find(|p| p.id == SUGAR).unwrap();
    assert!(approx(sugar.reference_price, 4.0));
    assert_eq!(sugar.display_order, 3.0);

    let tahini = products.iter().find(|p| p.id == TAHINI).unwrap();
    assert_eq!(tahini.display_order, 9999.0);
}

#[test]
fn parse_prices_drops_unusable_rows() {
    let points = parse_prices(PRICES_CSV).unwrap();
    // 10 rows, one without a product and one with a non-numeric week
    assert_eq!(points.len(), 8);
    assert!(points.iter().all(|p| !p.product_id.is_empty() && p.week_number >= 1));
}

#[test]
fn blank_week_date_is_absent() {
    let points = parse_prices(PRICES_CSV).unwrap();
    let rice_w1 = points
        .iter()
        .find(|p| p.product_id == RICE && p.week_number == 1)
        .unwrap();
    assert_eq!(rice_w1.week_date.as_deref(), Some("08/02"));

    let chicken_w1 = points
        .iter()
        .find(|p| p.product_id == CHICKEN && p.week_number == 1)
        .unwrap();
    assert_eq!(chicken_w1.week_date, None);
}

// ---------------------------------------------------------------------------
// Language selection
// ---------------------------------------------------------------------------

#[test]
fn names_and_units_follow_language() {
    let ar = parse_products(PRODUCTS_CSV, Language::Arabic).unwrap();
    let en = parse_products(PRODUCTS_CSV, Language::English).unwrap();
    let rice_ar = ar.iter().find(|p| p.id == RICE).unwrap();
    let rice_en = en.iter().find(|p| p.id == RICE).unwrap();
    assert_eq!(rice_ar.name, "أرز حبة قصيرة");
    assert_eq!(rice_ar.unit, "1 كغم");
    assert_eq!(rice_en.name, "Short-grain rice");
    assert_eq!(rice_en.unit, "1 kg");
}

#[test]
fn blank_preferred_language_falls_back_to_other() {
    let en = parse_products(PRODUCTS_CSV, Language::English).unwrap();
    let sugar = en.iter().find(|p| p.id == SUGAR).unwrap();
    assert_eq!(sugar.name, "سكر");

    let ar = parse_products(PRODUCTS_CSV, Language::Arabic).unwrap();
    let tahini = ar.iter().find(|p| p.id == TAHINI).unwrap();
    assert_eq!(tahini.unit, "1 kg");
}

// ---------------------------------------------------------------------------
// Icon and color resolution
// ---------------------------------------------------------------------------

#[test]
fn explicit_icon_and_color_are_kept() {
    let products = parse_products(PRODUCTS_CSV, Language::English).unwrap();
    let rice = products.iter().find(|p| p.id == RICE).unwrap();
    assert_eq!(rice.icon, "fa-bowl-rice");
    assert_eq!(rice.color, "#2E7D32");
}

#[test]
fn blank_or_default_tokens_use_keyword_rules() {
    let products = parse_products(PRODUCTS_CSV, Language::Arabic).unwrap();

    let chicken = products.iter().find(|p| p.id == CHICKEN).unwrap();
    assert_eq!(chicken.icon, "fa-drumstick-bite");
    assert_eq!(chicken.color, "#9C27B0");

    let sugar = products.iter().find(|p| p.id == SUGAR).unwrap();
    assert_eq!(sugar.icon, "fa-cubes");
    assert_eq!(sugar.color, "#00BCD4");

    let tahini = products.iter().find(|p| p.id == TAHINI).unwrap();
    assert_eq!(tahini.icon, "fa-bowl-food");
}

#[test]
fn unmatched_names_get_generic_tokens() {
    let products = parse_products("id,name_en\nX1,Mystery item\n", Language::English).unwrap();
    assert_eq!(products[0].icon, "fa-box");
    assert_eq!(products[0].color, "#0EA5E9");
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

fn bare_product(id: &str, order: f64) -> Product {
    Product {
        id: id.to_string(),
        name: id.to_string(),
        unit: String::new(),
        reference_price: 1.0,
        display_order: order,
        icon: "fa-box".to_string(),
        color: "#0EA5E9".to_string(),
    }
}

fn point(product_id: &str, week: u32, price: f64) -> WeeklyPricePoint {
    WeeklyPricePoint {
        product_id: product_id.to_string(),
        week_number: week,
        price,
        week_date: None,
    }
}

#[test]
fn join_orders_products_by_display_order() {
    let joined = join(
        vec![bare_product("A", 2.0), bare_product("B", 1.0)],
        vec![point("A", 1, 10.0), point("B", 1, 5.0)],
    );
    assert_eq!(ids(&joined), vec!["B", "A"]);
    assert_eq!(joined[0].prices.len(), 1);
    assert_eq!(joined[1].prices.len(), 1);
}

#[test]
fn join_keeps_table_order_for_equal_ranks() {
    let joined = join(
        vec![
            bare_product("C", 5.0),
            bare_product("A", 5.0),
            bare_product("B", 1.0),
            bare_product("D", 5.0),
        ],
        vec![],
    );
    assert_eq!(ids(&joined), vec!["B", "C", "A", "D"]);
}

#[test]
fn join_compares_fractional_ranks() {
    let products = parse_products(
        "id,name_en,display_order\nA,Apricots,1.7\nB,Beans,1.2\nC,Carrots,\n",
        Language::English,
    )
    .unwrap();
    let joined = join(products, vec![]);
    assert_eq!(ids(&joined), vec!["B", "A", "C"]);
}

#[test]
fn join_sorts_points_by_week() {
    let joined = join(
        vec![bare_product("A", 1.0)],
        vec![point("A", 3, 3.0), point("A", 1, 1.0), point("A", 2, 2.0)],
    );
    let weeks: Vec<u32> = joined[0].prices.iter().map(|p| p.week_number).collect();
    assert_eq!(weeks, vec![1, 2, 3]);
}

#[test]
fn join_last_duplicate_row_wins() {
    let joined = join(
        vec![bare_product("A", 1.0)],
        vec![point("A", 2, 1.0), point("A", 2, 9.0)],
    );
    assert_eq!(joined[0].prices.len(), 1);
    assert!(approx(joined[0].prices[0].price, 9.0));
}

#[test]
fn join_leaves_products_without_points_empty() {
    let joined = join(vec![bare_product("A", 1.0)], vec![point("Z", 1, 1.0)]);
    assert!(joined[0].prices.is_empty());
}

#[test]
fn load_from_text_builds_ordered_model() {
    let products = load_from_text(PRODUCTS_CSV, PRICES_CSV, Language::English).unwrap();
    assert_eq!(ids(&products), vec![CHICKEN, RICE, SUGAR, TAHINI]);

    let sugar = &products[2];
    assert_eq!(sugar.prices.len(), 2);
    assert!(approx(sugar.price_at(2).unwrap(), 4.4));

    let chicken = &products[0];
    let weeks: Vec<u32> = chicken.prices.iter().map(|p| p.week_number).collect();
    assert_eq!(weeks, vec![1, 2]);
}

#[test]
fn load_from_text_without_products_is_unavailable() {
    let err = load_from_text("id,name_en\n", PRICES_CSV, Language::English).unwrap_err();
    assert!(matches!(err, MonitorError::SourceUnavailable(_)));

    let err = load_from_text("", "", Language::English).unwrap_err();
    assert!(matches!(err, MonitorError::SourceUnavailable(_)));
}

// ---------------------------------------------------------------------------
// Loading through sources
// ---------------------------------------------------------------------------

#[test]
fn load_reads_both_tables_from_source() {
    let source = StaticSource::with_tables(PRODUCTS_CSV, PRICES_CSV);
    let products = load(&source, Language::Arabic).unwrap();
    assert_eq!(products.len(), 4);
    assert_eq!(products[0].name(), "دجاج منظف");
}

#[test]
fn load_fetches_tables_concurrently() {
    let source = common::RecordingSource::default();
    load(&source, Language::English).unwrap();
    assert_eq!(source.peak.load(Ordering::SeqCst), 2);
}

#[test]
fn load_fails_when_either_table_fails() {
    for failing_file in ["products.csv", "weekly_prices.csv"] {
        let source = common::FailingSource { failing_file };
        let err = load(&source, Language::English).unwrap_err();
        assert!(matches!(err, MonitorError::SourceUnavailable(_)), "{failing_file}");
    }
}

#[test]
fn load_or_sample_falls_back_on_failure() {
    let source = common::FailingSource {
        failing_file: "products.csv",
    };
    let dataset = load_or_sample(&source, Language::English);
    assert_eq!(dataset.origin, DataOrigin::Sample);
    assert_eq!(dataset, Dataset::sample(Language::English));
    assert!(dataset.notice(Language::English).is_some());
}

#[test]
fn load_or_sample_falls_back_on_empty_tables() {
    let source = StaticSource::with_tables("id,name_en\n", "");
    let dataset = load_or_sample(&source, Language::Arabic);
    assert!(dataset.is_sample());
}

#[test]
fn load_or_sample_uses_remote_data_when_available() {
    let source = StaticSource::with_tables(PRODUCTS_CSV, PRICES_CSV);
    let dataset = load_or_sample(&source, Language::English);
    assert_eq!(dataset.origin, DataOrigin::Remote);
    assert_eq!(dataset.products.len(), 4);
    assert_eq!(dataset.latest_week(), 2);
    assert_eq!(dataset.notice(Language::English), None);
}

#[test]
fn latest_week_of_empty_dataset_is_one() {
    assert_eq!(Dataset::remote(Vec::new()).latest_week(), 1);
}

#[test]
fn sample_dataset_has_sorted_complete_series() {
    let dataset = Dataset::sample(Language::Arabic);
    assert!(!dataset.products.is_empty());
    assert_eq!(dataset.latest_week(), 4);
    for product in &dataset.products {
        let weeks: Vec<u32> = product.prices.iter().map(|p| p.week_number).collect();
        assert_eq!(weeks, vec![1, 2, 3, 4]);
        assert!(product.prices.iter().all(|p| p.product_id == product.id()));
    }
}

#[test]
fn dir_source_reads_local_files() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("products.csv"), PRODUCTS_CSV).unwrap();
    fs::write(dir.path().join("weekly_prices.csv"), PRICES_CSV).unwrap();

    let products = load(&DirSource::new(dir.path()), Language::English).unwrap();
    assert_eq!(products.len(), 4);
}

#[test]
fn dir_source_missing_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("products.csv"), PRODUCTS_CSV).unwrap();

    let dataset = load_or_sample(&DirSource::new(dir.path()), Language::English);
    assert!(dataset.is_sample());
}

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

#[test]
fn http_source_loads_published_tables() {
    let base = common::serve(vec![
        ("/data/products.csv", 200, PRODUCTS_CSV),
        ("/data/weekly_prices.csv", 200, PRICES_CSV),
    ]);
    let source = HttpSource::new(&base, std::time::Duration::from_secs(10)).unwrap();
    let products = load(&source, Language::English).unwrap();
    assert_eq!(ids(&products), vec![CHICKEN, RICE, SUGAR, TAHINI]);
}

#[test]
fn http_non_success_status_falls_back_to_sample() {
    let base = common::serve(vec![
        ("/data/products.csv", 404, "missing"),
        ("/data/weekly_prices.csv", 200, PRICES_CSV),
    ]);
    let source = HttpSource::new(&base, std::time::Duration::from_secs(10)).unwrap();

    let err = load(&source, Language::English).unwrap_err();
    assert!(matches!(err, MonitorError::SourceUnavailable(_)));

    let dataset = load_or_sample(&source, Language::English);
    assert_eq!(dataset, Dataset::sample(Language::English));
}

#[test]
fn http_source_rejects_empty_base_url() {
    let err = HttpSource::new("  ", std::time::Duration::from_secs(1)).err().unwrap();
    assert!(matches!(err, MonitorError::InvalidArgument(_)));
}

#[test]
fn http_source_joins_urls() {
    let source = HttpSource::new("http://localhost/data/", std::time::Duration::from_secs(1)).unwrap();
    assert_eq!(source.url_for("products.csv"), "http://localhost/data/products.csv");
}

// ---------------------------------------------------------------------------
// PriceMonitor
// ---------------------------------------------------------------------------

#[test]
fn builder_requires_a_data_location() {
    let err = PriceMonitor::builder().build().err().unwrap();
    assert!(matches!(err, MonitorError::InvalidArgument(_)));
}

#[test]
fn builder_prefers_explicit_source() {
    let monitor = PriceMonitor::builder()
        .base_url("http://unused.invalid/data")
        .source(StaticSource::with_tables(PRODUCTS_CSV, PRICES_CSV))
        .build()
        .unwrap();
    assert_eq!(monitor.source().describe(), "memory");
    assert_eq!(monitor.load(Language::English).unwrap().len(), 4);
    assert!(monitor.to_string().contains("source=memory"));
}

#[test]
fn monitor_dashboard_opens_on_latest_week() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("products.csv"), PRODUCTS_CSV).unwrap();
    fs::write(dir.path().join("weekly_prices.csv"), PRICES_CSV).unwrap();

    let monitor = PriceMonitor::builder().data_dir(dir.path()).build().unwrap();
    let dashboard = monitor.dashboard(Language::English);
    assert_eq!(dashboard.week(), 2);
    assert_eq!(dashboard.selected_id(), Some(CHICKEN));
    assert!(!dashboard.dataset().is_sample());
}
