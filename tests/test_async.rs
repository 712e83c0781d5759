//! Async wrapper tests. Run with `--features async`.

#![cfg(feature = "async")]

mod common;

use common::{FailingSource, PRICES_CSV, PRODUCTS_CSV};
use ramadan_prices::{
    AsyncPriceMonitor, DataOrigin, Language, MonitorError, PriceMonitor, StaticSource,
};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

#[test]
fn async_load_returns_products() {
    runtime().block_on(async {
        let monitor = PriceMonitor::builder()
            .source(StaticSource::with_tables(PRODUCTS_CSV, PRICES_CSV))
            .build()
            .unwrap();
        let monitor = AsyncPriceMonitor::from_monitor(monitor);

        let products = monitor.load(Language::English).await.unwrap();
        assert_eq!(products.len(), 4);

        let dataset = monitor.load_or_sample(Language::English).await.unwrap();
        assert_eq!(dataset.origin, DataOrigin::Remote);

        monitor.close().await.unwrap();
    });
}

#[test]
fn async_load_or_sample_falls_back() {
    runtime().block_on(async {
        let monitor = PriceMonitor::builder()
            .source(FailingSource {
                failing_file: "weekly_prices.csv",
            })
            .build()
            .unwrap();
        let monitor = AsyncPriceMonitor::from_monitor(monitor);

        assert!(matches!(
            monitor.load(Language::Arabic).await,
            Err(MonitorError::SourceUnavailable(_))
        ));
        let dataset = monitor.load_or_sample(Language::Arabic).await.unwrap();
        assert!(dataset.is_sample());
    });
}

#[test]
fn async_builder_needs_a_location() {
    runtime().block_on(async {
        let err = AsyncPriceMonitor::builder().build().await.err().unwrap();
        assert!(matches!(err, MonitorError::InvalidArgument(_)));
    });
}

#[test]
fn async_builder_reads_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("products.csv"), PRODUCTS_CSV).unwrap();
    std::fs::write(dir.path().join("weekly_prices.csv"), PRICES_CSV).unwrap();

    runtime().block_on(async {
        let monitor = AsyncPriceMonitor::builder()
            .data_dir(dir.path())
            .build()
            .await
            .unwrap();
        let clone = monitor.clone();
        let (a, b) = tokio::join!(
            monitor.load(Language::English),
            clone.load(Language::Arabic)
        );
        assert_eq!(a.unwrap().len(), 4);
        assert_eq!(b.unwrap().len(), 4);
    });
}
