//! Shared fixtures for the price monitor integration tests.
//!
//! Provides the two sample tables, data sources that fail or record
//! concurrency, and a tiny HTTP responder for exercising `HttpSource`
//! without the network.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use ramadan_prices::{
    DataSource, MonitorError, Product, ProductWithPrices, Result, WeeklyPricePoint,
};

pub const CHICKEN: &str = "011220102";
pub const RICE: &str = "011100103";
pub const SUGAR: &str = "011800105";
pub const TAHINI: &str = "011930206";

/// Four products plus one row without an id. Display order puts chicken
/// first, rice second, sugar third and tahini (no rank) last.
pub const PRODUCTS_CSV: &str = "\
id,name_ar,name_en,unit_ar,unit_en,icon,color,reference_price,display_order
011100103,أرز حبة قصيرة,Short-grain rice,1 كغم,1 kg,fa-bowl-rice,#2E7D32,7.50,2
011220102,دجاج منظف,Cleaned chicken,1 كغم,1 kg,,,14,1
011800105,سكر,,1 كغم,1 kg,fa-box,#0056b3,\"₪ 4.00\",3
011930206,طحينية,Tahini,,1 kg,,,22,
,بدون رمز,Missing id,,,,,5,4
";

/// Weekly prices. Row 10 repeats sugar week 2 and must win over row 6;
/// rows 8 and 9 are unusable.
pub const PRICES_CSV: &str = "\
id,product_id,week_number,price,week_date
1,011100103,1,7.5,08/02
2,011100103,2,8.0,15/02
3,011220102,2,13.0,
4,011220102,1,14.0,
5,011800105,1,4.0,
6,011800105,2,4.6,
7,011930206,2,21.0,
8,,1,3.0,
9,011100103,abc,5.0,
10,011800105,2,4.4,
";

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Build a product by hand with the given (week, price) points.
pub fn product(
    id: &str,
    name: &str,
    reference_price: f64,
    points: &[(u32, f64)],
) -> ProductWithPrices {
    ProductWithPrices {
        product: Product {
            id: id.to_string(),
            name: name.to_string(),
            unit: "1 kg".to_string(),
            reference_price,
            display_order: 1.0,
            icon: "fa-box".to_string(),
            color: "#0EA5E9".to_string(),
        },
        prices: points
            .iter()
            .map(|(week, price)| WeeklyPricePoint {
                product_id: id.to_string(),
                week_number: *week,
                price: *price,
                week_date: None,
            })
            .collect(),
    }
}

fn table_for(file: &str) -> String {
    match file {
        "products.csv" => PRODUCTS_CSV.to_string(),
        _ => PRICES_CSV.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Test sources
// ---------------------------------------------------------------------------

/// Serves the sample tables except for one file, which always fails.
pub struct FailingSource {
    pub failing_file: &'static str,
}

impl DataSource for FailingSource {
    fn fetch(&self, file: &str) -> Result<String> {
        if file == self.failing_file {
            return Err(MonitorError::NotFound(format!("{} returned 404", file)));
        }
        Ok(table_for(file))
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

/// Serves the sample tables slowly and records the peak number of fetches
/// in flight at once.
#[derive(Default)]
pub struct RecordingSource {
    in_flight: AtomicUsize,
    pub peak: AtomicUsize,
}

impl DataSource for RecordingSource {
    fn fetch(&self, file: &str) -> Result<String> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(150));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(table_for(file))
    }

    fn describe(&self) -> String {
        "recording".to_string()
    }
}

// ---------------------------------------------------------------------------
// HTTP responder
// ---------------------------------------------------------------------------

/// Start a background HTTP/1.1 responder on localhost.
///
/// `routes` maps a request path (e.g. `/data/products.csv`) to a status
/// code and body; unknown paths get 404. Returns the base URL
/// `http://127.0.0.1:{port}/data`.
pub fn serve(routes: Vec<(&'static str, u16, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let routes: HashMap<&'static str, (u16, &'static str)> = routes
        .into_iter()
        .map(|(path, status, body)| (path, (status, body)))
        .collect();

    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            let routes = routes.clone();
            thread::spawn(move || {
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                        break;
                    }
                }

                let path = request_line.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = routes.get(path).copied().unwrap_or((404, "not found"));
                let reason = if status == 200 { "OK" } else { "Error" };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: text/csv; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).unwrap();
                stream.flush().unwrap();
            });
        }
    });

    format!("http://{}/data", addr)
}
