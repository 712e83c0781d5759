//! Delimited-text parser for the published price tables.
//!
//! Turns comma-separated text with a header row into ordered
//! `header -> value` rows. Quoted fields may contain commas, newlines and
//! doubled `""` quotes. The parser never fails: empty input and input with
//! only a header both yield no rows, and an unterminated quote simply runs
//! to the end of the input.

use std::collections::HashMap;

/// A single parsed row keyed by (trimmed) header name.
pub type Row = HashMap<String, String>;

const SEPARATOR: char = ',';
const QUOTE: char = '"';

/// Parse delimited text into rows keyed by the header row.
///
/// Values are trimmed. Rows whose fields are all blank are skipped, fields
/// missing at the end of a short row map to the empty string, and fields
/// beyond the header width are ignored. When a header name repeats, the
/// right-most column wins.
pub fn parse(text: &str) -> Vec<Row> {
    let mut records = split_records(text).into_iter();

    let headers: Vec<String> = match records.next() {
        Some(header) => header.iter().map(|h| h.trim().to_string()).collect(),
        None => return Vec::new(),
    };

    records
        .map(|record| {
            headers
                .iter()
                .enumerate()
                .map(|(idx, h)| {
                    let value = record.get(idx).map(|v| v.trim()).unwrap_or("");
                    (h.clone(), value.to_string())
                })
                .collect()
        })
        .collect()
}

/// Split text into records of raw fields, dropping fully blank records.
///
/// Line endings are normalized to `\n` first, including inside quoted
/// fields.
pub fn split_records(text: &str) -> Vec<Vec<String>> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = normalized.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                QUOTE if chars.peek() == Some(&QUOTE) => {
                    field.push(QUOTE);
                    chars.next();
                }
                QUOTE => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            QUOTE => in_quotes = true,
            SEPARATOR => record.push(std::mem::take(&mut field)),
            '\n' => {
                record.push(std::mem::take(&mut field));
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    record.push(field);
    push_record(&mut records, record);

    records
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    if record.iter().any(|v| !v.trim().is_empty()) {
        records.push(record);
    }
}
