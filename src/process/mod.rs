// src/process/mod.rs
pub mod clean;
pub mod date_parser;
pub mod raw_table;

pub use raw_table::RawTable;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::EtlError;
use clean::{company_code, numeric_clean, scrub};
use date_parser::parse_trade_date;

/// One fully typed output row. Price and volume cells that were empty,
/// placeholder or unparsable are `None`, never zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub pricing_date: NaiveDate,
    pub company_id: String,
    pub open_price: Option<f64>,
    pub high_price: Option<f64>,
    pub low_price: Option<f64>,
    pub close_price: Option<f64>,
    pub volume: Option<f64>,
}

/// Source columns the page must provide, in reporting order.
const REQUIRED_COLUMNS: [&str; 7] = [
    "Opening Price",
    "High",
    "Low",
    "Close",
    "Volume",
    "Company",
    "Trade Date",
];

struct ColumnIndexes {
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: usize,
    company: usize,
    trade_date: usize,
}

/// Find every required column in the trimmed headers, or fail naming
/// exactly the absent ones.
fn locate_columns(headers: &[&str]) -> Result<ColumnIndexes, EtlError> {
    let find = |name: &str| headers.iter().position(|h| *h == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| find(name).is_none())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(EtlError::Schema { missing });
    }

    let at = |name: &str| find(name).expect("column presence checked above");
    Ok(ColumnIndexes {
        open: at("Opening Price"),
        high: at("High"),
        low: at("Low"),
        close: at("Close"),
        volume: at("Volume"),
        company: at("Company"),
        trade_date: at("Trade Date"),
    })
}

/// Normalize a scraped table into typed price records.
///
/// Fails fast when required columns are absent or a row's cell count
/// does not match the header; malformed individual cells never error,
/// they become `None` fields or drop the row at the final key check.
/// Pure function of its input: the output keeps the table's row order
/// and the same table always yields the same records.
pub fn normalize(table: &RawTable) -> Result<Vec<PriceRecord>, EtlError> {
    // 1) trim headers before any column lookup
    let headers: Vec<&str> = table.headers.iter().map(|h| h.trim()).collect();

    // 2) project the fixed source columns
    let cols = locate_columns(&headers)?;

    // 3) type each row, judging it on its final cleaned key values
    let mut records = Vec::with_capacity(table.rows.len());
    for (i, row) in table.rows.iter().enumerate() {
        if row.len() != headers.len() {
            return Err(EtlError::RaggedRow {
                row: i,
                expected: headers.len(),
                got: row.len(),
            });
        }

        let company_id = company_code(&row[cols.company]);
        let pricing_date = scrub(&row[cols.trade_date]).and_then(parse_trade_date);

        // the single row-filtering point, last so rows are judged on
        // cleaned values
        let (Some(company_id), Some(pricing_date)) = (company_id, pricing_date) else {
            debug!(row = i, "dropping row with no usable company or trade date");
            continue;
        };

        records.push(PriceRecord {
            pricing_date,
            company_id,
            open_price: numeric_clean(&row[cols.open]),
            high_price: numeric_clean(&row[cols.high]),
            low_price: numeric_clean(&row[cols.low]),
            close_price: numeric_clean(&row[cols.close]),
            volume: numeric_clean(&row[cols.volume]),
        });
    }

    Ok(records)
}
