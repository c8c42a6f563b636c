//! Replace-by-date persistence for normalized price records.
//!
//! Reruns for a day are idempotent: every date present in the incoming
//! batch is deleted before that batch is inserted, and both steps run in
//! one transaction so a failed insert rolls the deletes back. Rows are
//! never updated individually and dates outside the batch are never
//! touched.

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::config::DatabaseSettings;
use crate::error::EtlError;
use crate::process::PriceRecord;

/// Columns written per record, in bind order.
const COLUMNS: [&str; 7] = [
    "pricing_date",
    "company_id",
    "open_price",
    "high_price",
    "low_price",
    "close_price",
    "volume",
];

/// Rows per multi-row INSERT statement, well under Postgres's bind limit.
const INSERT_CHUNK: usize = 1000;

pub struct PriceStore {
    pool: PgPool,
    table: String,
}

impl PriceStore {
    /// Connect a pool against the configured database.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, EtlError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&settings.url)
            .await?;
        Ok(Self::new(pool, settings.table.clone()))
    }

    pub fn new(pool: PgPool, table: String) -> Self {
        Self { pool, table }
    }

    /// Replace every date present in `records`: delete that date's
    /// persisted rows, then bulk-insert the batch, all in one
    /// transaction. Returns the number of rows inserted.
    ///
    /// The table name comes from configuration and is formatted into the
    /// statement (identifiers cannot be bound); dates and cell values are
    /// always bound parameters.
    pub async fn replace_daily(&self, records: &[PriceRecord]) -> Result<u64, EtlError> {
        if records.is_empty() {
            return Ok(0);
        }

        let dates = distinct_dates(records);
        let mut tx = self.pool.begin().await?;

        let delete_sql = delete_statement(&self.table);
        for date in &dates {
            let gone = sqlx::query(&delete_sql)
                .bind(*date)
                .execute(&mut *tx)
                .await?
                .rows_affected();
            debug!(%date, rows = gone, "cleared existing rows for date");
        }

        let mut inserted = 0u64;
        for chunk in records.chunks(INSERT_CHUNK) {
            let sql = insert_statement(&self.table, chunk.len());
            let mut query = sqlx::query(&sql);
            for r in chunk {
                query = query
                    .bind(r.pricing_date)
                    .bind(&r.company_id)
                    .bind(r.open_price)
                    .bind(r.high_price)
                    .bind(r.low_price)
                    .bind(r.close_price)
                    .bind(r.volume);
            }
            inserted += query.execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        info!(
            rows = inserted,
            dates = dates.len(),
            table = %self.table,
            "replaced daily rows"
        );
        Ok(inserted)
    }
}

/// The distinct pricing dates of a batch, ordered. The delete step
/// targets exactly this set and no other date.
fn distinct_dates(records: &[PriceRecord]) -> BTreeSet<NaiveDate> {
    records.iter().map(|r| r.pricing_date).collect()
}

fn delete_statement(table: &str) -> String {
    format!("DELETE FROM {} WHERE pricing_date = $1", table)
}

fn insert_statement(table: &str, rows: usize) -> String {
    let width = COLUMNS.len();
    let mut sql = format!("INSERT INTO {} ({}) VALUES ", table, COLUMNS.join(", "));
    for row in 0..rows {
        if row > 0 {
            sql.push_str(", ");
        }
        sql.push('(');
        for col in 0..width {
            if col > 0 {
                sql.push_str(", ");
            }
            sql.push('$');
            sql.push_str(&(row * width + col + 1).to_string());
        }
        sql.push(')');
    }
    sql
}
