use anyhow::Result;
use ngxscraper::{
    config::Settings,
    error::EtlError,
    fetch, process,
    store::PriceStore,
};
use reqwest::Client;
use std::{env, path::PathBuf, time::Duration};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(filter).init();
    info!("startup");

    // ─── 2) load settings (optional YAML path as first arg) ──────────
    let config_path = env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load(config_path.as_deref())?;

    // ─── 3) scrape the rendered price table ──────────────────────────
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    let html = fetch::page::fetch_price_page(&client, &settings.source).await?;
    let raw = fetch::table::parse_price_table(&html, &settings.source.table_id)?;
    info!(
        columns = raw.headers.len(),
        rows = raw.rows.len(),
        "scraped price table"
    );

    // ─── 4) normalize into typed records ─────────────────────────────
    let records = process::normalize(&raw)?;
    if records.is_empty() {
        return Err(EtlError::EmptyBatch.into());
    }
    info!(
        kept = records.len(),
        dropped = raw.rows.len() - records.len(),
        "normalized price table"
    );

    // ─── 5) replace the batch's dates in the store ───────────────────
    let store = PriceStore::connect(&settings.database).await?;
    let inserted = store.replace_daily(&records).await?;

    let latest = records.iter().map(|r| r.pricing_date).max();
    info!(rows = inserted, latest = ?latest, "run complete");
    Ok(())
}
