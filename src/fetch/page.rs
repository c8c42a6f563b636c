use std::time::Duration;

use reqwest::Client;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

use super::table;
use crate::config::SourceSettings;
use crate::error::EtlError;

const POLL_DELAY: Duration = Duration::from_secs(2);

/// Fetch the price-list page, polling until the rendered table shows up
/// or the configured wait expires. This is the pipeline's only
/// suspension point; expiry surfaces as an extraction error and the run
/// is over — nothing here retries past the deadline.
pub async fn fetch_price_page(
    client: &Client,
    source: &SourceSettings,
) -> Result<String, EtlError> {
    let deadline = Instant::now() + Duration::from_secs(source.wait_secs);
    let mut last_problem = String::from("table never appeared");

    loop {
        match fetch_body(client, &source.url).await {
            Ok(html) => {
                if table::has_price_table(&html, &source.table_id) {
                    return Ok(html);
                }
                debug!(table_id = %source.table_id, "page up, table not rendered yet");
                last_problem = format!("no table #{} in page body", source.table_id);
            }
            Err(err) => {
                warn!(url = %source.url, "page fetch failed: {err}");
                last_problem = err.to_string();
            }
        }

        if Instant::now() + POLL_DELAY > deadline {
            return Err(EtlError::Extraction(format!(
                "price table not found within {}s: {}",
                source.wait_secs, last_problem
            )));
        }
        sleep(POLL_DELAY).await;
    }
}

async fn fetch_body(client: &Client, url: &str) -> Result<String, reqwest::Error> {
    let resp = client.get(url).send().await?.error_for_status()?;
    resp.text().await
}
