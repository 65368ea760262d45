use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::request_error;
use common::{Error, PricePoint, PriceSeries, PriceSource, Result};

const BASE_URL: &str = "https://api.coingecko.com/api/v3";
const TIMEOUT: Duration = Duration::from_secs(15);

/// REST client for CoinGecko's public market-chart endpoint.
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
}

impl CoinGeckoClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .use_rustls_tls()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn price_history(&self, coin: &str) -> Result<Option<PriceSeries>> {
        let url = format!("{}/coins/{coin}/market_chart", self.base_url);
        debug!(coin = %coin, "Fetching price history");

        // A two-day range comes back at hourly granularity
        let resp = self
            .http
            .get(&url)
            .query(&[("vs_currency", "usd"), ("days", "2")])
            .send()
            .await
            .map_err(request_error)?;

        let status = resp.status();
        let body = resp.text().await.map_err(request_error)?;

        if !status.is_success() {
            return Err(Error::Http(format!("HTTP {status}: {body}")));
        }
        parse_market_chart(&body)
    }
}

// ─── Response types ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct MarketChart {
    /// `[timestamp_ms, price]` pairs, oldest first.
    prices: Option<Vec<(f64, f64)>>,
}

/// `Ok(None)` when the payload carries no `prices` array.
fn parse_market_chart(body: &str) -> Result<Option<PriceSeries>> {
    let chart: MarketChart = serde_json::from_str(body)?;
    let Some(prices) = chart.prices else {
        return Ok(None);
    };

    let points = prices
        .into_iter()
        .filter_map(|(ts_ms, price)| {
            DateTime::from_timestamp_millis(ts_ms as i64).map(|timestamp| PricePoint { timestamp, price })
        })
        .collect();
    Ok(Some(PriceSeries::new(points)))
}
