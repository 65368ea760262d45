use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{NewsItem, NewsQuery, PriceSeries, Portfolio, Result};

/// Abstraction over the price-history feed.
///
/// `CoinGeckoClient` implements this against the public CoinGecko API.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Recent price history for `coin`. `Ok(None)` means the feed had nothing
    /// usable this cycle, which callers treat as "skip", not as a failure.
    async fn price_history(&self, coin: &str) -> Result<Option<PriceSeries>>;
}

/// Abstraction over the news feed. An empty result is valid.
#[async_trait]
pub trait NewsSource: Send + Sync {
    async fn recent_news(&self, query: &NewsQuery) -> Result<Vec<NewsItem>>;
}

/// Outbound message channel. Fire-and-forget: implementations log their own
/// failures and never retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str);
}

/// Persisted bot state: the held portfolio, followed coins, the per-coin
/// signal register and the sent-news set.
///
/// Every method is a whole-record load/mutate/save. Implementations must
/// serialize read-modify-write so that `should_send_signal` admits at most one
/// send per cooldown window. Time is passed in explicitly.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn portfolio(&self) -> Result<Portfolio>;

    /// Replace the held coin. `amount == None` keeps the current amount.
    async fn set_portfolio(&self, coin: &str, amount: Option<f64>) -> Result<()>;

    async fn followed_coins(&self) -> Result<Vec<String>>;

    /// Cooldown gate for price signals. Returns `true` and records
    /// `(signal_id, now)` for `coin` when the signal may be sent.
    async fn should_send_signal(&self, coin: &str, signal_id: &str, now: DateTime<Utc>) -> Result<bool>;

    async fn was_news_sent(&self, url: &str, now: DateTime<Utc>) -> Result<bool>;

    async fn mark_news_sent(&self, url: &str, now: DateTime<Utc>) -> Result<()>;
}
