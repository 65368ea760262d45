use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tokio::sync::Mutex;
use tracing::{debug, info};

use common::{Error, Portfolio, Result, SignalRecord, StateStore};

use crate::register::{blocks_repeat, is_live};
use crate::{GateConfig, StoreDefaults};

/// SQLite-backed state store.
///
/// Read-modify-write operations run inside a transaction while holding
/// `write_lock`, so the Telegram handlers and the scheduler never interleave
/// a gate check.
pub struct SqliteStore {
    pool: SqlitePool,
    gate: GateConfig,
    defaults: StoreDefaults,
    write_lock: Mutex<()>,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `url` and run migrations.
    pub async fn connect(url: &str, gate: GateConfig, defaults: StoreDefaults) -> Result<Self> {
        let pool = SqlitePoolOptions::new().max_connections(4).connect(url).await?;
        Self::new(pool, gate, defaults).await
    }

    pub async fn new(pool: SqlitePool, gate: GateConfig, defaults: StoreDefaults) -> Result<Self> {
        sqlx::migrate!("../../migrations").run(&pool).await?;
        info!("State store ready");
        Ok(Self {
            pool,
            gate,
            defaults,
            write_lock: Mutex::new(()),
        })
    }
}

#[async_trait]
impl StateStore for SqliteStore {
    async fn portfolio(&self) -> Result<Portfolio> {
        let row: Option<(String, f64)> =
            sqlx::query_as("SELECT coin, amount FROM portfolio WHERE id = 1")
                .fetch_optional(&self.pool)
                .await?;
        Ok(row
            .map(|(coin, amount)| Portfolio { coin, amount })
            .unwrap_or_else(|| self.defaults.portfolio.clone()))
    }

    async fn set_portfolio(&self, coin: &str, amount: Option<f64>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let amount = match amount {
            Some(a) => a,
            None => self.portfolio().await?.amount,
        };
        sqlx::query(
            r#"
            INSERT INTO portfolio (id, coin, amount) VALUES (1, ?1, ?2)
            ON CONFLICT(id) DO UPDATE SET coin = excluded.coin, amount = excluded.amount
            "#,
        )
        .bind(coin)
        .bind(amount)
        .execute(&self.pool)
        .await?;
        debug!(coin = %coin, amount, "Portfolio updated");
        Ok(())
    }

    async fn followed_coins(&self) -> Result<Vec<String>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT coin FROM followed_coins ORDER BY position")
                .fetch_all(&self.pool)
                .await?;
        if rows.is_empty() {
            return Ok(self.defaults.followed.clone());
        }
        Ok(rows.into_iter().map(|(coin,)| coin).collect())
    }

    async fn should_send_signal(&self, coin: &str, signal_id: &str, now: DateTime<Utc>) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut tx = self.pool.begin().await?;

        let row: Option<(String, i64)> =
            sqlx::query_as("SELECT signal_id, sent_at FROM last_signals WHERE coin = ?1")
                .bind(coin)
                .fetch_optional(&mut *tx)
                .await?;
        let last = row
            .map(|(signal_id, sent_at)| {
                from_millis(sent_at).map(|sent_at| SignalRecord { signal_id, sent_at })
            })
            .transpose()?;

        if blocks_repeat(last.as_ref(), signal_id, now, self.gate.cooldown) {
            debug!(coin = %coin, signal_id = %signal_id, "Signal suppressed by cooldown");
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO last_signals (coin, signal_id, sent_at) VALUES (?1, ?2, ?3)
            ON CONFLICT(coin) DO UPDATE SET signal_id = excluded.signal_id, sent_at = excluded.sent_at
            "#,
        )
        .bind(coin)
        .bind(signal_id)
        .bind(now.timestamp_millis())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn was_news_sent(&self, url: &str, now: DateTime<Utc>) -> Result<bool> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT sent_at FROM sent_news WHERE url = ?1")
            .bind(url)
            .fetch_optional(&self.pool)
            .await?;
        match row {
            Some((sent_at,)) => Ok(is_live(from_millis(sent_at)?, now, self.gate.news_horizon)),
            None => Ok(false),
        }
    }

    async fn mark_news_sent(&self, url: &str, now: DateTime<Utc>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        sqlx::query(
            r#"
            INSERT INTO sent_news (url, sent_at) VALUES (?1, ?2)
            ON CONFLICT(url) DO UPDATE SET sent_at = excluded.sent_at
            "#,
        )
        .bind(url)
        .bind(now.timestamp_millis())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
        .ok_or_else(|| Error::Other(format!("stored timestamp out of range: {ms}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    async fn store() -> SqliteStore {
        // One long-lived connection: every new in-memory connection is a fresh database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteStore::new(pool, GateConfig::default(), StoreDefaults::default())
            .await
            .unwrap()
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn empty_store_reports_defaults() {
        let s = store().await;
        assert_eq!(s.portfolio().await.unwrap(), Portfolio::default());
        assert_eq!(s.followed_coins().await.unwrap(), StoreDefaults::default().followed);
    }

    #[tokio::test]
    async fn portfolio_round_trips_and_keeps_amount() {
        let s = store().await;
        s.set_portfolio("cardano", Some(42.5)).await.unwrap();
        s.set_portfolio("solana", None).await.unwrap();
        let pf = s.portfolio().await.unwrap();
        assert_eq!(pf.coin, "solana");
        assert_eq!(pf.amount, 42.5);
    }

    #[tokio::test]
    async fn followed_coins_keep_stored_order() {
        let s = store().await;
        sqlx::query("INSERT INTO followed_coins (position, coin) VALUES (2, 'ethereum'), (1, 'solana')")
            .execute(&s.pool)
            .await
            .unwrap();
        assert_eq!(s.followed_coins().await.unwrap(), vec!["solana", "ethereum"]);
    }

    #[tokio::test]
    async fn signal_cooldown_applies_to_identical_ids_only() {
        let s = store().await;
        assert!(s.should_send_signal("bitcoin", "bitcoin-SELL", t0()).await.unwrap());
        assert!(!s
            .should_send_signal("bitcoin", "bitcoin-SELL", t0() + Duration::minutes(30))
            .await
            .unwrap());
        assert!(s
            .should_send_signal("bitcoin", "SWITCH-ethereum-TO-bitcoin", t0() + Duration::minutes(30))
            .await
            .unwrap());
        assert!(s
            .should_send_signal("bitcoin", "bitcoin-SELL", t0() + Duration::minutes(31))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn signal_allowed_again_after_cooldown() {
        let s = store().await;
        assert!(s.should_send_signal("solana", "X", t0()).await.unwrap());
        assert!(s
            .should_send_signal("solana", "X", t0() + Duration::minutes(61))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn news_marks_expire() {
        let s = store().await;
        let url = "https://example.com/story";
        assert!(!s.was_news_sent(url, t0()).await.unwrap());
        s.mark_news_sent(url, t0()).await.unwrap();
        assert!(s.was_news_sent(url, t0() + Duration::hours(1)).await.unwrap());
        assert!(!s.was_news_sent(url, t0() + Duration::hours(25)).await.unwrap());
        // Re-marking revives it
        s.mark_news_sent(url, t0() + Duration::hours(25)).await.unwrap();
        assert!(s.was_news_sent(url, t0() + Duration::hours(26)).await.unwrap());
    }
}
