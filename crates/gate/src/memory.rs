use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use common::{Portfolio, Result, StateStore};

use crate::register::{NewsLedger, SignalRegister};
use crate::{GateConfig, StoreDefaults};

struct MemoryState {
    portfolio: Portfolio,
    followed: Vec<String>,
    signals: SignalRegister,
    news: NewsLedger,
}

/// In-process state store. Nothing survives a restart.
pub struct MemoryStore {
    gate: GateConfig,
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    pub fn new(gate: GateConfig, defaults: StoreDefaults) -> Self {
        Self {
            gate,
            state: Mutex::new(MemoryState {
                portfolio: defaults.portfolio,
                followed: defaults.followed,
                signals: SignalRegister::new(),
                news: NewsLedger::new(),
            }),
        }
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn portfolio(&self) -> Result<Portfolio> {
        Ok(self.state.lock().await.portfolio.clone())
    }

    async fn set_portfolio(&self, coin: &str, amount: Option<f64>) -> Result<()> {
        let mut state = self.state.lock().await;
        let amount = amount.unwrap_or(state.portfolio.amount);
        state.portfolio = Portfolio {
            coin: coin.to_string(),
            amount,
        };
        debug!(coin = %coin, amount, "Portfolio updated");
        Ok(())
    }

    async fn followed_coins(&self) -> Result<Vec<String>> {
        Ok(self.state.lock().await.followed.clone())
    }

    async fn should_send_signal(&self, coin: &str, signal_id: &str, now: DateTime<Utc>) -> Result<bool> {
        let mut state = self.state.lock().await;
        Ok(state.signals.admit(coin, signal_id, now, self.gate.cooldown))
    }

    async fn was_news_sent(&self, url: &str, now: DateTime<Utc>) -> Result<bool> {
        Ok(self
            .state
            .lock()
            .await
            .news
            .was_sent(url, now, self.gate.news_horizon))
    }

    async fn mark_news_sent(&self, url: &str, now: DateTime<Utc>) -> Result<()> {
        self.state.lock().await.news.mark(url, now);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn store() -> MemoryStore {
        MemoryStore::new(GateConfig::default(), StoreDefaults::default())
    }

    #[tokio::test]
    async fn defaults_until_written() {
        let s = store();
        assert_eq!(s.portfolio().await.unwrap(), Portfolio::default());
        assert_eq!(s.followed_coins().await.unwrap()[0], "bitcoin");
    }

    #[tokio::test]
    async fn set_portfolio_keeps_amount_when_omitted() {
        let s = store();
        s.set_portfolio("solana", Some(1250.0)).await.unwrap();
        s.set_portfolio("ethereum", None).await.unwrap();
        let pf = s.portfolio().await.unwrap();
        assert_eq!(pf.coin, "ethereum");
        assert_eq!(pf.amount, 1250.0);
    }

    #[tokio::test]
    async fn signal_gate_true_then_false() {
        let s = store();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        assert!(s.should_send_signal("bitcoin", "X", now).await.unwrap());
        assert!(!s.should_send_signal("bitcoin", "X", now + Duration::minutes(5)).await.unwrap());
        assert!(s.should_send_signal("bitcoin", "Y", now + Duration::minutes(5)).await.unwrap());
    }

    #[tokio::test]
    async fn news_dedupe_round_trip() {
        let s = store();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let url = "https://example.com/n1";
        assert!(!s.was_news_sent(url, now).await.unwrap());
        s.mark_news_sent(url, now).await.unwrap();
        assert!(s.was_news_sent(url, now).await.unwrap());
        assert!(!s.was_news_sent(url, now + Duration::hours(25)).await.unwrap());
    }
}
