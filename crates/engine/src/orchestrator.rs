use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use common::{
    CoinAnalysis, Decision, Error, NewsItem, NewsQuery, NewsSource, Notifier, PriceSource,
    Result, StateStore,
};
use news::NewsClassifier;
use strategy::Analyzer;

use crate::messages;

/// Counters for one pass, mainly for logs and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Coins or news items that were fully evaluated.
    pub evaluated: usize,
    /// Items skipped for missing data, short history or no coin match.
    pub skipped: usize,
    /// Per-item failures that were logged and passed over.
    pub failed: usize,
    /// Notifications sent.
    pub sent: usize,
}

/// Runs the price and news passes against the held portfolio.
///
/// Neither pass is aborted by a single coin or article: feed failures,
/// missing data and classification misses are logged and skipped.
pub struct Orchestrator {
    prices: Arc<dyn PriceSource>,
    news: Arc<dyn NewsSource>,
    store: Arc<dyn StateStore>,
    notifier: Arc<dyn Notifier>,
    analyzer: Analyzer,
    classifier: NewsClassifier,
    news_query: NewsQuery,
    politeness_delay: Duration,
}

impl Orchestrator {
    pub fn new(
        prices: Arc<dyn PriceSource>,
        news: Arc<dyn NewsSource>,
        store: Arc<dyn StateStore>,
        notifier: Arc<dyn Notifier>,
        analyzer: Analyzer,
    ) -> Self {
        Self {
            prices,
            news,
            store,
            notifier,
            analyzer,
            classifier: NewsClassifier::new(),
            news_query: NewsQuery::default(),
            politeness_delay: Duration::from_secs(1),
        }
    }

    /// Pause between coins in the price pass, to stay under feed rate limits.
    pub fn with_politeness_delay(mut self, delay: Duration) -> Self {
        self.politeness_delay = delay;
        self
    }

    /// Score every followed coin, warn about a SELL on the held coin, and
    /// recommend a switch to the best BUY candidate when it is another coin.
    pub async fn price_pass(&self) -> Result<PassReport> {
        let portfolio = self.store.portfolio().await?;
        let coins = self.store.followed_coins().await?;
        let held = portfolio.coin.as_str();

        let mut report = PassReport::default();
        let mut best_buy: Option<CoinAnalysis> = None;

        for (i, coin) in coins.iter().enumerate() {
            if i > 0 && !self.politeness_delay.is_zero() {
                tokio::time::sleep(self.politeness_delay).await;
            }

            let analysis = match self.analyse(coin).await {
                Ok(analysis) => analysis,
                Err(e) if e.is_skip() => {
                    debug!(coin = %coin, reason = %e, "Coin skipped");
                    report.skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!(coin = %coin, error = %e, "Price analysis failed");
                    report.failed += 1;
                    continue;
                }
            };
            report.evaluated += 1;

            if coin == held && analysis.decision == Decision::Sell {
                let signal_id = format!("{coin}-SELL");
                if self.admit(coin, &signal_id).await {
                    self.notifier.notify(&messages::sell_message(&analysis)).await;
                    report.sent += 1;
                }
            }

            // Ties keep the first candidate in followed-list order
            if analysis.decision == Decision::Buy
                && best_buy.as_ref().map_or(true, |best| analysis.score > best.score)
            {
                best_buy = Some(analysis);
            }
        }

        if let Some(target) = best_buy.filter(|b| b.coin != held) {
            let signal_id = format!("SWITCH-{held}-TO-{}", target.coin);
            if self.admit(&target.coin, &signal_id).await {
                self.notifier
                    .notify(&messages::switch_message(held, &target))
                    .await;
                report.sent += 1;
            }
        }

        info!(
            evaluated = report.evaluated,
            skipped = report.skipped,
            failed = report.failed,
            sent = report.sent,
            "Price pass complete"
        );
        Ok(report)
    }

    /// Classify recent articles and forward the actionable ones: SELL news on
    /// the held coin, BUY news on any other coin. Each URL is sent once per
    /// dedupe horizon.
    pub async fn news_pass(&self) -> Result<PassReport> {
        let items = self.news.recent_news(&self.news_query).await?;
        let mut report = PassReport::default();
        if items.is_empty() {
            debug!("No news items this cycle");
            return Ok(report);
        }

        let portfolio = self.store.portfolio().await?;

        for item in &items {
            match self.handle_news_item(item, &portfolio.coin).await {
                Ok(sent) => {
                    report.evaluated += 1;
                    if sent {
                        report.sent += 1;
                    }
                }
                Err(e) if e.is_skip() => {
                    debug!(url = %item.url, reason = %e, "News item skipped");
                    report.skipped += 1;
                }
                Err(e) => {
                    warn!(url = %item.url, error = %e, "News item processing failed");
                    report.failed += 1;
                }
            }
        }

        info!(
            items = items.len(),
            skipped = report.skipped,
            failed = report.failed,
            sent = report.sent,
            "News pass complete"
        );
        Ok(report)
    }

    async fn analyse(&self, coin: &str) -> Result<CoinAnalysis> {
        let series = self
            .prices
            .price_history(coin)
            .await?
            .ok_or_else(|| Error::DataUnavailable(coin.to_string()))?;
        self.analyzer.analyze(coin, &series)
    }

    /// Returns whether a notification went out.
    async fn handle_news_item(&self, item: &NewsItem, held: &str) -> Result<bool> {
        if item.url.is_empty() {
            return Err(Error::DataUnavailable("news item without url".into()));
        }
        if self.store.was_news_sent(&item.url, Utc::now()).await? {
            return Ok(false);
        }

        let (coin, verdict) = self.classifier.classify(item)?;
        let text = match verdict.action {
            Decision::Sell if coin == held => messages::news_sell_message(&coin, item),
            Decision::Buy if coin != held => messages::news_buy_message(&coin, item),
            _ => return Ok(false),
        };

        self.notifier.notify(&text).await;
        self.store.mark_news_sent(&item.url, Utc::now()).await?;
        Ok(true)
    }

    /// Gate check; a store failure counts as "do not send".
    async fn admit(&self, coin: &str, signal_id: &str) -> bool {
        match self.store.should_send_signal(coin, signal_id, Utc::now()).await {
            Ok(allowed) => {
                if !allowed {
                    debug!(coin = %coin, signal_id = %signal_id, "Signal in cooldown");
                }
                allowed
            }
            Err(e) => {
                warn!(coin = %coin, signal_id = %signal_id, error = %e, "Signal gate unavailable");
                false
            }
        }
    }
}
