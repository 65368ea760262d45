use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::orchestrator::Orchestrator;

/// How often the scheduler wakes to check whether a loop is due.
pub const TICK: Duration = Duration::from_secs(1);

/// Drives the price and news passes on their own intervals.
///
/// Both passes run on the first tick after start. Passes run inline, so a
/// slow pass delays the other loop rather than overlapping with it.
pub struct Scheduler {
    orchestrator: Arc<Orchestrator>,
    price_every: Duration,
    news_every: Duration,
}

impl Scheduler {
    pub fn new(orchestrator: Arc<Orchestrator>, price_every: Duration, news_every: Duration) -> Self {
        Self {
            orchestrator,
            price_every,
            news_every,
        }
    }

    /// Run until `shutdown` flips to `true` or its sender is dropped.
    /// Call from `tokio::spawn`.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        info!(
            price_every_s = self.price_every.as_secs(),
            news_every_s = self.news_every.as_secs(),
            "Scheduler started"
        );

        let mut ticker = tokio::time::interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut last_price: Option<Instant> = None;
        let mut last_news: Option<Instant> = None;

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("Scheduler stopping");
                        break;
                    }
                    continue;
                }
            }

            let now = Instant::now();
            if is_due(last_price, now, self.price_every) {
                last_price = Some(now);
                if let Err(e) = self.orchestrator.price_pass().await {
                    warn!(error = %e, "Price pass failed");
                }
            }

            let now = Instant::now();
            if is_due(last_news, now, self.news_every) {
                last_news = Some(now);
                if let Err(e) = self.orchestrator.news_pass().await {
                    warn!(error = %e, "News pass failed");
                }
            }
        }
    }
}

/// A loop is due when it has never run or `every` has elapsed since it last did.
pub fn is_due(last: Option<Instant>, now: Instant, every: Duration) -> bool {
    match last {
        None => true,
        Some(at) => now.saturating_duration_since(at) >= every,
    }
}
