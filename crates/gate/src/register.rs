use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use common::SignalRecord;

/// True when `signal_id` repeats the coin's last sent signal and the cooldown
/// has not yet run out. A different id is never blocked.
pub fn blocks_repeat(
    last: Option<&SignalRecord>,
    signal_id: &str,
    now: DateTime<Utc>,
    cooldown: Duration,
) -> bool {
    last.is_some_and(|r| r.signal_id == signal_id && now - r.sent_at < cooldown)
}

/// True while a record stamped `sent_at` is younger than `horizon`.
pub fn is_live(sent_at: DateTime<Utc>, now: DateTime<Utc>, horizon: Duration) -> bool {
    now - sent_at < horizon
}

/// Single-slot register per coin holding the most recently sent signal.
///
/// Transition: a blocked repeat leaves the slot untouched; anything else
/// overwrites it with `(signal_id, now)`.
#[derive(Debug, Clone, Default)]
pub struct SignalRegister {
    slots: HashMap<String, SignalRecord>,
}

impl SignalRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide whether `signal_id` may be sent for `coin` at `now`, recording it if so.
    pub fn admit(&mut self, coin: &str, signal_id: &str, now: DateTime<Utc>, cooldown: Duration) -> bool {
        if blocks_repeat(self.slots.get(coin), signal_id, now, cooldown) {
            return false;
        }
        self.slots.insert(
            coin.to_string(),
            SignalRecord {
                signal_id: signal_id.to_string(),
                sent_at: now,
            },
        );
        true
    }

    pub fn last(&self, coin: &str) -> Option<&SignalRecord> {
        self.slots.get(coin)
    }
}

/// Sent news URLs and when they were sent. Expired entries stay in the map
/// but read as unsent.
#[derive(Debug, Clone, Default)]
pub struct NewsLedger {
    sent: HashMap<String, DateTime<Utc>>,
}

impl NewsLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn was_sent(&self, url: &str, now: DateTime<Utc>, horizon: Duration) -> bool {
        self.sent
            .get(url)
            .is_some_and(|&sent_at| is_live(sent_at, now, horizon))
    }

    pub fn mark(&mut self, url: &str, now: DateTime<Utc>) {
        self.sent.insert(url.to_string(), now);
    }
}
