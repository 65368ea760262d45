use chrono::{Duration, TimeZone, Utc};
use common::StateStore;
use gate::{GateConfig, MemoryStore, StoreDefaults};
use proptest::prelude::*;

proptest! {
    /// Replaying any schedule of signal ids against the store admits a signal
    /// exactly when it is new for the coin or its cooldown has lapsed.
    #[test]
    fn gate_matches_cooldown_model(
        calls in prop::collection::vec((0usize..3, 0i64..90), 1..40),
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let cooldown = Duration::minutes(60);
            let gate = GateConfig { cooldown, news_horizon: Duration::hours(24) };
            let store = MemoryStore::new(gate, StoreDefaults::default());
            let ids = ["bitcoin-SELL", "SWITCH-ethereum-TO-bitcoin", "X"];

            let mut now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let mut last: Option<(usize, chrono::DateTime<Utc>)> = None;

            for (id, advance) in calls {
                now += Duration::minutes(advance);
                let expected = match last {
                    Some((prev, sent_at)) => prev != id || now - sent_at >= cooldown,
                    None => true,
                };
                let admitted = store.should_send_signal("bitcoin", ids[id], now).await.unwrap();
                assert_eq!(admitted, expected, "id {} at {}", ids[id], now);
                if admitted {
                    last = Some((id, now));
                }
            }
        });
    }

    /// News marks are visible for exactly the dedupe horizon.
    #[test]
    fn news_visible_until_horizon(elapsed_minutes in 0i64..3000) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async move {
            let store = MemoryStore::new(GateConfig::default(), StoreDefaults::default());
            let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            store.mark_news_sent("https://example.com/x", t0).await.unwrap();
            let seen = store
                .was_news_sent("https://example.com/x", t0 + Duration::minutes(elapsed_minutes))
                .await
                .unwrap();
            assert_eq!(seen, elapsed_minutes < 24 * 60);
        });
    }
}
