use tracing::debug;

use common::{Error, NewsItem, NewsVerdict, Result};

use crate::aliases::resolve_coin;
use crate::sentiment::Sentiment;

/// Attributes a news item to a coin and derives a BUY/SELL/HOLD action from
/// its wording.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewsClassifier;

impl NewsClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify without failing; an unresolved coin is reported as `None`.
    pub fn verdict(&self, item: &NewsItem) -> NewsVerdict {
        let text = item.text();
        let coin = resolve_coin(&text).map(str::to_string);
        let sentiment = Sentiment::of(&text);
        NewsVerdict {
            coin,
            action: sentiment.action(),
        }
    }

    /// Like [`verdict`](Self::verdict) but an item that names no known coin
    /// is a `ClassificationMiss`.
    pub fn classify(&self, item: &NewsItem) -> Result<(String, NewsVerdict)> {
        let verdict = self.verdict(item);
        match verdict.coin.clone() {
            Some(coin) => {
                debug!(coin = %coin, action = %verdict.action, url = %item.url, "News item classified");
                Ok((coin, verdict))
            }
            None => Err(Error::ClassificationMiss(item.url.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Decision;

    fn item(title: &str, description: &str) -> NewsItem {
        NewsItem {
            title: title.to_string(),
            description: description.to_string(),
            url: "https://example.com/a".to_string(),
            ..NewsItem::default()
        }
    }

    #[test]
    fn coin_and_action_come_from_title_and_description() {
        let v = NewsClassifier::new().verdict(&item(
            "Solana lands partnership",
            "Analysts turn bullish",
        ));
        assert_eq!(v.coin.as_deref(), Some("solana"));
        assert_eq!(v.action, Decision::Buy);
    }

    #[test]
    fn alias_split_across_fields_still_matches() {
        // Title and description are joined with a space
        let v = NewsClassifier::new().verdict(&item("Markets update:", "XRP steady"));
        assert_eq!(v.coin.as_deref(), Some("ripple"));
        assert_eq!(v.action, Decision::Hold);
    }

    #[test]
    fn unknown_coin_is_a_miss() {
        let err = NewsClassifier::new()
            .classify(&item("Stocks rally on funding news", "Investment pours in"))
            .unwrap_err();
        assert!(matches!(err, Error::ClassificationMiss(url) if url == "https://example.com/a"));
    }

    #[test]
    fn held_coin_sell_news() {
        let (coin, v) = NewsClassifier::new()
            .classify(&item("Bitcoin exchange hack", "Users fear a dump"))
            .unwrap();
        assert_eq!(coin, "bitcoin");
        assert_eq!(v.action, Decision::Sell);
    }
}
