use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One observation of a coin's USD price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Chronological price history for one coin (oldest first).
/// Duplicate timestamps are not rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Close prices in chronological order.
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn last_price(&self) -> Option<f64> {
        self.points.last().map(|p| p.price)
    }
}

/// Ternary trading recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Buy => write!(f, "BUY"),
            Decision::Sell => write!(f, "SELL"),
            Decision::Hold => write!(f, "HOLD"),
        }
    }
}

/// Result of analysing one coin in a price pass. Indicator values are rounded
/// for display; the decision was taken on the unrounded values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinAnalysis {
    pub coin: String,
    pub price: f64,
    pub rsi: f64,
    pub macd: f64,
    pub macd_signal: f64,
    pub boll_upper: Option<f64>,
    pub boll_lower: Option<f64>,
    pub decision: Decision,
    pub reasons: Vec<String>,
    pub score: i32,
}

/// A news article as delivered by the news feed. `url` is its identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub description: String,
    pub url: String,
    pub published_at: Option<DateTime<Utc>>,
    pub source: String,
}

impl NewsItem {
    /// Title and description joined by a single space.
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Outcome of classifying a news item. `coin == None` means the item is skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsVerdict {
    pub coin: Option<String>,
    pub action: Decision,
}

/// Parameters of one news fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub query: String,
    /// Look-back window in hours.
    pub hours: u32,
    pub page_size: u32,
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            query: "crypto OR bitcoin OR ethereum".to_string(),
            hours: 2,
            page_size: 30,
        }
    }
}

/// The single held position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub coin: String,
    pub amount: f64,
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            coin: "bitcoin".to_string(),
            amount: 700.0,
        }
    }
}

/// Most recently sent signal for a coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub signal_id: String,
    pub sent_at: DateTime<Utc>,
}
