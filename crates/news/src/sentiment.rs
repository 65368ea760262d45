use common::Decision;

/// Net keyword lead required before a headline becomes actionable.
pub const ACTION_MARGIN: i32 = 2;

pub const POSITIVE_KEYWORDS: &[&str] = &[
    "approval",
    "adoption",
    "etf approved",
    "partnership",
    "listing",
    "investment",
    "record high",
    "all-time high",
    "funding",
    "bullish",
    "rally",
    "support",
];

pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "ban",
    "hack",
    "exploit",
    "lawsuit",
    "delist",
    "sec charges",
    "regulation crackdown",
    "dump",
    "crash",
    "scam",
    "fraud",
    "outlawed",
];

/// Keyword tallies for one piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sentiment {
    pub positive: i32,
    pub negative: i32,
}

impl Sentiment {
    /// Count how many keywords of each set appear in `text`.
    ///
    /// Matching is plain lower-case substring search, so "ban" also hits
    /// "banned" (and "bank"). Each keyword counts once no matter how often it
    /// appears.
    pub fn of(text: &str) -> Self {
        let lower = text.to_lowercase();
        let hits = |words: &[&str]| words.iter().filter(|w| lower.contains(*w)).count() as i32;
        Self {
            positive: hits(POSITIVE_KEYWORDS),
            negative: hits(NEGATIVE_KEYWORDS),
        }
    }

    pub fn action(&self) -> Decision {
        if self.positive - self.negative >= ACTION_MARGIN {
            Decision::Buy
        } else if self.negative - self.positive >= ACTION_MARGIN {
            Decision::Sell
        } else {
            Decision::Hold
        }
    }
}
