use std::time::Duration;

use crate::Portfolio;

/// Coins followed by the price loop when the store has no list yet.
pub const DEFAULT_TOP_COINS: &[&str] = &[
    "bitcoin",
    "ethereum",
    "binancecoin",
    "ripple",
    "cardano",
    "dogecoin",
    "solana",
    "tron",
    "polkadot",
    "litecoin",
];

/// All configuration loaded from environment variables at startup.
/// Malformed values cause an immediate panic with a clear message.
#[derive(Debug, Clone)]
pub struct Config {
    // Telegram (both unset = log messages instead of sending)
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<i64>,

    // News feed
    pub newsapi_key: Option<String>,

    // Loop timing
    pub price_loop_interval: Duration,
    pub news_loop_interval: Duration,
    /// Pause between coins inside one price pass.
    pub politeness_delay: Duration,

    // Gate
    pub signal_cooldown: Duration,
    pub news_dedupe_horizon: Duration,

    // Defaults for an empty store
    pub top_coins: Vec<String>,
    pub default_portfolio: Portfolio,

    // Database
    pub database_url: String,

    // Strategy config file path
    pub strategy_config_path: Option<String>,
}

impl Config {
    /// Load all configuration from environment variables.
    /// Loads `.env` if present.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // ignore error if .env not present

        let telegram_chat_id = optional_env("TELEGRAM_CHAT_ID").map(|s| {
            s.trim()
                .parse::<i64>()
                .unwrap_or_else(|_| panic!("TELEGRAM_CHAT_ID must be numeric, got: '{s}'"))
        });

        let top_coins = optional_env("TOP_COINS")
            .map(|v| parse_coin_list(&v))
            .filter(|coins| !coins.is_empty())
            .unwrap_or_else(|| DEFAULT_TOP_COINS.iter().map(|c| c.to_string()).collect());

        let defaults = Portfolio::default();
        let default_portfolio = Portfolio {
            coin: optional_env("PORTFOLIO_COIN")
                .map(|c| c.trim().to_lowercase())
                .unwrap_or(defaults.coin),
            amount: parsed_env("PORTFOLIO_AMOUNT", defaults.amount),
        };

        Config {
            telegram_token: optional_env("TELEGRAM_TOKEN"),
            telegram_chat_id,
            newsapi_key: optional_env("NEWSAPI_KEY"),
            price_loop_interval: Duration::from_secs(parsed_env("PRICE_LOOP_SEC", 300)),
            news_loop_interval: Duration::from_secs(parsed_env("NEWS_LOOP_SEC", 600)),
            politeness_delay: Duration::from_millis(parsed_env("POLITENESS_DELAY_MS", 1000)),
            signal_cooldown: Duration::from_secs(scaled_env("SIGNAL_COOLDOWN_MIN", 60, 60)),
            news_dedupe_horizon: Duration::from_secs(scaled_env("NEWS_DEDUPE_HOURS", 24, 3600)),
            top_coins,
            default_portfolio,
            database_url: optional_env("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://coinsignal.db?mode=rwc".to_string()),
            strategy_config_path: optional_env("STRATEGY_CONFIG_PATH"),
        }
    }

    /// Telegram is enabled only when both the token and the chat id are set.
    pub fn telegram(&self) -> Option<(&str, i64)> {
        match (&self.telegram_token, self.telegram_chat_id) {
            (Some(token), Some(chat_id)) => Some((token.as_str(), chat_id)),
            _ => None,
        }
    }
}

/// Split a comma-separated coin list, lower-casing ids and dropping blanks
/// and repeats while keeping the first-seen order.
pub fn parse_coin_list(raw: &str) -> Vec<String> {
    let mut coins: Vec<String> = Vec::new();
    for coin in raw.split(',').map(|c| c.trim().to_lowercase()) {
        if !coin.is_empty() && !coins.contains(&coin) {
            coins.push(coin);
        }
    }
    coins
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parsed_env<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    match optional_env(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            panic!("Environment variable '{key}' has an invalid value: '{raw}'")
        }),
        None => default,
    }
}

/// A whole-unit variable (minutes, hours) converted to seconds.
fn scaled_env(key: &str, default: u64, secs_per_unit: u64) -> u64 {
    let value: u64 = parsed_env(key, default);
    value
        .checked_mul(secs_per_unit)
        .unwrap_or_else(|| panic!("Environment variable '{key}' is too large: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_list_keeps_order_and_drops_repeats() {
        let coins = parse_coin_list(" Bitcoin, ethereum,,bitcoin , solana ");
        assert_eq!(coins, vec!["bitcoin", "ethereum", "solana"]);
    }

    #[test]
    fn default_coin_list_is_top_ten() {
        assert_eq!(DEFAULT_TOP_COINS.len(), 10);
        assert_eq!(DEFAULT_TOP_COINS[0], "bitcoin");
    }

    #[test]
    fn scaled_env_converts_units() {
        std::env::set_var("COINSIGNAL_TEST_SCALED_MIN", "90");
        assert_eq!(scaled_env("COINSIGNAL_TEST_SCALED_MIN", 60, 60), 5400);
        assert_eq!(scaled_env("COINSIGNAL_TEST_SCALED_UNSET", 24, 3600), 86_400);
    }

    #[test]
    #[should_panic(expected = "COINSIGNAL_TEST_HUGE_MIN' is too large")]
    fn scaled_env_rejects_overflow() {
        std::env::set_var("COINSIGNAL_TEST_HUGE_MIN", u64::MAX.to_string());
        scaled_env("COINSIGNAL_TEST_HUGE_MIN", 60, 60);
    }
}
