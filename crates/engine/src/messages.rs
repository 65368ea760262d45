//! Operator-facing notification texts.

use common::{CoinAnalysis, NewsItem};

/// How the operator accepts or declines a switch recommendation.
pub fn confirmation_prompt(coin: &str) -> String {
    format!("To confirm: /confirm {coin} — To reject: /reject")
}

pub fn format_reasons(reasons: &[String]) -> String {
    reasons
        .iter()
        .map(|r| format!("• {r}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn sell_message(analysis: &CoinAnalysis) -> String {
    format!(
        "📉 SELL SIGNAL — [{}]\nPrice: ${}\nScore: {}\n{}",
        analysis.coin.to_uppercase(),
        analysis.price,
        analysis.score,
        format_reasons(&analysis.reasons)
    )
}

pub fn switch_message(held: &str, target: &CoinAnalysis) -> String {
    format!(
        "🔁 SWITCH SIGNAL — [{} ➜ {}]\nNew target price: ${} | Score: {}\nReasons:\n{}\n\n{}",
        held.to_uppercase(),
        target.coin.to_uppercase(),
        target.price,
        target.score,
        format_reasons(&target.reasons),
        confirmation_prompt(&target.coin)
    )
}

pub fn news_sell_message(coin: &str, item: &NewsItem) -> String {
    format!(
        "📰 News-driven SELL — [{}]\n{}\n{}",
        coin.to_uppercase(),
        item.title,
        item.url
    )
}

pub fn news_buy_message(coin: &str, item: &NewsItem) -> String {
    format!(
        "📰 News-driven BUY/SWITCH — [{}]\n{}\n{}\n\n{}",
        coin.to_uppercase(),
        item.title,
        item.url,
        confirmation_prompt(coin)
    )
}
