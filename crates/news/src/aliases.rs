/// Coin id → surface forms that identify it in article text.
///
/// Order matters: the first entry with any matching alias wins, so an article
/// mentioning both Bitcoin and Ethereum is attributed to Bitcoin. Short
/// tickers such as "dot", "link" or "sol" also collide with ordinary words.
pub const COIN_ALIASES: &[(&str, &[&str])] = &[
    ("bitcoin", &["bitcoin", "btc"]),
    ("ethereum", &["ethereum", "eth"]),
    ("binancecoin", &["binance coin", "bnb", "binance"]),
    ("ripple", &["ripple", "xrp"]),
    ("cardano", &["cardano", "ada"]),
    ("dogecoin", &["dogecoin", "doge"]),
    ("solana", &["solana", "sol"]),
    ("tron", &["tron", "trx"]),
    ("polkadot", &["polkadot", "dot"]),
    ("litecoin", &["litecoin", "ltc"]),
    ("matic-network", &["polygon", "matic"]),
    ("avalanche-2", &["avalanche", "avax"]),
    ("chainlink", &["chainlink", "link"]),
    ("uniswap", &["uniswap", "uni"]),
    ("stellar", &["stellar", "xlm"]),
    ("cosmos", &["cosmos", "atom"]),
    ("monero", &["monero", "xmr"]),
    ("okb", &["okb"]),
    ("hedera-hashgraph", &["hedera", "hbar"]),
    ("aptos", &["aptos", "apt"]),
];

/// First coin in table order with an alias appearing as a whole word in `text`.
pub fn resolve_coin(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    COIN_ALIASES
        .iter()
        .find(|(_, aliases)| aliases.iter().any(|alias| contains_word(&lower, alias)))
        .map(|(coin, _)| *coin)
}

/// True when `needle` occurs in `haystack` with no word character directly
/// before or after it. Word characters are alphanumerics and `_`.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, matched)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + matched.len()..].chars().next();
        !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
