pub mod coingecko;
pub mod newsapi;

pub use coingecko::CoinGeckoClient;
pub use newsapi::NewsApiClient;

use common::Error;

/// Timeouts and connection failures are transport faults; everything else
/// reqwest reports is an HTTP-level error.
pub(crate) fn request_error(e: reqwest::Error) -> Error {
    if e.is_timeout() || e.is_connect() {
        Error::Transport(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}
