pub mod feeds;
pub mod messages;
pub mod orchestrator;
pub mod scheduler;

pub use feeds::{CoinGeckoClient, NewsApiClient};
pub use orchestrator::{Orchestrator, PassReport};
pub use scheduler::Scheduler;
