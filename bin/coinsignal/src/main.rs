use std::sync::Arc;

use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use common::{Config, NewsSource, Notifier, PriceSource, StateStore};
use engine::{CoinGeckoClient, NewsApiClient, Orchestrator, Scheduler};
use gate::{GateConfig, SqliteStore, StoreDefaults};
use strategy::{Analyzer, StrategyConfig};
use telegram_ctrl::{start_bot, BotDeps, LogNotifier, TelegramNotifier};

#[tokio::main]
async fn main() {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(
        coins = cfg.top_coins.len(),
        price_every_s = cfg.price_loop_interval.as_secs(),
        news_every_s = cfg.news_loop_interval.as_secs(),
        "CoinSignal starting"
    );

    // ── State store ───────────────────────────────────────────────────────────
    let gate_cfg = GateConfig::from_config(&cfg).unwrap_or_else(|e| panic!("Invalid gate config: {e}"));
    let store: Arc<dyn StateStore> = Arc::new(
        SqliteStore::connect(&cfg.database_url, gate_cfg, StoreDefaults::from_config(&cfg))
            .await
            .unwrap_or_else(|e| panic!("Failed to open state store: {e}")),
    );

    // ── Strategy ──────────────────────────────────────────────────────────────
    let strategy_cfg = match &cfg.strategy_config_path {
        Some(path) => StrategyConfig::load(path)
            .unwrap_or_else(|e| panic!("Failed to load strategy config {path}: {e}")),
        None => StrategyConfig::default(),
    };
    let analyzer = Analyzer::from_config(&strategy_cfg);

    // ── Feeds ─────────────────────────────────────────────────────────────────
    let prices: Arc<dyn PriceSource> = Arc::new(
        CoinGeckoClient::new().unwrap_or_else(|e| panic!("Failed to build price client: {e}")),
    );
    if cfg.newsapi_key.is_none() {
        warn!("NEWSAPI_KEY not set, news loop will see no articles");
    }
    let news: Arc<dyn NewsSource> = Arc::new(
        NewsApiClient::new(cfg.newsapi_key.clone())
            .unwrap_or_else(|e| panic!("Failed to build news client: {e}")),
    );

    // ── Telegram ──────────────────────────────────────────────────────────────
    let bot = cfg
        .telegram()
        .map(|(token, chat_id)| (teloxide::Bot::new(token), chat_id));
    let notifier: Arc<dyn Notifier> = match &bot {
        Some((bot, chat_id)) => Arc::new(TelegramNotifier::new(bot.clone(), *chat_id)),
        None => {
            warn!("Telegram not configured, signals will only be logged");
            Arc::new(LogNotifier)
        }
    };

    // ── Orchestrator + scheduler ──────────────────────────────────────────────
    let orchestrator = Orchestrator::new(prices, news, store.clone(), notifier, analyzer)
        .with_politeness_delay(cfg.politeness_delay);
    let scheduler = Scheduler::new(
        Arc::new(orchestrator),
        cfg.price_loop_interval,
        cfg.news_loop_interval,
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler_task = tokio::spawn(scheduler.run(shutdown_rx));

    if let Some((bot, chat_id)) = bot {
        tokio::spawn(start_bot(
            bot,
            BotDeps {
                store,
                allowed_chat_id: chat_id,
            },
        ));
    }

    info!("All subsystems started. Waiting for shutdown signal.");
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received. Stopping scheduler.");
    let _ = shutdown_tx.send(true);
    let _ = scheduler_task.await;
}
