use std::sync::Arc;

use teloxide::{dispatching::UpdateHandler, prelude::*, utils::command::BotCommands};
use tracing::{info, warn};

use common::StateStore;

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Dependencies injected into every handler via `dptree`.
#[derive(Clone)]
pub struct BotDeps {
    pub store: Arc<dyn StateStore>,
    /// The only chat the bot answers.
    pub allowed_chat_id: i64,
}

/// Telegram bot commands exposed to the operator.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "CoinSignal commands:")]
pub enum Command {
    #[command(description = "Switch the held coin, e.g. /confirm solana")]
    Confirm(String),
    #[command(description = "Dismiss the last recommendation")]
    Reject,
    #[command(description = "Show the held coin and amount")]
    Portfolio,
    #[command(description = "List the coins the price loop follows")]
    Coins,
    #[command(description = "Show this help")]
    Help,
}

/// Start the Telegram bot in long-polling mode.
pub async fn start_bot(bot: Bot, deps: BotDeps) {
    let deps = Arc::new(deps);

    info!(chat_id = deps.allowed_chat_id, "Telegram bot starting (long-polling)");

    Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![deps])
        .build()
        .dispatch()
        .await;
}

fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync>> {
    use dptree::case;

    let command_handler = teloxide::filter_command::<Command, _>()
        .branch(case![Command::Confirm(coin)].endpoint(handle_confirm))
        .branch(case![Command::Reject].endpoint(handle_reject))
        .branch(case![Command::Portfolio].endpoint(handle_portfolio))
        .branch(case![Command::Coins].endpoint(handle_coins))
        .branch(case![Command::Help].endpoint(handle_help));

    Update::filter_message()
        .filter(auth_filter)
        .branch(command_handler)
}

/// Silently drop messages from any chat other than the configured one.
fn auth_filter(msg: Message, deps: Arc<BotDeps>) -> bool {
    let allowed = msg.chat.id.0 == deps.allowed_chat_id;
    if !allowed {
        warn!(chat_id = msg.chat.id.0, "Unauthorized Telegram access attempt");
    }
    allowed
}

async fn handle_confirm(bot: Bot, msg: Message, coin: String, deps: Arc<BotDeps>) -> HandlerResult {
    let reply = confirm_reply(deps.store.as_ref(), &coin).await;
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

async fn handle_reject(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, "Recommendation rejected. Portfolio unchanged.")
        .await?;
    Ok(())
}

async fn handle_portfolio(bot: Bot, msg: Message, deps: Arc<BotDeps>) -> HandlerResult {
    let reply = portfolio_reply(deps.store.as_ref()).await;
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

async fn handle_coins(bot: Bot, msg: Message, deps: Arc<BotDeps>) -> HandlerResult {
    let reply = coins_reply(deps.store.as_ref()).await;
    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

async fn handle_help(bot: Bot, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, Command::descriptions().to_string())
        .await?;
    Ok(())
}

/// Apply `/confirm <coin>`: the held coin changes, the amount is kept.
pub async fn confirm_reply(store: &dyn StateStore, arg: &str) -> String {
    let Some(coin) = arg.split_whitespace().next().map(str::to_lowercase) else {
        return "Usage: /confirm <coin>".to_string();
    };

    match store.set_portfolio(&coin, None).await {
        Ok(()) => {
            info!(coin = %coin, "Portfolio switch confirmed");
            format!("✅ Portfolio switched to {}.", coin.to_uppercase())
        }
        Err(e) => {
            warn!(coin = %coin, error = %e, "Failed to update portfolio");
            format!("Could not update portfolio: {e}")
        }
    }
}

pub async fn portfolio_reply(store: &dyn StateStore) -> String {
    match store.portfolio().await {
        Ok(p) => format!("Holding {} ({})", p.coin.to_uppercase(), p.amount),
        Err(e) => format!("Could not read portfolio: {e}"),
    }
}

pub async fn coins_reply(store: &dyn StateStore) -> String {
    match store.followed_coins().await {
        Ok(coins) if coins.is_empty() => "No coins followed.".to_string(),
        Ok(coins) => format!("Following: {}", coins.join(", ")),
        Err(e) => format!("Could not read followed coins: {e}"),
    }
}
