use async_trait::async_trait;
use teloxide::prelude::*;
use tracing::{info, warn};

use common::Notifier;

/// Delivers signal messages to one Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramNotifier {
    pub fn new(bot: Bot, chat_id: i64) -> Self {
        Self {
            bot,
            chat_id: ChatId(chat_id),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) {
        if let Err(e) = self.bot.send_message(self.chat_id, text).await {
            warn!(chat_id = ?self.chat_id, error = %e, "Failed to send Telegram message");
        }
    }
}

/// Stand-in used when Telegram is not configured: messages go to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, text: &str) {
        info!(message = %text, "Signal (Telegram not configured)");
    }
}
