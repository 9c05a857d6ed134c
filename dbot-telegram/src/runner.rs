//! Long-polling runner: converts each teloxide message to a core [`dbot_core::Message`] and hands
//! it to the [`HandlerChain`] on its own task, so one slow reply never blocks other chats.

use anyhow::{Context, Result};
use dbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use teloxide::prelude::*;
use tracing::{debug, error, info, instrument};

use super::adapters::TelegramMessageWrapper;
use super::config::TelegramConfig;

/// Builds the teloxide Bot from config, pointing it at a custom Bot API server when configured.
pub fn build_bot(config: &TelegramConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match &config.telegram_api_url {
        Some(url) => {
            let url = reqwest::Url::parse(url)
                .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url))?;
            info!(api_url = %url, "Using custom Telegram Bot API URL");
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Starts long polling. Every update becomes one spawned task running `handler_chain`; chain
/// errors are logged and never stop the loop.
#[instrument(skip(bot, handler_chain))]
pub async fn run_polling(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(
            username = %me.user.username.as_deref().unwrap_or("unknown"),
            "Bot connected, start polling"
        ),
        Err(e) => error!(error = %e, "get_me failed; polling anyway"),
    }

    let chain = handler_chain;
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();

        async move {
            let core_msg = TelegramMessageWrapper(&msg).to_core();

            debug!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_type = %core_msg.message_type,
                "Update dispatched"
            );

            tokio::spawn(async move {
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
                }
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}
