//! **Public API of this crate.**

use anyhow::Result;
use dbot_core::Bot;
use dbot_telegram::{build_bot, run_polling, TelegramBotAdapter, TelegramConfig};
use handler_chain::HandlerChain;
use llm_client::{CompletionClient, EnvLlmConfig, FireworksLlmClient, LlmConfig};
use relay_handlers::RelayContext;
use std::sync::Arc;
use tracing::info;

use crate::assembly;

/// Fresh context with the built-in allow-list and no started sessions.
pub fn build_context() -> RelayContext {
    assembly::build_context()
}

/// Builds the handler chain on top of any [`Bot`] and [`CompletionClient`] (mocks in tests).
pub fn build_chain(
    context: RelayContext,
    bot: Arc<dyn Bot>,
    client: Arc<dyn CompletionClient>,
) -> HandlerChain {
    assembly::build_chain(context, bot, client)
}

/// Connects to Telegram and Fireworks and polls until the process is stopped.
pub async fn run_relay_bot(telegram: TelegramConfig, llm: EnvLlmConfig) -> Result<()> {
    let teloxide_bot = build_bot(&telegram)?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let client: Arc<dyn CompletionClient> = Arc::new(FireworksLlmClient::from_config(&llm));

    info!(
        model = %llm.model(),
        base_url = %llm.base_url(),
        authorized_users = assembly::AUTHORIZED_USERS.len(),
        "Starting relay bot"
    );

    let chain = build_chain(build_context(), bot, client);
    run_polling(teloxide_bot, chain).await
}
