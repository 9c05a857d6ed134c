//! Assembly: the allow-list, the shared context and the handler chain. Used by the [facade](crate::facade).

use dbot_core::Bot;
use handler_chain::HandlerChain;
use llm_client::CompletionClient;
use relay_handlers::{AccessPolicy, LoggingHandler, RelayContext, RelayHandler, StartHandler};
use std::sync::Arc;

/// Telegram user ids allowed to use the bot. Fixed at build time.
pub const AUTHORIZED_USERS: [i64; 2] = [123456789, 987654321];

pub(crate) fn build_context() -> RelayContext {
    RelayContext::new(AccessPolicy::new(AUTHORIZED_USERS))
}

/// Logging first, then `/start`, then the relay for plain text.
pub(crate) fn build_chain(
    context: RelayContext,
    bot: Arc<dyn Bot>,
    client: Arc<dyn CompletionClient>,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(StartHandler::new(context.clone(), bot.clone())))
        .add_handler(Arc::new(RelayHandler::new(context, bot, client)))
}
