//! `/start`: allow-listed users get a session, everyone else a refusal.

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::{MSG_GREETING, MSG_NOT_AUTHORIZED};
use crate::command::{parse_command, START_COMMAND};
use crate::context::RelayContext;

/// Handles `/start`; every other message passes through with `Continue`.
pub struct StartHandler {
    context: RelayContext,
    bot: Arc<dyn Bot>,
}

impl StartHandler {
    pub fn new(context: RelayContext, bot: Arc<dyn Bot>) -> Self {
        Self { context, bot }
    }

    async fn reply(&self, message: &Message, text: &str) {
        if let Err(e) = self.bot.reply_to(message, text).await {
            error!(error = %e, user_id = message.user.id, "Failed to reply to /start");
        }
    }
}

#[async_trait]
impl Handler for StartHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if parse_command(&message.content) != Some(START_COMMAND) {
            return Ok(HandlerResponse::Continue);
        }

        let user_id = message.user.id;
        info!(user_id = user_id, "User used /start");

        if !self.context.access.is_authorized(user_id) {
            warn!(user_id = user_id, "Unauthorized user tried to use /start");
            self.reply(message, MSG_NOT_AUTHORIZED).await;
            return Ok(HandlerResponse::Stop);
        }

        if self.context.sessions.mark_started(user_id).await {
            info!(user_id = user_id, "Session started");
        }
        self.reply(message, MSG_GREETING).await;
        Ok(HandlerResponse::Stop)
    }
}
