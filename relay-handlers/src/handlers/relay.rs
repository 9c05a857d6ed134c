//! Relays free text from started, allow-listed users to the completion service and streams the
//! answer into one edited reply.

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use llm_client::CompletionClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

use super::{MSG_PROCESSING, MSG_START_FIRST};
use crate::command::parse_command;
use crate::context::RelayContext;
use crate::delta_stream::DeltaStream;
use crate::reply_updater::{DrainOutcome, ReplyUpdater, EDIT_INTERVAL};

/// Handles non-command text messages. Unauthorized senders are ignored without a reply.
pub struct RelayHandler {
    context: RelayContext,
    bot: Arc<dyn Bot>,
    client: Arc<dyn CompletionClient>,
    edit_interval: Duration,
}

impl RelayHandler {
    pub fn new(context: RelayContext, bot: Arc<dyn Bot>, client: Arc<dyn CompletionClient>) -> Self {
        Self {
            context,
            bot,
            client,
            edit_interval: EDIT_INTERVAL,
        }
    }

    /// Overrides the minimum time between progress edits.
    pub fn with_edit_interval(mut self, edit_interval: Duration) -> Self {
        self.edit_interval = edit_interval;
        self
    }

    /// Pending → Streaming → Finalizing/Failed for one message.
    async fn relay(&self, message: &Message) -> Result<HandlerResponse> {
        let updater =
            match ReplyUpdater::start(self.bot.clone(), message.chat.clone(), MSG_PROCESSING).await {
                Ok(updater) => updater.with_interval(self.edit_interval),
                Err(e) => {
                    error!(error = %e, user_id = message.user.id, "Failed to send processing message");
                    return Ok(HandlerResponse::Stop);
                }
            };

        let deltas = DeltaStream::open(self.client.clone(), message.content.clone());
        match updater.drain(deltas).await {
            DrainOutcome::Completed(text) => {
                info!(user_id = message.user.id, reply_len = text.len(), "Relay reply sent");
                Ok(HandlerResponse::Reply(text))
            }
            DrainOutcome::Failed(_) => Ok(HandlerResponse::Stop),
        }
    }
}

#[async_trait]
impl Handler for RelayHandler {
    #[instrument(skip(self, message))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !message.is_text() || parse_command(&message.content).is_some() {
            return Ok(HandlerResponse::Continue);
        }

        let user_id = message.user.id;

        if !self.context.access.is_authorized(user_id) {
            warn!(user_id = user_id, "Unauthorized user sent a message. Ignoring.");
            return Ok(HandlerResponse::Stop);
        }

        if !self.context.sessions.is_started(user_id).await {
            if let Err(e) = self.bot.reply_to(message, MSG_START_FIRST).await {
                error!(error = %e, user_id = user_id, "Failed to send /start prompt");
            }
            return Ok(HandlerResponse::Stop);
        }

        self.relay(message).await
    }
}
