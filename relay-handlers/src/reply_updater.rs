//! Throttled reply updater: drains a delta stream into one placeholder message.
//!
//! Lifecycle per request:
//!
//! - **Pending** – [`ReplyUpdater::start`] sends the placeholder and a typing indicator.
//! - **Streaming / Flushing** – each delta is appended; when [`EDIT_INTERVAL`] has passed since
//!   the last edit, the placeholder is edited to the current [`display_snapshot`].
//! - **Finalizing** – stream exhausted; one unconditional edit with the full snapshot.
//! - **Failed** – the stream yielded an error, or the final edit was rejected (e.g. the snapshot
//!   sanitized to empty text); the placeholder is edited to [`MSG_STREAM_FAILED`].
//!
//! Progress edit failures are logged and never end the request.

use dbot_core::{Bot, Chat, Result};
use futures::{Stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

use crate::sanitize::display_snapshot;

/// Minimum wall-clock time between two progress edits of the same message.
pub const EDIT_INTERVAL: Duration = Duration::from_secs(4);

/// Shown in place of the reply when the upstream stream fails.
pub const MSG_STREAM_FAILED: &str = "Sorry, there was an error processing your request.";

/// True when Telegram returns "message is not modified" (content unchanged); treat as success.
pub fn is_message_not_modified_error(error: &str) -> bool {
    error.contains("message is not modified") || error.contains("exactly the same")
}

/// Result of one edit call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// Telegram reported the text as unchanged.
    Unchanged,
    /// The edit failed; the error text is kept for logging.
    Rejected(String),
}

/// Terminal state of a drained request.
#[derive(Debug)]
pub enum DrainOutcome {
    /// Stream exhausted; carries the text of the final edit.
    Completed(String),
    /// Stream or final edit failed; the placeholder now shows [`MSG_STREAM_FAILED`].
    Failed(anyhow::Error),
}

/// Owns the accumulated buffer and the placeholder message of one request.
pub struct ReplyUpdater {
    bot: Arc<dyn Bot>,
    chat: Chat,
    message_id: String,
    interval: Duration,
    buffer: String,
    last_edit: Instant,
}

impl ReplyUpdater {
    /// Wraps an already-sent placeholder message. The edit clock starts now.
    pub fn new(bot: Arc<dyn Bot>, chat: Chat, message_id: String) -> Self {
        Self {
            bot,
            chat,
            message_id,
            interval: EDIT_INTERVAL,
            buffer: String::new(),
            last_edit: Instant::now(),
        }
    }

    /// Sends `placeholder` to `chat`, then a best-effort typing indicator.
    ///
    /// Fails only when the placeholder cannot be sent, since there is nothing to edit afterwards.
    #[instrument(skip(bot, chat, placeholder), fields(chat_id = chat.id))]
    pub async fn start(bot: Arc<dyn Bot>, chat: Chat, placeholder: &str) -> Result<Self> {
        let message_id = bot.send_message_and_return_id(&chat, placeholder).await?;
        if let Err(e) = bot.send_typing(&chat).await {
            warn!(error = %e, chat_id = chat.id, "Failed to send typing indicator");
        }
        Ok(Self::new(bot, chat, message_id))
    }

    /// Overrides [`EDIT_INTERVAL`].
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Text accumulated so far, unsanitized.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Edits the placeholder to `text` and classifies the result.
    pub async fn edit(&self, text: &str) -> EditOutcome {
        match self.bot.edit_message(&self.chat, &self.message_id, text).await {
            Ok(()) => EditOutcome::Applied,
            Err(e) => {
                let error = e.to_string();
                if is_message_not_modified_error(&error) {
                    debug!(message_id = %self.message_id, "Edit skipped: message is not modified");
                    EditOutcome::Unchanged
                } else {
                    error!(error = %error, message_id = %self.message_id, "Error updating message");
                    EditOutcome::Rejected(error)
                }
            }
        }
    }

    /// Appends one delta and flushes when the edit interval has elapsed.
    pub async fn push(&mut self, delta: &str) -> Option<EditOutcome> {
        self.buffer.push_str(delta);
        let now = Instant::now();
        if now.duration_since(self.last_edit) < self.interval {
            return None;
        }
        let outcome = self.edit(&display_snapshot(&self.buffer)).await;
        self.last_edit = now;
        Some(outcome)
    }

    /// Drains `deltas` to the end and performs the final edit (or the failure edit).
    #[instrument(skip(self, deltas), fields(chat_id = self.chat.id, message_id = %self.message_id))]
    pub async fn drain<S>(mut self, deltas: S) -> DrainOutcome
    where
        S: Stream<Item = anyhow::Result<String>>,
    {
        let mut deltas = std::pin::pin!(deltas);
        let mut flushes = 0usize;

        while let Some(item) = deltas.next().await {
            match item {
                Ok(delta) => {
                    if self.push(&delta).await.is_some() {
                        flushes += 1;
                    }
                }
                Err(e) => {
                    error!(
                        error = ?e,
                        buffered_len = self.buffer.len(),
                        "Error during streaming"
                    );
                    self.edit(MSG_STREAM_FAILED).await;
                    return DrainOutcome::Failed(e);
                }
            }
        }

        let text = display_snapshot(&self.buffer);
        if let EditOutcome::Rejected(reason) = self.edit(&text).await {
            self.edit(MSG_STREAM_FAILED).await;
            return DrainOutcome::Failed(anyhow::anyhow!("final edit rejected: {}", reason));
        }
        info!(
            flushes = flushes,
            buffered_len = self.buffer.len(),
            reply_len = text.len(),
            "Streaming reply finished"
        );
        DrainOutcome::Completed(text)
    }
}
