//! Test doubles shared by the relay-handlers integration tests.
//!
//! [`MockBot`] records every outbound call in order; [`ScriptedClient`] replays a fixed list of
//! deltas (or errors) as a blocking upstream stream.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Bot, Chat, DbotError, Message, Result, User};
use llm_client::{CompletionClient, DeltaIter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const AUTHORIZED_USER: i64 = 123456789;
pub const STRANGER: i64 = 555;
pub const CHAT_ID: i64 = 456;
pub const PLACEHOLDER_ID: &str = "1";

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCall {
    Send(String),
    Reply(String),
    SendWithId(String),
    Edit { message_id: String, text: String },
    Typing,
}

/// Mock Bot that records calls; edits can be made to fail.
#[derive(Default)]
pub struct MockBot {
    calls: Mutex<Vec<BotCall>>,
    failing_edits: AtomicUsize,
    edit_error: Mutex<Option<String>>,
    fail_placeholder: bool,
}

impl MockBot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first `count` edits fail with `error` (they are still recorded).
    pub fn with_failing_edits(self, count: usize, error: &str) -> Self {
        self.failing_edits.store(count, Ordering::SeqCst);
        *self.edit_error.lock().unwrap() = Some(error.to_string());
        self
    }

    /// `send_message_and_return_id` fails.
    pub fn with_failing_placeholder(mut self) -> Self {
        self.fail_placeholder = true;
        self
    }

    pub fn calls(&self) -> Vec<BotCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn edits(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Edit { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn replies(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                BotCall::Reply(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: BotCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.record(BotCall::Send(text.to_string()));
        Ok(())
    }

    async fn reply_to(&self, _message: &Message, text: &str) -> Result<()> {
        self.record(BotCall::Reply(text.to_string()));
        Ok(())
    }

    async fn edit_message(&self, _chat: &Chat, message_id: &str, text: &str) -> Result<()> {
        self.record(BotCall::Edit {
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        let remaining = self.failing_edits.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failing_edits.store(remaining - 1, Ordering::SeqCst);
            let error = self.edit_error.lock().unwrap().clone().unwrap_or_default();
            return Err(DbotError::Bot(error));
        }
        Ok(())
    }

    async fn send_message_and_return_id(&self, _chat: &Chat, text: &str) -> Result<String> {
        self.record(BotCall::SendWithId(text.to_string()));
        if self.fail_placeholder {
            return Err(DbotError::Bot("Forbidden: bot was blocked by the user".to_string()));
        }
        Ok(PLACEHOLDER_ID.to_string())
    }

    async fn send_typing(&self, _chat: &Chat) -> Result<()> {
        self.record(BotCall::Typing);
        Ok(())
    }
}

/// Blocking upstream that replays `script`; `Err(text)` entries become stream errors.
pub struct ScriptedClient {
    script: Vec<std::result::Result<String, String>>,
    prompts: Mutex<Vec<String>>,
    opens: AtomicUsize,
}

impl ScriptedClient {
    pub fn new(script: Vec<std::result::Result<&str, &str>>) -> Self {
        Self {
            script: script
                .into_iter()
                .map(|r| r.map(str::to_string).map_err(str::to_string))
                .collect(),
            prompts: Mutex::new(Vec::new()),
            opens: AtomicUsize::new(0),
        }
    }

    pub fn deltas(deltas: &[&str]) -> Self {
        Self::new(deltas.iter().map(|d| Ok(*d)).collect())
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl CompletionClient for ScriptedClient {
    fn open_stream(&self, prompt: &str) -> anyhow::Result<DeltaIter> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        let items: Vec<anyhow::Result<String>> = self
            .script
            .iter()
            .cloned()
            .map(|r| r.map_err(anyhow::Error::msg))
            .collect();
        Ok(Box::new(items.into_iter()))
    }
}

pub fn chat() -> Chat {
    Chat {
        id: CHAT_ID,
        chat_type: "private".to_string(),
    }
}

pub fn text_message(user_id: i64, content: &str) -> Message {
    Message {
        id: "msg_1".to_string(),
        user: User {
            id: user_id,
            username: Some("user".to_string()),
            first_name: Some("User".to_string()),
            last_name: None,
        },
        chat: chat(),
        content: content.to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
    }
}
