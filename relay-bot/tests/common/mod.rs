//! Recording bot and canned upstream for the end-to-end chain tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Bot, Chat, Message, Result, User};
use llm_client::{CompletionClient, DeltaIter};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const CHAT_ID: i64 = 42;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Send(String),
    Reply(String),
    Placeholder(String),
    Edit(String),
    Typing,
}

#[derive(Default)]
pub struct RecordingBot {
    outbound: Mutex<Vec<Outbound>>,
}

impl RecordingBot {
    pub fn outbound(&self) -> Vec<Outbound> {
        self.outbound.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.outbound.lock().unwrap().clear();
    }

    fn push(&self, call: Outbound) {
        self.outbound.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.push(Outbound::Send(text.to_string()));
        Ok(())
    }

    async fn reply_to(&self, _message: &Message, text: &str) -> Result<()> {
        self.push(Outbound::Reply(text.to_string()));
        Ok(())
    }

    async fn edit_message(&self, _chat: &Chat, _message_id: &str, text: &str) -> Result<()> {
        self.push(Outbound::Edit(text.to_string()));
        Ok(())
    }

    async fn send_message_and_return_id(&self, _chat: &Chat, text: &str) -> Result<String> {
        self.push(Outbound::Placeholder(text.to_string()));
        Ok("100".to_string())
    }

    async fn send_typing(&self, _chat: &Chat) -> Result<()> {
        self.push(Outbound::Typing);
        Ok(())
    }
}

/// Answers every prompt with the same fragments.
pub struct CannedClient {
    fragments: Vec<String>,
    calls: AtomicUsize,
}

impl CannedClient {
    pub fn new(fragments: &[&str]) -> Self {
        Self {
            fragments: fragments.iter().map(|f| f.to_string()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CompletionClient for CannedClient {
    fn open_stream(&self, _prompt: &str) -> anyhow::Result<DeltaIter> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let items: Vec<anyhow::Result<String>> = self.fragments.iter().cloned().map(Ok).collect();
        Ok(Box::new(items.into_iter()))
    }
}

pub fn message(user_id: i64, content: &str) -> Message {
    Message {
        id: "1".to_string(),
        user: User {
            id: user_id,
            username: None,
            first_name: Some("Tester".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: CHAT_ID,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
    }
}
