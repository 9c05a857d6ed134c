//! Integration tests for [`handler_chain::HandlerChain`]: phase order, `before` veto, and the
//! handle phase ending on the first `Stop` or `Reply`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Chat, Handler, HandlerResponse, Message, User};
use handler_chain::HandlerChain;

type Journal = Arc<Mutex<Vec<String>>>;

fn message_from(user_id: i64, content: &str) -> Message {
    Message {
        id: "7".to_string(),
        content: content.to_string(),
        user: User {
            id: user_id,
            username: None,
            first_name: Some("Ann".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: user_id,
            chat_type: "private".to_string(),
        },
        message_type: "text".to_string(),
        created_at: Utc::now(),
    }
}

/// Writes every phase it sees into the journal, answering `handle` with `response`.
struct Recorder {
    name: &'static str,
    response: HandlerResponse,
    journal: Journal,
}

impl Recorder {
    fn new(name: &'static str, response: HandlerResponse, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            name,
            response,
            journal: journal.clone(),
        })
    }

    fn log(&self, entry: String) {
        self.journal.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl Handler for Recorder {
    async fn before(&self, _message: &Message) -> dbot_core::Result<bool> {
        self.log(format!("{}:before", self.name));
        Ok(true)
    }

    async fn handle(&self, _message: &Message) -> dbot_core::Result<HandlerResponse> {
        self.log(format!("{}:handle", self.name));
        Ok(self.response.clone())
    }

    async fn after(&self, _message: &Message, response: &HandlerResponse) -> dbot_core::Result<()> {
        self.log(format!("{}:after:{:?}", self.name, response));
        Ok(())
    }
}

/// Refuses messages from user 0 in `before`.
struct AnonymousGate;

#[async_trait]
impl Handler for AnonymousGate {
    async fn before(&self, message: &Message) -> dbot_core::Result<bool> {
        Ok(message.user.id != 0)
    }
}

fn entries(journal: &Journal) -> Vec<String> {
    journal.lock().unwrap().clone()
}

#[tokio::test]
async fn phases_run_forward_then_after_in_reverse() {
    let journal = Journal::default();
    let chain = HandlerChain::new()
        .add_handler(Recorder::new("log", HandlerResponse::Continue, &journal))
        .add_handler(Recorder::new("relay", HandlerResponse::Continue, &journal));

    let result = chain.handle(&message_from(1, "hello")).await.unwrap();

    assert_eq!(result, HandlerResponse::Continue);
    assert_eq!(
        entries(&journal),
        vec![
            "log:before",
            "relay:before",
            "log:handle",
            "relay:handle",
            "relay:after:Continue",
            "log:after:Continue",
        ]
    );
}

#[tokio::test]
async fn reply_ends_handle_phase_and_reaches_after() {
    let journal = Journal::default();
    let chain = HandlerChain::new()
        .add_handler(Recorder::new("log", HandlerResponse::Continue, &journal))
        .add_handler(Recorder::new("relay", HandlerResponse::Reply("Hi there!".into()), &journal))
        .add_handler(Recorder::new("tail", HandlerResponse::Continue, &journal));

    let result = chain.handle(&message_from(1, "hello")).await.unwrap();

    assert_eq!(result, HandlerResponse::Reply("Hi there!".to_string()));
    let journal = entries(&journal);
    assert!(!journal.contains(&"tail:handle".to_string()));
    assert_eq!(
        &journal[journal.len() - 3..],
        [
            "tail:after:Reply(\"Hi there!\")",
            "relay:after:Reply(\"Hi there!\")",
            "log:after:Reply(\"Hi there!\")",
        ]
    );
}

#[tokio::test]
async fn stop_skips_later_handlers() {
    let journal = Journal::default();
    let chain = HandlerChain::new()
        .add_handler(Recorder::new("log", HandlerResponse::Continue, &journal))
        .add_handler(Recorder::new("start", HandlerResponse::Stop, &journal))
        .add_handler(Recorder::new("relay", HandlerResponse::Continue, &journal));
    assert_eq!(chain.len(), 3);

    let result = chain.handle(&message_from(1, "/start")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    let journal = entries(&journal);
    assert!(journal.contains(&"start:handle".to_string()));
    assert!(!journal.contains(&"relay:handle".to_string()));
}

#[tokio::test]
async fn before_veto_skips_handle_and_after() {
    let journal = Journal::default();
    let chain = HandlerChain::new()
        .add_handler(Arc::new(AnonymousGate))
        .add_handler(Recorder::new("relay", HandlerResponse::Continue, &journal));

    let result = chain.handle(&message_from(0, "hello")).await.unwrap();

    assert_eq!(result, HandlerResponse::Stop);
    assert!(entries(&journal).is_empty());
}

#[tokio::test]
async fn empty_chain_continues() {
    let chain = HandlerChain::default();
    assert!(chain.is_empty());
    assert_eq!(
        chain.handle(&message_from(1, "hello")).await.unwrap(),
        HandlerResponse::Continue
    );
}
