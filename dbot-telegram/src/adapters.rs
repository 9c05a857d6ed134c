//! teloxide → dbot_core conversions used by the polling loop.

use dbot_core::{Chat, Message, ToCoreMessage, ToCoreUser, User};
use teloxide::types::{Message as TgMessage, User as TgUser};

/// Sender id used for updates without a `from` (channel posts).
pub const UNKNOWN_SENDER: i64 = 0;

pub struct TelegramUserWrapper<'a>(pub &'a TgUser);

impl ToCoreUser for TelegramUserWrapper<'_> {
    fn to_core(&self) -> User {
        let TgUser {
            id,
            username,
            first_name,
            last_name,
            ..
        } = self.0;
        User {
            id: id.0 as i64,
            username: username.clone(),
            first_name: Some(first_name.clone()),
            last_name: last_name.clone(),
        }
    }
}

/// Text messages keep their body; everything else becomes `message_type = "other"` with no content.
pub struct TelegramMessageWrapper<'a>(pub &'a TgMessage);

impl ToCoreMessage for TelegramMessageWrapper<'_> {
    fn to_core(&self) -> Message {
        let msg = self.0;
        let user = match msg.from.as_ref() {
            Some(from) => TelegramUserWrapper(from).to_core(),
            None => anonymous(),
        };
        let (content, message_type) = match msg.text() {
            Some(text) => (text.to_string(), "text"),
            None => (String::new(), "other"),
        };

        Message {
            id: msg.id.to_string(),
            user,
            chat: Chat {
                id: msg.chat.id.0,
                chat_type: if msg.chat.is_private() { "private" } else { "group" }.to_string(),
            },
            content,
            message_type: message_type.to_string(),
            created_at: msg.date,
        }
    }
}

fn anonymous() -> User {
    User {
        id: UNKNOWN_SENDER,
        username: None,
        first_name: None,
        last_name: None,
    }
}
