use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbotError {
    /// A transport call failed; carries the transport's own error text.
    #[error("Bot error: {0}")]
    Bot(String),

    /// A message id that the transport cannot address.
    #[error("Invalid message_id: {0}")]
    InvalidMessageId(String),
}

pub type Result<T> = std::result::Result<T, DbotError>;
