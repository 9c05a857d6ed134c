//! # dbot-telegram
//!
//! Telegram transport layer: teloxide → core adapters, [`dbot_core::Bot`] implementation, minimal
//! config and the long-polling runner. Handles only Telegram connectivity and handler-chain
//! execution; no relay or LLM logic.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
pub use runner::{build_bot, run_polling};
