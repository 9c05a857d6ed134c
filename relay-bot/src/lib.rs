//! # relay_bot
//!
//! Telegram ↔ Fireworks relay. **Public API:** see [facade]: `run_relay_bot`, `build_chain`,
//! `build_context`.

mod assembly;
mod facade;

pub use assembly::AUTHORIZED_USERS;
pub use facade::*;
