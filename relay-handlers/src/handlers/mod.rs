//! Chat handlers: message logging, `/start` session initialization and the streaming relay.

mod logging;
mod relay;
mod start;

pub use logging::LoggingHandler;
pub use relay::RelayHandler;
pub use start::StartHandler;

// --- User-facing texts ---
pub const MSG_NOT_AUTHORIZED: &str = "You're not authorized to use this bot.";
pub const MSG_GREETING: &str =
    "Hello! You're authorized. Send me a message and I'll reply using Fireworks AI.";
pub const MSG_START_FIRST: &str = "Please type /start to begin.";
pub const MSG_PROCESSING: &str = "Processing your request, please wait...";
