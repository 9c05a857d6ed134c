//! # relay-handlers
//!
//! Core of the relay bot:
//!
//! - [`DeltaStream`] turns a blocking completion stream into an async [`futures::Stream`], running
//!   every pull on the blocking pool with at most one pull in flight.
//! - [`ReplyUpdater`] drains that stream into one placeholder message, editing it at most every
//!   [`EDIT_INTERVAL`] and once more at the end.
//! - [`StartHandler`] and [`RelayHandler`] apply the allow-list and `/start` session rule from a
//!   shared [`RelayContext`].

pub mod command;
pub mod context;
pub mod delta_stream;
pub mod handlers;
pub mod reply_updater;
pub mod sanitize;

pub use command::{parse_command, START_COMMAND};
pub use context::{AccessPolicy, RelayContext, SessionStore};
pub use delta_stream::DeltaStream;
pub use handlers::{
    LoggingHandler, RelayHandler, StartHandler, MSG_GREETING, MSG_NOT_AUTHORIZED, MSG_PROCESSING,
    MSG_START_FIRST,
};
pub use reply_updater::{
    is_message_not_modified_error, DrainOutcome, EditOutcome, ReplyUpdater, EDIT_INTERVAL,
    MSG_STREAM_FAILED,
};
pub use sanitize::{display_snapshot, keep_tail, sanitize, MAX_MESSAGE_LENGTH};
