//! # LLM client abstraction
//!
//! Defines the [`CompletionClient`] trait and a Fireworks implementation. The upstream call is
//! blocking by contract: [`CompletionClient::open_stream`] and the returned [`DeltaIter`] both
//! block, and callers move them onto a worker thread (see `relay_handlers::DeltaStream`).

use anyhow::Result;

mod config;
mod fireworks_llm;

pub use config::{EnvLlmConfig, LlmConfig, DEFAULT_MODEL};
pub use fireworks_llm::FireworksLlmClient;

/// Blocking, pull-based sequence of content deltas for one request.
pub type DeltaIter = Box<dyn Iterator<Item = Result<String>> + Send>;

/// Streaming completion service: one user-role message in, incremental content out.
pub trait CompletionClient: Send + Sync {
    /// Opens a streaming completion for `prompt`. Blocking; the prompt is forwarded as-is.
    fn open_stream(&self, prompt: &str) -> Result<DeltaIter>;
}
