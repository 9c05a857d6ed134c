//! # Fireworks API client
//!
//! Blocking wrapper around the Fireworks chat completion endpoint (OpenAI-compatible). Request and
//! chunk bodies use the [async-openai] wire types; the HTTP call and the server-sent-events read
//! loop are blocking, so callers run them on a worker thread.
//!
//! Provides token masking for safe logging.

use anyhow::{Context, Result};
use async_openai::types::{CreateChatCompletionRequestArgs, CreateChatCompletionStreamResponse};
use std::io::{BufRead, BufReader};
use std::time::Duration;

pub use async_openai::types::{ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs};

/// Fireworks inference API base (OpenAI-compatible routes live below it).
pub const DEFAULT_BASE_URL: &str = "https://api.fireworks.ai/inference/v1";

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_ascii() {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

/// One parsed server-sent-events line of a streaming completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// Non-empty content delta of the first choice.
    Delta(String),
    /// `data: [DONE]`; the stream is over.
    Done,
}

/// Parses one SSE line. Returns `Ok(None)` for lines that carry no content: blanks, comments,
/// non-`data` fields and chunks without (or with empty) `choices[0].delta.content`.
pub fn parse_sse_line(line: &str) -> Result<Option<SseEvent>> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(payload) = line.strip_prefix("data:") else {
        return Ok(None);
    };
    let payload = payload.trim();
    if payload == "[DONE]" {
        return Ok(Some(SseEvent::Done));
    }
    if payload.is_empty() {
        return Ok(None);
    }

    let chunk: CreateChatCompletionStreamResponse = match serde_json::from_str(payload) {
        Ok(chunk) => chunk,
        Err(typed_err) => return parse_untyped_chunk(payload, typed_err),
    };
    if let Some(ref u) = chunk.usage {
        tracing::info!(
            prompt_tokens = u.prompt_tokens,
            completion_tokens = u.completion_tokens,
            total_tokens = u.total_tokens,
            "Fireworks chat_completion_stream usage"
        );
    }
    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content)
        .filter(|content| !content.is_empty())
        .map(SseEvent::Delta))
}

/// Chunks that are valid JSON but outside the typed schema (e.g. a provider-specific
/// `finish_reason`) still contribute `choices[0].delta.content`.
fn parse_untyped_chunk(payload: &str, typed_err: serde_json::Error) -> Result<Option<SseEvent>> {
    let value: serde_json::Value = serde_json::from_str(payload)
        .with_context(|| format!("Invalid stream chunk: {}", payload))?;
    tracing::warn!(error = %typed_err, "Stream chunk outside the typed schema; reading content only");
    Ok(value
        .pointer("/choices/0/delta/content")
        .and_then(serde_json::Value::as_str)
        .filter(|content| !content.is_empty())
        .map(|content| SseEvent::Delta(content.to_string())))
}

/// Blocking iterator over the content deltas of one streaming completion.
///
/// Ends (`None`) on `[DONE]` or end of body; yields `Err` once on a read or decode failure and
/// ends afterwards. Must be driven and dropped off the async scheduler.
pub struct ChatDeltaStream<R> {
    reader: R,
    line: String,
    finished: bool,
}

impl<R: BufRead> ChatDeltaStream<R> {
    /// Wraps any buffered SSE body.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for ChatDeltaStream<R> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.finished {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => self.finished = true,
                Ok(_) => match parse_sse_line(&self.line) {
                    Ok(Some(SseEvent::Delta(content))) => return Some(Ok(content)),
                    Ok(Some(SseEvent::Done)) => self.finished = true,
                    Ok(None) => {}
                    Err(e) => {
                        self.finished = true;
                        return Some(Err(e));
                    }
                },
                Err(e) => {
                    self.finished = true;
                    return Some(Err(anyhow::Error::new(e).context("Stream read error")));
                }
            }
        }
        None
    }
}

/// Fireworks chat client. Holds credentials only; each stream opens its own blocking HTTP client
/// on the calling (worker) thread.
#[derive(Clone)]
pub struct FireworksClient {
    api_key: String,
    base_url: String,
}

impl FireworksClient {
    /// Builds a client using the given API key and the default Fireworks base URL.
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Builds a client with a custom base URL (proxies or compatible endpoints).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Opens a streaming chat completion (`stream: true`) and returns its delta iterator.
    ///
    /// Blocks until the response headers arrive; a non-success status is an error carrying the
    /// status and body. Never call this from an async task directly.
    pub fn chat_completion_stream(
        &self,
        model: &str,
        messages: Vec<ChatCompletionRequestMessage>,
    ) -> Result<ChatDeltaStream<BufReader<reqwest::blocking::Response>>> {
        tracing::info!(
            model = %model,
            message_count = messages.len(),
            api_key = %mask_token(&self.api_key),
            "Fireworks chat_completion_stream request"
        );

        let request = CreateChatCompletionRequestArgs::default()
            .model(model)
            .messages(messages)
            .stream(true)
            .build()?;

        if let Ok(json) = serde_json::to_string_pretty(&request) {
            tracing::debug!(request_json = %json, "Fireworks chat_completion_stream request JSON");
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .context("Failed to build HTTP client")?;

        let response = http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(&request)
            .send()
            .context("Fireworks request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            anyhow::bail!("Fireworks returned {}: {}", status, body);
        }

        Ok(ChatDeltaStream::new(BufReader::new(response)))
    }
}
