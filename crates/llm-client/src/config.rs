//! LLM configuration: trait and env-based implementation.

use anyhow::{Context, Result};
use std::env;

/// Model every relay request uses.
pub const DEFAULT_MODEL: &str = "accounts/fireworks/models/deepseek-r1";

/// LLM configuration interface for the completion endpoint.
pub trait LlmConfig: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn model(&self) -> &str;
}

/// LLM config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub fireworks_api_key: String,
    pub fireworks_base_url: String,
    pub llm_model: String,
}

impl LlmConfig for EnvLlmConfig {
    fn api_key(&self) -> &str {
        &self.fireworks_api_key
    }
    fn base_url(&self) -> &str {
        &self.fireworks_base_url
    }
    fn model(&self) -> &str {
        &self.llm_model
    }
}

impl EnvLlmConfig {
    /// Loads FIREWORKS_API_KEY (required) and FIREWORKS_BASE_URL (optional). The model is fixed.
    pub fn from_env() -> Result<Self> {
        let fireworks_api_key = env::var("FIREWORKS_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .context("FIREWORKS_API_KEY not set")?;
        let fireworks_base_url = env::var("FIREWORKS_BASE_URL")
            .unwrap_or_else(|_| fireworks_client::DEFAULT_BASE_URL.to_string());
        Ok(Self {
            fireworks_api_key,
            fireworks_base_url,
            llm_model: DEFAULT_MODEL.to_string(),
        })
    }
}
