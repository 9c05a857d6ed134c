//! Fireworks implementation of [`CompletionClient`]: one user message, streaming on.

use anyhow::Result;
use fireworks_client::{
    ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs, FireworksClient,
};
use tracing::instrument;

use super::{CompletionClient, DeltaIter, LlmConfig, DEFAULT_MODEL};

/// [`CompletionClient`] backed by [`FireworksClient`].
#[derive(Clone)]
pub struct FireworksLlmClient {
    client: FireworksClient,
    model: String,
}

impl FireworksLlmClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: FireworksClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: FireworksClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Builds a client from any [`LlmConfig`].
    pub fn from_config(config: &dyn LlmConfig) -> Self {
        Self::with_base_url(config.api_key().to_string(), config.base_url().to_string())
            .with_model(config.model().to_string())
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl CompletionClient for FireworksLlmClient {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    fn open_stream(&self, prompt: &str) -> Result<DeltaIter> {
        let user_message: ChatCompletionRequestMessage = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()?
            .into();
        let stream = self
            .client
            .chat_completion_stream(&self.model, vec![user_message])?;
        Ok(Box::new(stream))
    }
}
