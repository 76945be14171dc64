use std::fmt;
use std::sync::Arc;

use nb_core::retry::Attempt;
use nb_core::{ChatMessage, Error, GenerationModel, HttpClient, Result, RetryPolicy};
use tracing::debug;

use super::{ChatRequest, ChatResponse};
use crate::Config;

/// Chat completions client with the shared rate-limit retry policy.
pub struct OpenAiModel {
    http: Arc<dyn HttpClient>,
    api_key: String,
    url: String,
    model_name: String,
    max_tokens: u32,
    temperature: f64,
    retry: RetryPolicy,
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("http", &self.http)
            .field("api_key", &"<redacted>")
            .field("url", &self.url)
            .field("model_name", &self.model_name)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl OpenAiModel {
    pub fn new(config: Config, http: Arc<dyn HttpClient>) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("OpenAI API key is required".to_string()))?;
        let url = config.completions_url()?;
        Ok(Self {
            http,
            api_key,
            url,
            model_name: config.model_name,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            retry: config.retry,
        })
    }
}

#[async_trait::async_trait]
impl GenerationModel for OpenAiModel {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn generate(&self, messages: &[ChatMessage]) -> Result<String> {
        let request = ChatRequest {
            model: &self.model_name,
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        let body = serde_json::to_value(&request)?;

        let raw = self
            .retry
            .run("generation request", |attempt| {
                let (http, url, key, body) = (&self.http, self.url.as_str(), self.api_key.as_str(), &body);
                async move {
                    debug!("🤖 Sending generation request (attempt {})", attempt);
                    http.post_json(url, Some(key), body).await?.into_attempt()
                }
            })
            .await?;

        let response: ChatResponse = serde_json::from_str(&raw)?;
        let content = response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::Generation("response contained no choices".to_string()))?;
        Ok(content.trim().to_string())
    }
}
