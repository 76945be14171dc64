use std::fmt;

use nb_core::{Error, Result, RetryPolicy};
use url::Url;

pub mod models;
pub mod prompts;

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MAX_TOKENS: u32 = 5000;
pub const DEFAULT_TEMPERATURE: f64 = 0.2;

/// Which generation backend to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ModelKind {
    /// OpenAI-compatible chat completions endpoint
    #[default]
    #[value(name = "openai")]
    OpenAi,
    /// Offline model that echoes its input, for dry runs
    Dummy,
}

#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f64,
    pub retry: RetryPolicy,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .field("retry", &self.retry)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            retry: RetryPolicy::default(),
        }
    }
}

impl Config {
    /// Chat completions URL derived from `base_url`.
    pub fn completions_url(&self) -> Result<String> {
        let base = Url::parse(&self.base_url).map_err(|e| Error::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        Ok(format!("{}/chat/completions", base.as_str().trim_end_matches('/')))
    }
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::prompts::PromptTemplateSet;
    pub use super::{Config, ModelKind};
    pub use nb_core::{ChatMessage, Error, GenerationModel, Result};
}

pub use models::create_model;
pub use prompts::PromptTemplateSet;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let config = Config {
            api_key: Some("sk-secret".to_string()),
            ..Config::default()
        };
        let printed = format!("{:?}", config);
        assert!(printed.contains("<redacted>"));
        assert!(!printed.contains("sk-secret"));
    }

    #[test]
    fn test_completions_url() {
        let config = Config::default();
        assert_eq!(config.completions_url().unwrap(), "https://api.openai.com/v1/chat/completions");

        let config = Config {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..Config::default()
        };
        assert_eq!(config.completions_url().unwrap(), "http://localhost:8080/v1/chat/completions");

        let config = Config {
            base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.completions_url(), Err(Error::InvalidUrl(_))));
    }
}
