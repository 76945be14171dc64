use std::sync::Arc;

use nb_core::{ChatMessage, HttpClient, Result};
use serde::{Deserialize, Serialize};

use crate::{Config, ModelKind};

pub mod dummy;
pub mod openai;

pub use dummy::DummyModel;
pub use nb_core::GenerationModel;
pub use openai::OpenAiModel;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f64,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

pub fn create_model(kind: ModelKind, config: Config, http: Arc<dyn HttpClient>) -> Result<Arc<dyn GenerationModel>> {
    let model: Arc<dyn GenerationModel> = match kind {
        ModelKind::OpenAi => Arc::new(OpenAiModel::new(config, http)?),
        ModelKind::Dummy => Arc::new(DummyModel::new()),
    };
    tracing::debug!("Created generation model: {}", model.name());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nb_core::ReqwestClient;

    #[test]
    fn test_create_model() {
        let http: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new().unwrap());

        let dummy = create_model(ModelKind::Dummy, Config::default(), http.clone()).unwrap();
        assert_eq!(dummy.name(), "Dummy");

        assert!(create_model(ModelKind::OpenAi, Config::default(), http.clone()).is_err());

        let config = Config {
            api_key: Some("test-key".to_string()),
            ..Config::default()
        };
        let openai = create_model(ModelKind::OpenAi, config, http).unwrap();
        assert_eq!(openai.name(), "OpenAI");
    }

    #[test]
    fn test_request_shape() {
        let messages = vec![ChatMessage::user("hello")];
        let request = ChatRequest {
            model: "gpt-4",
            messages: &messages,
            max_tokens: 5000,
            temperature: 0.2,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "model": "gpt-4",
                "messages": [{"role": "user", "content": "hello"}],
                "max_tokens": 5000,
                "temperature": 0.2,
            })
        );
    }
}
