use std::fmt;

use nb_core::{ChatMessage, GenerationModel, Result, Role};

/// Offline stand-in that answers with the first 40 words of the last user
/// message, prompt instructions included, joined by single spaces.
pub struct DummyModel {
    words: usize,
}

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").field("words", &self.words).finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self { words: 40 }
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl GenerationModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn generate(&self, messages: &[ChatMessage]) -> Result<String> {
        let prompt = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();
        let words: Vec<&str> = prompt.split_whitespace().take(self.words).collect();
        Ok(words.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dummy_model() {
        let model = DummyModel::new();
        let messages = vec![
            ChatMessage::system("ignored"),
            ChatMessage::user("  This is a test article.\nIt has multiple sentences.  "),
        ];
        let reply = model.generate(&messages).await.unwrap();
        assert_eq!(reply, "This is a test article. It has multiple sentences.");

        let long = "word ".repeat(100);
        let reply = model.generate(&[ChatMessage::user(long)]).await.unwrap();
        assert_eq!(reply.split_whitespace().count(), 40);

        assert_eq!(model.generate(&[]).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_dummy_model_echoes_prompt_instructions() {
        let title = "한강 다리 재건축";
        let article = nb_core::Article::new("u", title, "서울시는 120억 원을 투입한다.").unwrap();
        let messages = crate::PromptTemplateSet::Korean.segment(&article);

        let reply = DummyModel::new().generate(&messages).await.unwrap();
        let expected: Vec<&str> = messages[0].content.split_whitespace().take(40).collect();
        assert_eq!(reply, expected.join(" "));
        assert!(reply.starts_with(title));
        assert!(reply.contains("보고서"));
    }
}
