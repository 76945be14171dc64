//! Prompt wording for each generation stage.

use nb_core::config::REPORT_DELIMITER;
use nb_core::{Article, ChatMessage, LeadSentence, Report};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PromptTemplateSet {
    /// Newsroom instructions in Korean
    #[default]
    Korean,
    /// The same instructions in English
    English,
}

impl PromptTemplateSet {
    /// Report-style rewrite of one article.
    pub fn segment(&self, article: &Article) -> Vec<ChatMessage> {
        let (title, content) = (article.title(), article.content());
        let prompt = match self {
            Self::Korean => format!(
                "{title} 및 {content} 내용들을 문장 구조나 표현 방법 등을 바꿔서 보고서 스타일로 정리해. \
                 누가, 언제, 어디서, 무엇을, 어떻게, 왜 등 6하 원칙을 모두 포함해. \
                 숫자 관련된 내용은 결과물에 전부 포함시키고 절대 틀리지 마. \
                 담을 수 있는 내용 모두를 담아서 전체 1500자 이내로 써 줘. \
                 '눈길을 끌었다' '주목된다' 등 판단이나 창의적인 표현들은 빼 줘. \
                 '했다' '됐다' 같은 반말로 써 줘. \
                 내용 중에 [] 이 대괄호나 = 같은 부호가 들어가지 않게 해줘."
            ),
            Self::English => format!(
                "Rewrite the following article as a report, changing its sentence structure and wording.\n\
                 Title: {title}\nContent: {content}\n\
                 Cover who, when, where, what, how and why. Keep every number and get each one right. \
                 Include everything you can within 1500 characters. \
                 Leave out judgements and colourful phrases such as 'drew attention' or 'is noteworthy'. \
                 Write in plain past tense. Do not use square brackets or '=' signs."
            ),
        };
        vec![ChatMessage::user(prompt)]
    }

    /// Final article opening with the lead sentence, written from the report.
    pub fn final_article(&self, lead: &LeadSentence, report: &Report) -> Vec<ChatMessage> {
        let report = report.joined();
        let prompt = match self {
            Self::Korean => format!(
                "이 리포트({report}) 이 리포트를 토대로 신문 기사를 쓸거야. \
                 참고하는 내용과 완전히 다른 문장 구조로 1000자 이내의 기사를 써 줘. \
                 특히 숫자와 관련된 내용을 다룰 때 정확히 해. \
                 ({lead})에 써놓은 문장 그대로 시작해서 결과를 만들어. \
                 전체 리포트 중에서 기사 시작문을 중심으로 기사를 써 줘. \
                 '~하였다'는 '~했다'로 '~되었다'는 '~됐다'와 같은 어투로 해 줘."
            ),
            Self::English => format!(
                "Write a news article of at most 1000 characters based on this report:\n{report}\n\n\
                 Use sentence structures entirely different from the report and be exact with numbers. \
                 Start with this sentence, word for word: {lead}\n\
                 Build the article around that opening sentence, using the report as reference."
            ),
        };
        vec![ChatMessage::user(prompt)]
    }

    /// Asks the model to delete repeated material between report segments.
    pub fn merge(&self, report: &Report) -> Vec<ChatMessage> {
        let sections = report.len();
        let delimiter = REPORT_DELIMITER.trim();
        let report = report.joined();
        let prompt = match self {
            Self::Korean => format!(
                "{report}\n\n현재 {sections}개의 내용이 '{delimiter}' 선을 기준으로 나눠져 있어. \
                 이 중에서 똑같은 내용을 다루는 게 있으면 지워줘. \
                 이미 나온 내용은 바꾸지는 마. 중복된 걸 지우기만 해. \
                 남은 내용은 같은 '{delimiter}' 선으로 나눠서 돌려줘."
            ),
            Self::English => format!(
                "{report}\n\nThe text above has {sections} parts separated by '{delimiter}' lines. \
                 If any parts cover the same thing, delete the repetition. \
                 Do not reword what remains; only delete duplicates. \
                 Return the remaining parts separated by the same '{delimiter}' lines."
            ),
        };
        vec![ChatMessage::user(prompt)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nb_core::Role;

    fn article() -> Article {
        Article::new("https://n.news.naver.com/article/1", "한강 다리 재건축", "서울시는 16일 120억 원을 투입한다고 밝혔다.").unwrap()
    }

    #[test]
    fn test_segment_prompt_embeds_article() {
        for set in [PromptTemplateSet::Korean, PromptTemplateSet::English] {
            let messages = set.segment(&article());
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].role, Role::User);
            assert!(messages[0].content.contains("한강 다리 재건축"));
            assert!(messages[0].content.contains("120억 원"));
        }
    }

    #[test]
    fn test_final_prompt_embeds_lead_and_report() {
        let lead = LeadSentence::new("서울시가 한강 다리를 새로 짓는다.").unwrap();
        let report = Report::new(vec!["첫 번째 요약".to_string(), "두 번째 요약".to_string()]);
        for set in [PromptTemplateSet::Korean, PromptTemplateSet::English] {
            let content = &set.final_article(&lead, &report)[0].content;
            assert!(content.contains(lead.as_str()));
            assert!(content.contains("첫 번째 요약\n------\n두 번째 요약"));
        }
    }

    #[test]
    fn test_merge_prompt_counts_sections() {
        let report = Report::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert!(PromptTemplateSet::English.merge(&report)[0].content.contains("3 parts"));
        assert!(PromptTemplateSet::Korean.merge(&report)[0].content.contains("3개의 내용"));
    }
}
