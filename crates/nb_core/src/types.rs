use std::fmt;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{MAX_ARTICLE_SIZE, MIN_LEAD_LENGTH, REPORT_DELIMITER};
use crate::dedup;
use crate::{Error, Result};

/// The three keywords a run searches for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    keywords: [String; 3],
}

impl SearchQuery {
    pub fn new(first: impl Into<String>, second: impl Into<String>, third: impl Into<String>) -> Self {
        Self {
            keywords: [first.into(), second.into(), third.into()],
        }
    }

    pub fn keywords(&self) -> &[String; 3] {
        &self.keywords
    }
}

impl TryFrom<Vec<String>> for SearchQuery {
    type Error = Error;

    fn try_from(keywords: Vec<String>) -> Result<Self> {
        let keywords: [String; 3] = keywords
            .try_into()
            .map_err(|k: Vec<String>| Error::Validation(format!("expected 3 keywords, got {}", k.len())))?;
        Ok(Self { keywords })
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keywords.join(" "))
    }
}

/// URL of a candidate article page, as handed over by the search step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewsLink(String);

impl NewsLink {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NewsLink {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

impl From<String> for NewsLink {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl fmt::Display for NewsLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replaces every tab, carriage return and newline with a single space.
pub fn normalize_content(text: &str) -> String {
    text.chars()
        .map(|c| if matches!(c, '\t' | '\r' | '\n') { ' ' } else { c })
        .collect()
}

/// A fetched article that passed the size check.
///
/// `content` never contains tab/CR/LF and is at most [`MAX_ARTICLE_SIZE`]
/// characters long; `length` is its character count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    url: String,
    title: String,
    content: String,
    length: usize,
    fetched_at: DateTime<Utc>,
}

impl Article {
    /// Returns `None` when the normalized content exceeds [`MAX_ARTICLE_SIZE`].
    pub fn new(url: impl Into<String>, title: impl Into<String>, content: &str) -> Option<Self> {
        let content = normalize_content(content);
        let length = content.chars().count();
        if length > MAX_ARTICLE_SIZE {
            return None;
        }
        Some(Self {
            url: url.into(),
            title: title.into(),
            content,
            length,
            fetched_at: Utc::now(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}

/// Articles are compared by their body.
impl AsRef<str> for Article {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

/// Ordered summary segments, one per accepted article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    segments: Vec<String>,
}

impl Report {
    pub fn new(segments: Vec<String>) -> Self {
        Self { segments }
    }

    /// Splits a joined report back into segments, dropping blank ones.
    pub fn from_joined(text: &str) -> Self {
        Self {
            segments: text
                .split(REPORT_DELIMITER)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn push(&mut self, segment: String) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn into_segments(self) -> Vec<String> {
        self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn joined(&self) -> String {
        self.segments.join(REPORT_DELIMITER)
    }

    /// Keeps, in order, each segment that is not a duplicate of an earlier kept one.
    pub fn deduplicated(self, threshold: f64) -> Self {
        Self {
            segments: dedup::dedup(self.segments, threshold),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

/// Opening sentence supplied by the user for the final article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LeadSentence(String);

impl LeadSentence {
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.chars().count() <= MIN_LEAD_LENGTH {
            return Err(Error::Validation(format!(
                "the lead sentence must be longer than {} characters",
                MIN_LEAD_LENGTH
            )));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LeadSentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinalArticle(String);

impl FinalArticle {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// UTF-8 bytes of the article, exactly as generated.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }

    pub async fn export(&self, path: impl AsRef<Path>) -> Result<()> {
        tokio::fs::write(path, self.0.as_bytes()).await?;
        Ok(())
    }
}

impl fmt::Display for FinalArticle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_normalizes_and_counts_chars() {
        let article = Article::new("http://news.test/1", "Title", "첫 줄\n둘째\t줄\r끝").unwrap();
        assert_eq!(article.content(), "첫 줄 둘째 줄 끝");
        assert_eq!(article.len(), article.content().chars().count());
        assert_eq!(article.len(), 10);
    }

    #[test]
    fn test_article_size_limit() {
        let exact = "가".repeat(MAX_ARTICLE_SIZE);
        assert!(Article::new("u", "t", &exact).is_some());

        let over = "가".repeat(MAX_ARTICLE_SIZE + 1);
        assert!(Article::new("u", "t", &over).is_none());
    }

    #[test]
    fn test_report_join_and_split() {
        let report = Report::new(vec!["one".to_string(), "two".to_string(), "three".to_string()]);
        assert_eq!(report.joined(), "one\n------\ntwo\n------\nthree");

        let parsed = Report::from_joined("one\n------\n\n------\n two \n");
        assert_eq!(parsed.segments(), &["one".to_string(), "two".to_string()]);
        assert!(Report::from_joined("").is_empty());
    }

    #[test]
    fn test_lead_sentence_length() {
        assert!(LeadSentence::new("0123456789").unwrap_err().is_validation());
        assert!(LeadSentence::new("01234567890").is_ok());
        // Counted in characters, not bytes.
        assert!(LeadSentence::new("가나다라마바사아자차").is_err());
        assert!(LeadSentence::new("가나다라마바사아자차카").is_ok());
    }

    #[test]
    fn test_search_query_from_vec() {
        let query = SearchQuery::try_from(vec!["a".to_string(), "b".to_string(), "c".to_string()]).unwrap();
        assert_eq!(query.to_string(), "a b c");
        assert!(SearchQuery::try_from(vec!["a".to_string()]).is_err());
    }

    #[test]
    fn test_final_article_bytes() {
        let article = FinalArticle::new("서울시는 16일 발표했다.");
        assert_eq!(article.to_bytes(), "서울시는 16일 발표했다.".as_bytes());
    }
}
