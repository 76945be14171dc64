use nb_core::{Article, Error, Result};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Naver News article title.
pub const TITLE_SELECTOR: &str = ".media_end_head_title";
/// Naver News article body.
pub const BODY_SELECTOR: &str = "article#dic_area";

#[derive(Debug, Clone)]
pub struct Extractor {
    title: Selector,
    body: Selector,
}

impl Extractor {
    pub fn new(title_selector: &str, body_selector: &str) -> Result<Self> {
        Ok(Self {
            title: parse_selector(title_selector)?,
            body: parse_selector(body_selector)?,
        })
    }

    pub fn naver() -> Result<Self> {
        Self::new(TITLE_SELECTOR, BODY_SELECTOR)
    }

    /// Parses a fetched page into an [`Article`]. Missing elements become
    /// placeholder text with the 1-based `index`; `None` means the body is
    /// over the size limit.
    pub fn extract(&self, url: &str, html: &str, index: usize) -> Option<Article> {
        let document = Html::parse_document(html);

        let title = document
            .select(&self.title)
            .next()
            .map(stripped_text)
            .unwrap_or_else(|| format!("Title {} not found", index));
        let content = document
            .select(&self.body)
            .next()
            .map(stripped_text)
            .unwrap_or_else(|| format!("Article {} not found", index));

        let article = Article::new(url, title, &content);
        if article.is_none() {
            debug!("📏 Article {} is over the size limit", index);
        }
        article
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::Scraping(format!("invalid selector {:?}: {:?}", selector, e)))
}

/// Every text node trimmed, blank ones dropped, the rest glued together.
fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).filter(|s| !s.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use nb_core::config::MAX_ARTICLE_SIZE;

    fn page(title: &str, body: &str) -> String {
        format!(
            r#"<html><body>
                <h2 class="media_end_head_title"><span>{}</span></h2>
                <article id="dic_area" class="go_trans">{}</article>
            </body></html>"#,
            title, body
        )
    }

    #[test]
    fn test_extract_title_and_body() {
        let extractor = Extractor::naver().unwrap();
        let html = page("한강 다리 재건축", "<p>서울시는 16일</p>\n<p> 120억 원을 투입한다.</p><br/>");
        let article = extractor.extract("https://n.news.naver.com/1", &html, 1).unwrap();

        assert_eq!(article.url(), "https://n.news.naver.com/1");
        assert_eq!(article.title(), "한강 다리 재건축");
        assert_eq!(article.content(), "서울시는 16일120억 원을 투입한다.");
        assert_eq!(article.len(), article.content().chars().count());
    }

    #[test]
    fn test_missing_elements_become_placeholders() {
        let extractor = Extractor::naver().unwrap();
        let article = extractor.extract("https://example.com", "<html><p>nothing</p></html>", 4).unwrap();

        assert_eq!(article.title(), "Title 4 not found");
        assert_eq!(article.content(), "Article 4 not found");
    }

    #[test]
    fn test_whitespace_inside_text_nodes_is_flattened() {
        let extractor = Extractor::naver().unwrap();
        let html = page("제목", "첫째 줄\n둘째\t줄");
        let article = extractor.extract("u", &html, 1).unwrap();
        assert_eq!(article.content(), "첫째 줄 둘째 줄");
    }

    #[test]
    fn test_size_limit_is_a_hard_cutoff() {
        let extractor = Extractor::naver().unwrap();

        let fits = page("t", &"가".repeat(MAX_ARTICLE_SIZE));
        let article = extractor.extract("u", &fits, 1).unwrap();
        assert_eq!(article.len(), MAX_ARTICLE_SIZE);

        let too_long = page("t", &"가".repeat(MAX_ARTICLE_SIZE + 1));
        assert!(extractor.extract("u", &too_long, 1).is_none());
    }

    #[test]
    fn test_custom_selectors() {
        let extractor = Extractor::new("h1", "div.body").unwrap();
        let html = "<h1>Headline</h1><div class=\"body\">Text <b>here</b></div>";
        let article = extractor.extract("u", html, 1).unwrap();
        assert_eq!(article.title(), "Headline");
        assert_eq!(article.content(), "Texthere");
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        assert!(matches!(Extractor::new("", BODY_SELECTOR), Err(Error::Scraping(_))));
    }
}
