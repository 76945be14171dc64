use std::collections::HashSet;
use std::fmt;

use async_trait::async_trait;
use nb_core::{Error, NewsLink, Result, SearchQuery};
use scraper::{Html, Selector};
use tracing::info;
use url::form_urlencoded;

use crate::fetcher::Fetcher;

pub const NAVER_SEARCH_URL: &str = "https://search.naver.com/search.naver?sm=tab_hty.top&where=news&query=";

/// Label Naver puts on results hosted on Naver News itself.
const NAVER_NEWS_LABEL: &str = "네이버뉴스";

/// Turns a keyword query into candidate article links.
#[async_trait]
pub trait NewsSearch: Send + Sync + fmt::Debug {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<NewsLink>>;
}

#[derive(Debug, Clone)]
pub struct NaverSearch {
    fetcher: Fetcher,
    base_url: String,
    link: Selector,
}

impl NaverSearch {
    pub fn new(fetcher: Fetcher) -> Result<Self> {
        Self::with_base_url(fetcher, NAVER_SEARCH_URL)
    }

    pub fn with_base_url(fetcher: Fetcher, base_url: impl Into<String>) -> Result<Self> {
        let link = Selector::parse(".info").map_err(|e| Error::Scraping(format!("{:?}", e)))?;
        Ok(Self {
            fetcher,
            base_url: base_url.into(),
            link,
        })
    }

    pub fn search_url(&self, query: &SearchQuery) -> String {
        let terms: Vec<String> = query
            .keywords()
            .iter()
            .map(|k| form_urlencoded::byte_serialize(k.as_bytes()).collect())
            .collect();
        format!("{}{}", self.base_url, terms.join("+"))
    }

    /// Naver News links in page order, first occurrence of each href kept.
    pub fn parse_links(&self, html: &str) -> Vec<NewsLink> {
        let document = Html::parse_document(html);
        let mut seen = HashSet::new();
        document
            .select(&self.link)
            .filter(|el| el.text().collect::<String>().contains(NAVER_NEWS_LABEL))
            .filter_map(|el| el.value().attr("href"))
            .filter(|href| seen.insert(href.to_string()))
            .map(NewsLink::from)
            .collect()
    }
}

#[async_trait]
impl NewsSearch for NaverSearch {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<NewsLink>> {
        let url = self.search_url(query);
        info!("🔍 Searching Naver News for \"{}\"", query);
        let html = self.fetcher.fetch(&url).await?;
        let links = self.parse_links(&html);
        info!("🔗 Found {} Naver News links", links.len());
        Ok(links)
    }
}

/// A fixed list of links, for callers that already know which pages to read.
#[derive(Debug, Clone, Default)]
pub struct StaticLinks(Vec<NewsLink>);

impl StaticLinks {
    pub fn new<I, L>(links: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<NewsLink>,
    {
        Self(links.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl NewsSearch for StaticLinks {
    async fn search(&self, _query: &SearchQuery) -> Result<Vec<NewsLink>> {
        Ok(self.0.clone())
    }
}
