use std::sync::Arc;

use nb_core::config::{MAX_ARTICLES, SIMILARITY_THRESHOLD};
use nb_core::{Article, Error, FinalArticle, GenerationModel, LeadSentence, NewsLink, Report, Result, SearchQuery};
use nb_inference::PromptTemplateSet;
use tracing::info;

use crate::extractor::Extractor;
use crate::fetcher::Fetcher;
use crate::logging::Logger;
use crate::run::PipelineRun;
use crate::search::NewsSearch;

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub max_articles: usize,
    pub similarity_threshold: f64,
    /// Drop segments that repeat an earlier segment once collection ends.
    pub apply_segment_dedup: bool,
    /// Ask the model to delete repeated material across segments.
    pub merge_with_model: bool,
    pub prompt_templates: PromptTemplateSet,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_articles: MAX_ARTICLES,
            similarity_threshold: SIMILARITY_THRESHOLD,
            apply_segment_dedup: true,
            merge_with_model: false,
            prompt_templates: PromptTemplateSet::default(),
        }
    }
}

impl PipelineConfig {
    pub fn with_max_articles(mut self, max_articles: usize) -> Self {
        self.max_articles = max_articles;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    pub fn with_segment_dedup(mut self, enabled: bool) -> Self {
        self.apply_segment_dedup = enabled;
        self
    }

    pub fn with_merge_with_model(mut self, enabled: bool) -> Self {
        self.merge_with_model = enabled;
        self
    }

    pub fn with_prompt_templates(mut self, templates: PromptTemplateSet) -> Self {
        self.prompt_templates = templates;
        self
    }
}

/// The stages of a news run, shared by every [`PipelineRun`].
///
/// A `Pipeline` holds no per-run data and can serve any number of runs at
/// once; the run owns its articles, report and article.
#[derive(Debug, Clone)]
pub struct Pipeline {
    search: Arc<dyn NewsSearch>,
    fetcher: Fetcher,
    extractor: Extractor,
    model: Arc<dyn GenerationModel>,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        search: Arc<dyn NewsSearch>,
        fetcher: Fetcher,
        extractor: Extractor,
        model: Arc<dyn GenerationModel>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            search,
            fetcher,
            extractor,
            model,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn model(&self) -> &Arc<dyn GenerationModel> {
        &self.model
    }

    /// Candidate links for `query`; no links at all is an error.
    pub async fn links(&self, query: &SearchQuery) -> Result<Vec<NewsLink>> {
        let links = self.search.search(query).await?;
        if links.is_empty() {
            return Err(Error::EmptySearchResult);
        }
        Ok(links)
    }

    /// Fetch and extract one link. Failures are logged and skipped.
    pub(crate) async fn fetch_article(&self, link: &NewsLink, index: usize, log: &Logger) -> Option<Article> {
        log.info(&format!("📰 Fetching {}", link));
        let html = match self.fetcher.fetch(link.as_str()).await {
            Ok(html) => html,
            Err(e) => {
                log.warn(&format!("⚠️ Skipping {}: {}", link, e));
                return None;
            }
        };
        log.debug(&format!("📄 Fetched {} bytes", html.len()));
        let article = self.extractor.extract(link.as_str(), &html, index);
        if article.is_none() {
            log.info("⏭️ Skipping oversized article");
        }
        article
    }

    pub(crate) async fn summarize(&self, article: &Article, log: &Logger) -> Result<String> {
        log.info(&format!("🤖 Summarizing \"{}\" with {}", article.title(), self.model.name()));
        let messages = self.config.prompt_templates.segment(article);
        let segment = self.model.generate(&messages).await?;
        log.info(&format!("✨ Segment ready ({} chars)", segment.chars().count()));
        Ok(segment)
    }

    /// Segment-level dedup, then the optional merge call.
    pub(crate) async fn finish_report(&self, report: Report) -> Result<Report> {
        let collected = report.len();
        let report = if self.config.apply_segment_dedup {
            report.deduplicated(self.config.similarity_threshold)
        } else {
            report
        };
        if report.len() < collected {
            info!("🧹 Dropped {} repeated segments", collected - report.len());
        }

        if !self.config.merge_with_model || report.len() < 2 {
            return Ok(report);
        }
        self.merge(&report).await
    }

    async fn merge(&self, report: &Report) -> Result<Report> {
        info!("🤖 Merging {} segments with {}", report.len(), self.model.name());
        let messages = self.config.prompt_templates.merge(report);
        let merged = Report::from_joined(&self.model.generate(&messages).await?);
        if merged.is_empty() {
            return Err(Error::Generation("merge returned an empty report".to_string()));
        }
        info!("✨ Merged report has {} segments", merged.len());
        Ok(merged)
    }

    /// One generation call over the lead and the report.
    pub async fn synthesize(&self, lead: &LeadSentence, report: &Report) -> Result<FinalArticle> {
        if report.is_empty() {
            return Err(Error::Validation(
                "analyze keywords first, the report is empty".to_string(),
            ));
        }
        info!("🤖 Writing the article from {} segments", report.len());
        let messages = self.config.prompt_templates.final_article(lead, report);
        let text = self.model.generate(&messages).await?;
        info!("✨ Article ready ({} chars)", text.chars().count());
        Ok(FinalArticle::new(text))
    }

    /// Runs a fresh [`PipelineRun`] up to its report.
    pub async fn build_report(&self, query: &SearchQuery) -> Result<Report> {
        let mut run = PipelineRun::new();
        run.collect(self, query).await?;
        Ok(run.into_report().unwrap_or_default())
    }
}
