//! One user's pass through the pipeline, from keywords to exported article.
//!
//! ```text
//! Idle -> Collecting -> ReportReady -> AwaitingLead -> Synthesizing -> Done
//! ```
//!
//! A failed search or collection leaves the run as it was. A failed synthesis
//! returns to `AwaitingLead` with the report intact. `Done` accepts a new lead,
//! and a new search starts over with a fresh report.

use std::path::Path;

use nb_core::dedup::DedupFilter;
use nb_core::{Article, Error, FinalArticle, LeadSentence, NewsLink, Report, Result, SearchQuery};
use tracing::info;
use uuid::Uuid;

use crate::logging::Logger;
use crate::pipeline::Pipeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Collecting { accepted: usize },
    ReportReady,
    AwaitingLead,
    Synthesizing,
    Done,
}

#[derive(Debug)]
pub struct PipelineRun {
    id: Uuid,
    state: RunState,
    report: Option<Report>,
    lead: Option<String>,
    article: Option<FinalArticle>,
}

impl Default for PipelineRun {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineRun {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: RunState::Idle,
            report: None,
            lead: None,
            article: None,
        }
    }

    /// Resumes from a report built earlier, e.g. one saved to disk.
    pub fn from_report(report: Report) -> Self {
        Self {
            state: RunState::ReportReady,
            report: Some(report),
            ..Self::new()
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn into_report(self) -> Option<Report> {
        self.report
    }

    pub fn lead(&self) -> Option<&str> {
        self.lead.as_deref()
    }

    pub fn final_article(&self) -> Option<&FinalArticle> {
        self.article.as_ref()
    }

    fn logger(&self) -> Logger {
        let id = self.id.simple().to_string();
        Logger::new().with_prefix(format!("[run {}]", &id[..8]))
    }

    /// Searches for `query` and collects a report from the links found.
    pub async fn collect(&mut self, pipeline: &Pipeline, query: &SearchQuery) -> Result<&Report> {
        let links = pipeline.links(query).await?;
        self.collect_from_links(pipeline, &links).await
    }

    pub async fn collect_from_links(&mut self, pipeline: &Pipeline, links: &[NewsLink]) -> Result<&Report> {
        if links.is_empty() {
            return Err(Error::EmptySearchResult);
        }

        let previous = self.state;
        self.state = RunState::Collecting { accepted: 0 };
        let collected = match self.gather(pipeline, links).await {
            Ok(segments) => pipeline.finish_report(segments).await,
            Err(e) => Err(e),
        };
        let report = match collected {
            Ok(report) => report,
            Err(e) => {
                self.logger().error(&format!("❌ Collection failed: {}", e));
                self.state = previous;
                return Err(e);
            }
        };

        self.logger().info(&format!("✨ Report ready with {} segments", report.len()));
        self.lead = None;
        self.article = None;
        self.state = RunState::ReportReady;
        Ok(self.report.insert(report))
    }

    /// Fetch, extract and dedup each link in order, summarizing every
    /// accepted article, until enough articles are accepted.
    async fn gather(&mut self, pipeline: &Pipeline, links: &[NewsLink]) -> Result<Report> {
        let config = pipeline.config();
        let mut accepted: DedupFilter<Article> = DedupFilter::new(config.similarity_threshold);
        let mut segments = Report::default();

        for (i, link) in links.iter().enumerate() {
            if accepted.len() >= config.max_articles {
                break;
            }
            let log = self.logger().with_prefix(format!("[link {}/{}]", i + 1, links.len()));
            let Some(article) = pipeline.fetch_article(link, i + 1, &log).await else {
                continue;
            };
            let Some(article) = accepted.admit(article) else {
                log.info("⏭️ Skipping duplicate article");
                continue;
            };
            segments.push(pipeline.summarize(article, &log).await?);
            self.state = RunState::Collecting {
                accepted: accepted.len(),
            };
        }

        info!(run = %self.id, "📰 Accepted {} of {} links", accepted.len(), links.len());
        Ok(segments)
    }

    /// Stores the lead for the next synthesis. Needs a report first.
    pub fn set_lead(&mut self, lead: impl Into<String>) -> Result<()> {
        match self.state {
            RunState::ReportReady | RunState::AwaitingLead | RunState::Done => {
                self.lead = Some(lead.into());
                self.state = RunState::AwaitingLead;
                Ok(())
            }
            _ => Err(Error::Validation(
                "analyze keywords before writing the lead sentence".to_string(),
            )),
        }
    }

    /// Writes the final article. Refusals leave the state untouched; a
    /// generation failure returns to `AwaitingLead`.
    pub async fn synthesize(&mut self, pipeline: &Pipeline) -> Result<&FinalArticle> {
        let report = match &self.report {
            Some(report) if !report.is_empty() => report,
            _ => {
                return Err(Error::Validation(
                    "analyze keywords first, the report is empty".to_string(),
                ))
            }
        };
        let lead = match (&self.lead, self.state) {
            (Some(lead), RunState::AwaitingLead) => LeadSentence::new(lead.as_str())?,
            _ => return Err(Error::Validation("write a lead sentence first".to_string())),
        };

        self.state = RunState::Synthesizing;
        match pipeline.synthesize(&lead, report).await {
            Ok(article) => {
                self.logger().info("✅ Article written");
                self.state = RunState::Done;
                Ok(self.article.insert(article))
            }
            Err(e) => {
                self.logger().error(&format!("❌ Synthesis failed: {}", e));
                self.state = RunState::AwaitingLead;
                Err(e)
            }
        }
    }

    /// Writes the article as UTF-8 to `path`.
    pub async fn export(&self, path: impl AsRef<Path>) -> Result<()> {
        let article = self
            .article
            .as_ref()
            .ok_or_else(|| Error::Validation("there is no article to export yet".to_string()))?;
        article.export(path).await
    }
}
