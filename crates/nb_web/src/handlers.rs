use std::sync::Arc;

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::Json;
use nb_core::config::EXPORT_FILE_NAME;
use nb_core::{FinalArticle, Report, SearchQuery};
use nb_scrapers::PipelineRun;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportRequest {
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReportResponse {
    pub segments: Vec<String>,
    /// Segments joined with the report delimiter.
    pub report: String,
}

#[derive(Debug, Deserialize)]
pub struct ArticleRequest {
    pub lead: String,
    pub segments: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ArticleResponse {
    pub article: String,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub article: String,
}

pub async fn create_report(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReportRequest>,
) -> Result<Json<ReportResponse>, ApiError> {
    let query = SearchQuery::try_from(request.keywords)?;
    let report = state.pipeline.build_report(&query).await?;
    Ok(Json(ReportResponse {
        report: report.joined(),
        segments: report.into_segments(),
    }))
}

pub async fn create_article(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ArticleRequest>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let mut run = PipelineRun::from_report(Report::new(request.segments));
    run.set_lead(request.lead)?;
    let article = run.synthesize(&state.pipeline).await?;
    Ok(Json(ArticleResponse {
        article: article.as_str().to_string(),
    }))
}

pub async fn export_article(Json(request): Json<ExportRequest>) -> impl IntoResponse {
    let article = FinalArticle::new(request.article);
    (
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME)),
        ],
        article.to_bytes(),
    )
}
