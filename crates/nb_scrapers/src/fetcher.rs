use std::sync::Arc;

use nb_core::{HttpClient, Result, RetryPolicy};
use tracing::debug;

/// GETs pages, sleeping and retrying while the server answers 429.
#[derive(Debug, Clone)]
pub struct Fetcher {
    http: Arc<dyn HttpClient>,
    retry: RetryPolicy,
}

impl Fetcher {
    pub fn new(http: Arc<dyn HttpClient>, retry: RetryPolicy) -> Self {
        Self { http, retry }
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Returns the body of the first 200 response. Any status other than 200
    /// or 429 fails at once; transport errors are not retried either.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        let http = &self.http;
        self.retry
            .run(&format!("GET {}", url), |attempt| async move {
                debug!("📥 GET {} (attempt {})", url, attempt);
                http.get(url).await?.into_attempt()
            })
            .await
    }
}
