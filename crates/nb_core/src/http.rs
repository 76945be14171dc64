use std::fmt;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::Client;

use crate::retry::Attempt;
use crate::{Error, Result};

const USER_AGENT: &str = concat!("Mozilla/5.0 (compatible; newsbot/", env!("CARGO_PKG_VERSION"), ")");

/// Longest body excerpt kept in a status error.
const DETAIL_LIMIT: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 200 is done, 429 asks for a retry, anything else is a permanent failure.
    pub fn into_attempt(self) -> Result<Attempt<String>> {
        match self.status {
            200 => Ok(Attempt::Done(self.body)),
            429 => Ok(Attempt::RateLimited),
            status => Err(Error::Status {
                status,
                detail: self.body.chars().take(DETAIL_LIMIT).collect(),
            }),
        }
    }
}

/// The network seam used by the fetcher and the generation client.
#[async_trait]
pub trait HttpClient: Send + Sync + fmt::Debug {
    async fn get(&self, url: &str) -> Result<HttpResponse>;

    async fn post_json(&self, url: &str, bearer: Option<&str>, body: &serde_json::Value) -> Result<HttpResponse>;
}

#[derive(Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl fmt::Debug for ReqwestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestClient")
            .field("client", &"<reqwest::Client>")
            .finish()
    }
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }

    async fn read(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send().await?;
        Self::read(response).await
    }

    async fn post_json(&self, url: &str, bearer: Option<&str>, body: &serde_json::Value) -> Result<HttpResponse> {
        let mut request = self.client.post(url).json(body);
        if let Some(token) = bearer {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        let response = request.send().await?;
        Self::read(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_attempt() {
        assert_eq!(
            HttpResponse::new(200, "<html/>").into_attempt().unwrap(),
            Attempt::Done("<html/>".to_string())
        );
        assert_eq!(HttpResponse::new(429, "").into_attempt().unwrap(), Attempt::RateLimited);

        let err = HttpResponse::new(503, "x".repeat(1000)).into_attempt().unwrap_err();
        match err {
            Error::Status { status, detail } => {
                assert_eq!(status, 503);
                assert_eq!(detail.len(), DETAIL_LIMIT);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
