use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A non-success, non-429 response. Never retried.
    #[error("HTTP status {status}: {detail}")]
    Status { status: u16, detail: String },

    /// Every attempt was answered with a rate limit.
    #[error("failed after {attempts} attempts, try again later")]
    RetriesExhausted { attempts: u32 },

    #[error("no news found for these keywords, adjust the search and try again")]
    EmptySearchResult,

    #[error("{0}")]
    Validation(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    /// True for refusals caused by caller input rather than by an upstream service.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::EmptySearchResult)
    }

    /// Status code carried by a permanent HTTP failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retries_exhausted_message() {
        let err = Error::RetriesExhausted { attempts: 10 };
        assert_eq!(err.to_string(), "failed after 10 attempts, try again later");
        assert!(!err.is_validation());
    }

    #[test]
    fn test_classification() {
        assert!(Error::EmptySearchResult.is_validation());
        assert!(Error::Validation("too short".to_string()).is_validation());

        let err = Error::Status { status: 404, detail: "not found".to_string() };
        assert_eq!(err.status(), Some(404));
        assert!(!err.is_validation());
        assert_eq!(Error::EmptySearchResult.status(), None);
    }

    #[test]
    fn test_conversions() {
        let io: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "report.txt").into();
        assert!(matches!(io, Error::Io(_)));
        assert_eq!(io.to_string(), "IO error: report.txt");

        let json: Error = serde_json::from_str::<serde_json::Value>("{").unwrap_err().into();
        assert!(matches!(json, Error::Serialization(_)));
        assert!(!json.is_validation());
    }
}
