pub mod config;
pub mod dedup;
pub mod error;
pub mod http;
pub mod models;
pub mod retry;
pub mod similarity;
pub mod test_utils;
pub mod types;

pub use error::{Error, Result};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use models::{ChatMessage, GenerationModel, Role};
pub use retry::{Attempt, Backoff, Clock, FixedBackoff, RetryPolicy, TokioClock};
pub use similarity::similarity;
pub use types::{Article, FinalArticle, LeadSentence, NewsLink, Report, SearchQuery};
