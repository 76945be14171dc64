//! Pipeline-wide constants.

use std::time::Duration;

/// Total attempts for one fetch or generation call, the first one included.
pub const MAX_RETRY: u32 = 10;

/// Pause after a rate-limited attempt.
pub const WAIT_TIME: Duration = Duration::from_secs(5);

/// Articles whose normalized body is longer than this (in characters) are dropped.
pub const MAX_ARTICLE_SIZE: usize = 2500;

/// Two texts scoring strictly above this are duplicates.
pub const SIMILARITY_THRESHOLD: f64 = 0.3;

/// Articles accepted per run.
pub const MAX_ARTICLES: usize = 3;

/// A lead sentence must be strictly longer than this many characters.
pub const MIN_LEAD_LENGTH: usize = 10;

pub const REPORT_DELIMITER: &str = "\n------\n";

pub const EXPORT_FILE_NAME: &str = "generated_article.txt";
