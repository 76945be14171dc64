//! Bounded retry on rate limiting.
//!
//! Both the page fetcher and the generation client go through [`RetryPolicy`]:
//! an attempt either finishes, reports a rate limit (slept on and retried), or
//! fails, which ends the loop at once. Sleeping goes through [`Clock`] and the
//! pause length through [`Backoff`] so tests can run without real delays.

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::config::{MAX_RETRY, WAIT_TIME};
use crate::{Error, Result};

/// Result of one attempt that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt<T> {
    Done(T),
    RateLimited,
}

pub trait Backoff: Send + Sync + fmt::Debug {
    /// Pause after the given 1-based attempt was rate limited.
    fn delay(&self, attempt: u32) -> Duration;
}

#[derive(Debug, Clone, Copy)]
pub struct FixedBackoff(pub Duration);

impl Backoff for FixedBackoff {
    fn delay(&self, _attempt: u32) -> Duration {
        self.0
    }
}

#[async_trait]
pub trait Clock: Send + Sync + fmt::Debug {
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: Arc<dyn Backoff>,
    clock: Arc<dyn Clock>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_RETRY)
    }
}

impl RetryPolicy {
    /// `max_attempts` counts the first attempt; zero is treated as one.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff: Arc::new(FixedBackoff(WAIT_TIME)),
            clock: Arc::new(TokioClock),
        }
    }

    pub fn with_backoff(mut self, backoff: impl Backoff + 'static) -> Self {
        self.backoff = Arc::new(backoff);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Runs `op` until it is done, fails, or the attempt bound is reached.
    /// `op` receives the 1-based attempt number. No pause follows the final
    /// attempt.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Attempt<T>>>,
    {
        for attempt in 1..=self.max_attempts {
            match op(attempt).await? {
                Attempt::Done(value) => return Ok(value),
                Attempt::RateLimited if attempt < self.max_attempts => {
                    let delay = self.backoff.delay(attempt);
                    warn!(
                        "⏳ {} rate limited (attempt {}/{}), retrying in {:?}",
                        what, attempt, self.max_attempts, delay
                    );
                    self.clock.sleep(delay).await;
                }
                Attempt::RateLimited => {
                    warn!("⏳ {} rate limited on the last attempt", what);
                }
            }
        }
        Err(Error::RetriesExhausted {
            attempts: self.max_attempts,
        })
    }
}
