//! The resilient gateway wrapping every remote call.
//!
//! Spotify intermittently answers 429 (rate limit) and 502 (bad gateway);
//! both are worth waiting out. Every call the importer, matcher and
//! review loop make goes through [`with_retry`] so no code path can
//! bypass the policy.

use crate::{ImportError, Result};
use std::future::Future;
use std::time::Duration;

/// Retry policy configuration.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempt budget: the call is issued at most this many times.
    pub max_retry_count: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self { max_retry_count: 10 }
    }
}

/// Execute an async operation, retrying transient errors.
///
/// On [`ImportError::RateLimited`] or [`ImportError::BadGateway`] the
/// call is retried after sleeping `attempt` seconds — a linear backoff
/// of 1s, 2s, 3s, ... Non-transient errors, and transient errors once
/// the attempt budget is spent, propagate unchanged.
pub async fn with_retry<T, F, Fut>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt: u32 = 1;
    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(err) if err.is_transient() && attempt < config.max_retry_count => {
                log::info!(
                    "{operation_name}: {err}, retry {attempt} of {} in {attempt}s",
                    config.max_retry_count - 1
                );
                tokio::time::sleep(Duration::from_secs(u64::from(attempt))).await;
                attempt += 1;
            }
            Err(err) => {
                if err.is_transient() {
                    log::warn!(
                        "{operation_name}: giving up after {} attempts",
                        config.max_retry_count
                    );
                }
                return Err(err);
            }
        }
    }
}
