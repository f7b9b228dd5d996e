//! Backoff for read-only RPC calls.
//!
//! Submissions are never retried here: re-sending a signed transaction is
//! decided by the submission helper, which knows whether a failure was a
//! stale gas coin.

use std::future::Future;

use anyhow::Result;
use sui_shop_types::RetryConfig;

/// True for rate limits, timeouts and connection failures.
pub fn should_retry_error(error: &anyhow::Error) -> bool {
    let s = format!("{:#}", error);
    let lower = s.to_ascii_lowercase();
    s.contains("429")
        || lower.contains("too many")
        || lower.contains("timed out")
        || lower.contains("timeout")
        || lower.contains("connection")
        || lower.contains("transport")
}

pub async fn with_retries<T, F, Fut>(retry: RetryConfig, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0usize;
    let mut backoff = retry.initial_backoff;

    loop {
        match f().await {
            Ok(v) => return Ok(v),
            Err(e) => {
                if attempt >= retry.retries || !should_retry_error(&e) {
                    return Err(e);
                }
                attempt += 1;
                tracing::debug!(attempt, ?backoff, error = %e, "retrying rpc read");
                tokio::time::sleep(backoff).await;
                backoff = std::cmp::min(backoff * 2, retry.max_backoff);
            }
        }
    }
}
