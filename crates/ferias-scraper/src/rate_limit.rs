//! Retry helper for page fetches.
//!
//! Rate-limit responses and network-level failures are retried with
//! exponential backoff. Everything else (404s, other statuses, bad URLs) is
//! returned on the first failure.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } | ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
        ScraperError::NotFound { .. }
        | ScraperError::InvalidUrl { .. }
        | ScraperError::NoRecordsFound { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The wait before retry `n` (1-based) is `backoff_base_secs * 2^(n-1)`
/// seconds. With `max_retries = 2` the operation runs at most 3 times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %err,
            "transient page fetch error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn rate_limited() -> ScraperError {
        ScraperError::RateLimited {
            url: "https://montevideo.gub.uy/ferias".to_owned(),
            retry_after_secs: 0,
        }
    }

    #[tokio::test]
    async fn retries_on_rate_limited_then_succeeds() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                let n = cc.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(rate_limited())
                } else {
                    Ok::<&str, ScraperError>("<html></html>")
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), "<html></html>");
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn server_errors_are_retried_until_budget_runs_out() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(2, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(ScraperError::UnexpectedStatus {
                    status: 503,
                    url: "https://montevideo.gub.uy/ferias".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
        assert!(matches!(
            result,
            Err(ScraperError::UnexpectedStatus { status: 503, .. })
        ));
    }

    #[tokio::test]
    async fn does_not_retry_not_found() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(ScraperError::NotFound {
                    url: "https://montevideo.gub.uy/missing".to_owned(),
                })
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ScraperError::NotFound { .. })));
    }
}
