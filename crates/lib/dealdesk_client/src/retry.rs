//! Opt-in retry with exponential backoff.
//!
//! The client itself never retries. Callers that want it wrap an idempotent
//! read in [`retry`]; mutations such as deletes stay fire-once.

use std::future::Future;

use tokio::time::{Duration, sleep};
use tracing::debug;

use crate::error::{ApiError, ApiResult};

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt; doubles each time after.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before attempt `attempt + 1` (zero-based `attempt`).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Transport failures and 5xx responses are worth another try. Requests
/// that could not be built ([`ApiError::InvalidRequest`]) never are.
pub fn is_retryable(error: &ApiError) -> bool {
    match error {
        ApiError::RequestFailed { status: None, .. } => true,
        ApiError::RequestFailed {
            status: Some(status),
            ..
        } => *status >= 500,
        _ => false,
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error, or
/// the policy's attempts are used up.
pub async fn retry<T, F, Fut>(policy: RetryPolicy, mut operation: F) -> ApiResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt + 1 < attempts && is_retryable(&e) => {
                let delay = policy.backoff(attempt);
                debug!(attempt = attempt + 1, ?delay, error = %e, "retrying request");
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 3,
            base_delay: Duration::from_millis(1),
        }
    }

    fn server_error() -> ApiError {
        ApiError::RequestFailed {
            status: Some(503),
            message: "unavailable".into(),
            body: None,
        }
    }

    #[test]
    fn backoff_doubles() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(0), Duration::from_secs(1));
        assert_eq!(policy.backoff(1), Duration::from_secs(2));
        assert_eq!(policy.backoff(2), Duration::from_secs(4));
    }

    #[test]
    fn only_transient_errors_retry() {
        assert!(is_retryable(&server_error()));
        assert!(is_retryable(&ApiError::RequestFailed {
            status: None,
            message: "connection refused".into(),
            body: None,
        }));
        assert!(!is_retryable(&ApiError::Unauthorized));
        assert!(!is_retryable(&ApiError::Cancelled));
        assert!(!is_retryable(&ApiError::InvalidRequest("bad body".into())));
        assert!(!is_retryable(&ApiError::RequestFailed {
            status: Some(404),
            message: "missing".into(),
            body: None,
        }));
    }

    #[tokio::test]
    async fn retries_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let result = retry(fast(), || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(server_error())
                } else {
                    Ok("done")
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let result: ApiResult<()> = retry(fast(), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(server_error())
            }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn invalid_request_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let result: ApiResult<()> = retry(fast(), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::InvalidRequest("invalid mime type 'x'".into()))
            }
        })
        .await;
        assert!(matches!(result, Err(ApiError::InvalidRequest(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unauthorized_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let result: ApiResult<()> = retry(fast(), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ApiError::Unauthorized)
            }
        })
        .await;
        assert!(matches!(result, Err(ApiError::Unauthorized)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
