use crate::core::request::RequestOptions;
use crate::utils::error::{ApiError, RequestError};
use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

impl From<&RequestOptions> for RetryPolicy {
    fn from(options: &RequestOptions) -> Self {
        Self::new(options.max_retries, options.retry_delay)
    }
}

/// 依序重試 `attempt`，最多 `max_retries + 1` 次，兩次嘗試之間固定等待 `retry_delay`。
/// 第一次成功就立即回傳；全部失敗時回傳最後一次的錯誤。
pub async fn with_retry<T, F, Fut>(
    url: &str,
    policy: RetryPolicy,
    mut attempt: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RequestError>>,
{
    let total = policy.total_attempts();
    let mut number = 1;

    loop {
        match attempt().await {
            Ok(value) => {
                if number > 1 {
                    tracing::info!("✅ {} succeeded on attempt {}/{}", url, number, total);
                }
                return Ok(value);
            }
            Err(error) => {
                tracing::warn!(
                    "⚠️ Failed to fetch from {} (attempt {}/{}): {}",
                    url,
                    number,
                    total,
                    error
                );

                if number >= total {
                    tracing::error!("❌ All retries failed for {}: {}", url, error);
                    return Err(ApiError::Exhausted {
                        url: url.to_string(),
                        attempts: number,
                        last: error,
                    });
                }
            }
        }

        if !policy.retry_delay.is_zero() {
            tokio::time::sleep(policy.retry_delay).await;
        }
        number += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    fn failing() -> RequestError {
        RequestError::Status(StatusCode::SERVICE_UNAVAILABLE)
    }

    #[tokio::test]
    async fn test_permanent_failure_attempts_max_retries_plus_one() {
        for max_retries in 0..4 {
            let calls = Arc::new(AtomicU32::new(0));
            let counter = calls.clone();

            let result: Result<(), _> = with_retry(
                "http://svc/api",
                RetryPolicy::new(max_retries, Duration::from_millis(1)),
                || {
                    counter.fetch_add(1, Ordering::SeqCst);
                    async { Err(failing()) }
                },
            )
            .await;

            assert_eq!(calls.load(Ordering::SeqCst), max_retries + 1);
            let error = result.unwrap_err();
            assert_eq!(error.attempts(), max_retries + 1);
        }
    }

    #[tokio::test]
    async fn test_success_after_failures_stops_retrying() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = with_retry(
            "http://svc/api",
            RetryPolicy::new(3, Duration::from_millis(1)),
            || {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                async move {
                    if n <= 2 {
                        Err(failing())
                    } else {
                        Ok(n)
                    }
                }
            },
        )
        .await;

        assert_eq!(result.unwrap(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_first_success_makes_single_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let policy = RetryPolicy::new(5, Duration::from_secs(10));
        let result = with_retry("http://svc/api", policy, || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, RequestError>("ok") }
        })
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeouts_count_as_failed_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), _> = with_retry(
            "http://svc/api",
            RetryPolicy::new(1, Duration::from_millis(1)),
            || {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err(RequestError::Timeout(Duration::from_millis(50))) }
            },
        )
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        match result.unwrap_err() {
            ApiError::Exhausted { last, .. } => assert!(last.is_timeout()),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_delay_only_between_attempts() {
        let started = Instant::now();

        let _: Result<(), _> = with_retry(
            "http://svc/api",
            RetryPolicy::new(2, Duration::from_millis(40)),
            || async { Err(failing()) },
        )
        .await;

        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_millis(80));
        assert!(elapsed < Duration::from_millis(120 + 200));
    }
}
