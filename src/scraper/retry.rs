use crate::model::{FetchError, SearchRequest};
use crate::scraper::traits::Scraper;

use rand::Rng;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retries transient failures of the wrapped scraper with exponential backoff.
/// With `max_retries == 0` it behaves exactly like the inner scraper.
pub struct RetryingScraper<S> {
    inner: S,
    max_retries: u32,
    base_delay: Duration,
}

impl<S: Scraper> RetryingScraper<S> {
    pub fn new(inner: S, max_retries: u32, base_delay: Duration) -> Self {
        Self { inner, max_retries, base_delay }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let exp = self.base_delay.saturating_mul(2u32.saturating_pow(attempt));
        let jitter_ms = self.base_delay.as_millis().min(u64::MAX as u128) as u64 / 2;
        let jitter = if jitter_ms > 0 {
            rand::rng().random_range(0..=jitter_ms)
        } else {
            0
        };
        exp.saturating_add(Duration::from_millis(jitter))
    }
}

#[async_trait::async_trait]
impl<S: Scraper> Scraper for RetryingScraper<S> {
    async fn fetch(&self, req: &SearchRequest) -> Result<String, FetchError> {
        let mut attempt = 0u32;
        loop {
            match self.inner.fetch(req).await {
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    let delay = self.backoff(attempt);
                    attempt += 1;
                    warn!(
                        "Fetch for '{}' failed ({}), retry {}/{} in {:?}",
                        req.query, e, attempt, self.max_retries, delay
                    );
                    sleep(delay).await;
                }
                result => return result,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Flaky {
        calls: AtomicU32,
        failures: u32,
        status: u16,
    }

    #[async_trait::async_trait]
    impl Scraper for Flaky {
        async fn fetch(&self, _req: &SearchRequest) -> Result<String, FetchError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(FetchError::UpstreamUnavailable { status: self.status })
            } else {
                Ok("{}".to_string())
            }
        }
    }

    fn request() -> SearchRequest {
        SearchRequest { query: "mouse".into(), site_id: "MLB".into() }
    }

    #[tokio::test]
    async fn retries_server_errors_until_success() {
        let flaky = Flaky { calls: AtomicU32::new(0), failures: 2, status: 503 };
        let scraper = RetryingScraper::new(flaky, 3, Duration::from_millis(1));
        assert_eq!(scraper.fetch(&request()).await.unwrap(), "{}");
        assert_eq!(scraper.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_retries() {
        let flaky = Flaky { calls: AtomicU32::new(0), failures: 10, status: 500 };
        let scraper = RetryingScraper::new(flaky, 2, Duration::from_millis(1));
        let err = scraper.fetch(&request()).await.unwrap_err();
        assert!(matches!(err, FetchError::UpstreamUnavailable { status: 500 }));
        assert_eq!(scraper.inner.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let flaky = Flaky { calls: AtomicU32::new(0), failures: 1, status: 404 };
        let scraper = RetryingScraper::new(flaky, 5, Duration::from_millis(1));
        assert!(scraper.fetch(&request()).await.is_err());
        assert_eq!(scraper.inner.calls.load(Ordering::SeqCst), 1);
    }
}
