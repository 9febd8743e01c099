use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use std::time::Duration;

pub struct HttpClientFactory;

impl HttpClientFactory {
    /// Creates a new HTTP client with retry middleware.
    ///
    /// Retry policy: exponential backoff, max 3 retries.
    pub fn create_client(timeout: Duration) -> ClientWithMiddleware {
        Self::create_client_with_retries(timeout, 3)
    }

    /// Variant with an explicit retry budget. Zero retries is used by
    /// tests that exercise the fallback path and must fail fast.
    pub fn create_client_with_retries(timeout: Duration, max_retries: u32) -> ClientWithMiddleware {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(max_retries);

        let client = Client::builder()
            .pool_max_idle_per_host(5)
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10).min(timeout))
            .build()
            .unwrap_or_else(|_| Client::new());

        ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build()
    }
}
