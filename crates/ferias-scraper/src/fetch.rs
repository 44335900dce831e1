use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;

/// Seconds to report when a 429 response carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP client for municipal feria listing pages.
///
/// Maps 429, 404 and other non-2xx responses to typed errors. Rate limits,
/// 5xx responses and network failures are retried with exponential backoff
/// up to `max_retries` additional attempts.
pub struct PageFetcher {
    client: Client,
    max_retries: u32,
    /// Base delay in seconds: the n-th retry waits `backoff_base_secs * 2^(n-1)`.
    backoff_base_secs: u64,
}

/// Returns `true` for absolute `http`/`https` URLs with a host.
#[must_use]
pub fn is_valid_page_url(url: &str) -> bool {
    reqwest::Url::parse(url)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
        .unwrap_or(false)
}

impl PageFetcher {
    /// Creates a fetcher with the given timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Downloads one page and returns its body as text.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidUrl`] if `url` is not an absolute http(s) URL.
    /// - [`ScraperError::RateLimited`] if HTTP 429 persists after all retries.
    /// - [`ScraperError::NotFound`] on HTTP 404 (not retried).
    /// - [`ScraperError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`ScraperError::Http`] on network or TLS failure after all retries.
    pub async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        if !is_valid_page_url(url) {
            return Err(ScraperError::InvalidUrl {
                url: url.to_owned(),
                reason: "expected an absolute http(s) URL".to_owned(),
            });
        }

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.to_owned();
            async move {
                let response = self.client.get(&url).send().await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                    return Err(ScraperError::RateLimited {
                        url,
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(ScraperError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                let body = response.text().await?;
                tracing::debug!(url = %url, bytes = body.len(), "fetched page");
                Ok(body)
            }
        })
        .await
    }

    /// Downloads every page in order, pausing `inter_request_delay_ms`
    /// between requests.
    ///
    /// A page that fails is logged and skipped so one broken link does not
    /// lose the rest.
    ///
    /// # Errors
    ///
    /// Returns the last error when `urls` is non-empty and every page failed.
    pub async fn fetch_all<S: AsRef<str>>(
        &self,
        urls: &[S],
        inter_request_delay_ms: u64,
    ) -> Result<Vec<String>, ScraperError> {
        let mut pages = Vec::with_capacity(urls.len());
        let mut last_error = None;

        for (i, url) in urls.iter().enumerate() {
            let url = url.as_ref();
            if i > 0 && inter_request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(inter_request_delay_ms)).await;
            }
            match self.fetch(url).await {
                Ok(body) => pages.push(body),
                Err(e) => {
                    tracing::warn!(url, error = %e, "failed to fetch page, skipping");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if pages.is_empty() => Err(e),
            _ => Ok(pages),
        }
    }
}
