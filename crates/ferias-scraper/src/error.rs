use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rate limited by {url} (retry after {retry_after_secs}s)")]
    RateLimited { url: String, retry_after_secs: u64 },

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid page URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Every page was processed but none produced a valid feria.
    #[error("no records found across {pages} page(s) ({extracted} candidates, {rejected} rejected)")]
    NoRecordsFound {
        pages: usize,
        extracted: usize,
        rejected: usize,
    },
}
