use thiserror::Error;

use ferias_core::GeocodeFailure;

/// Errors returned by geocoding clients and the address resolver.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The service answered but had no match (or the match fell outside the
    /// configured bounds).
    #[error("no geocoding result for \"{query}\"")]
    NotFound { query: String },

    #[error("geocoder rate limited the request for \"{query}\"")]
    RateLimited { query: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from geocoder for \"{query}\"")]
    Status { status: u16, query: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid geocoder base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl GeocodeError {
    /// Whether waiting and asking again could plausibly succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            GeocodeError::RateLimited { .. } | GeocodeError::Network(_) => true,
            GeocodeError::Status { status, .. } => *status >= 500,
            GeocodeError::NotFound { .. }
            | GeocodeError::Deserialize { .. }
            | GeocodeError::InvalidBaseUrl { .. } => false,
        }
    }

    /// Reason recorded on a feria that could not be placed.
    #[must_use]
    pub fn failure(&self) -> GeocodeFailure {
        match self {
            GeocodeError::NotFound { .. } | GeocodeError::RateLimited { .. } => {
                GeocodeFailure::NotFound
            }
            GeocodeError::Network(_)
            | GeocodeError::Status { .. }
            | GeocodeError::Deserialize { .. }
            | GeocodeError::InvalidBaseUrl { .. } => GeocodeFailure::NetworkError,
        }
    }
}
