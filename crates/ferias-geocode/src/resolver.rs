//! Address resolution: locality qualification, request pacing and retries
//! on top of a raw [`Geocoder`].

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use ferias_core::{AppConfig, BoundingBox, Coordinate};

use crate::error::GeocodeError;
use crate::retry::RetryPolicy;

/// A single-shot geocoding backend.
///
/// Implementations perform exactly one lookup per call and report transient
/// conditions as [`GeocodeError::RateLimited`], [`GeocodeError::Network`]
/// or a 5xx [`GeocodeError::Status`] so the resolver can retry them.
pub trait Geocoder {
    fn geocode(&self, query: &str)
        -> impl Future<Output = Result<Coordinate, GeocodeError>> + Send;
}

/// Resolves free-text street descriptions to coordinates.
///
/// Every query gets the locality qualifier appended. Outbound calls are
/// spaced at least `request_delay` apart, including retries. Transient
/// failures are retried per the [`RetryPolicy`]; once the budget is spent
/// the caller sees [`GeocodeError::NotFound`] for that address only.
pub struct AddressResolver<G> {
    geocoder: G,
    locality: String,
    policy: RetryPolicy,
    request_delay: Duration,
    bounds: Option<BoundingBox>,
    last_request: Option<Instant>,
}

impl<G: Geocoder> AddressResolver<G> {
    /// Creates a resolver with the default retry policy, a one second
    /// inter-request delay, and no bounding box.
    pub fn new(geocoder: G, locality: impl Into<String>) -> Self {
        Self {
            geocoder,
            locality: locality.into(),
            policy: RetryPolicy::default(),
            request_delay: Duration::from_secs(1),
            bounds: None,
            last_request: None,
        }
    }

    /// Builds a resolver from the `FERIAS_GEOCODE_*` settings.
    pub fn from_config(geocoder: G, config: &AppConfig) -> Self {
        Self::new(geocoder, config.locality.clone())
            .with_policy(RetryPolicy {
                max_retries: config.geocode_max_retries,
                backoff_base_ms: config.geocode_backoff_base_ms,
                multiplier: config.geocode_backoff_multiplier,
            })
            .with_request_delay(Duration::from_millis(config.geocode_delay_ms))
            .with_bounds(config.geocode_bounds)
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: Option<BoundingBox>) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// The query actually sent for `description`.
    #[must_use]
    pub fn qualify(&self, description: &str) -> String {
        let description = description.trim();
        if description.is_empty() {
            self.locality.clone()
        } else {
            format!("{description}, {}", self.locality)
        }
    }

    /// Resolves `description` within the configured locality.
    ///
    /// # Errors
    ///
    /// [`GeocodeError::NotFound`] when the service has no match, the match is
    /// outside the bounding box, or the retry budget ran out on transient
    /// errors. Non-transient errors (bad status, malformed body) are
    /// returned as-is on the first occurrence.
    pub async fn resolve(&mut self, description: &str) -> Result<Coordinate, GeocodeError> {
        let query = self.qualify(description);
        let mut attempt = 0u32;

        loop {
            self.pace().await;
            let result = self.geocoder.geocode(&query).await;
            self.last_request = Some(Instant::now());

            match result {
                Ok(coordinate) => return self.check_bounds(query, coordinate),
                Err(err) if !err.is_transient() => return Err(err),
                Err(err) if attempt >= self.policy.max_retries => {
                    tracing::warn!(
                        query = %query,
                        attempts = attempt + 1,
                        error = %err,
                        "geocoding retries exhausted, treating address as not found"
                    );
                    return Err(GeocodeError::NotFound { query });
                }
                Err(err) => {
                    let delay = self.policy.delay(attempt);
                    tracing::warn!(
                        query = %query,
                        attempt,
                        max_retries = self.policy.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "transient geocoding error, retrying after backoff"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    fn check_bounds(
        &self,
        query: String,
        coordinate: Coordinate,
    ) -> Result<Coordinate, GeocodeError> {
        match self.bounds {
            Some(bounds) if !bounds.contains(coordinate) => {
                tracing::debug!(
                    query = %query,
                    latitude = coordinate.latitude,
                    longitude = coordinate.longitude,
                    "geocoder result outside bounds"
                );
                Err(GeocodeError::NotFound { query })
            }
            _ => Ok(coordinate),
        }
    }

    /// Sleeps until `request_delay` has passed since the previous call.
    async fn pace(&self) {
        if let Some(last) = self.last_request {
            tokio::time::sleep_until(last + self.request_delay).await;
        }
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
