//! HTTP client for the Nominatim `/search` endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use ferias_core::Coordinate;

use crate::error::GeocodeError;
use crate::resolver::Geocoder;

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org/";

/// One entry of a Nominatim search response. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

/// Client for a Nominatim-compatible geocoding service.
///
/// Issues one request per call; pacing and retries belong to
/// [`crate::AddressResolver`].
pub struct NominatimClient {
    client: Client,
    base_url: Url,
}

impl NominatimClient {
    /// Creates a client pointed at the public OpenStreetMap Nominatim instance.
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self, GeocodeError> {
        Self::with_base_url(user_agent, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (self-hosted instance, or a
    /// wiremock server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`GeocodeError::Network`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GeocodeError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn with_base_url(
        user_agent: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash so `join("search")` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeocodeError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    fn search_url(&self, query: &str) -> Result<Url, GeocodeError> {
        let mut url = self
            .base_url
            .join("search")
            .map_err(|e| GeocodeError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "jsonv2")
            .append_pair("limit", "1");
        Ok(url)
    }

    /// Looks up `query` and returns the best match.
    ///
    /// # Errors
    ///
    /// - [`GeocodeError::NotFound`] when the service returns no results.
    /// - [`GeocodeError::RateLimited`] on HTTP 429.
    /// - [`GeocodeError::Status`] on any other non-2xx status.
    /// - [`GeocodeError::Network`] on network or TLS failure.
    /// - [`GeocodeError::Deserialize`] if the body or a coordinate is malformed.
    pub async fn search(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        let url = self.search_url(query)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited {
                query: query.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(GeocodeError::Status {
                status: status.as_u16(),
                query: query.to_owned(),
            });
        }

        let body = response.text().await?;
        let places: Vec<Place> =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Deserialize {
                context: format!("search(q={query})"),
                source: e,
            })?;

        let Some(place) = places.into_iter().next() else {
            return Err(GeocodeError::NotFound {
                query: query.to_owned(),
            });
        };

        let coordinate = Coordinate::new(
            parse_degrees(&place.lat, query)?,
            parse_degrees(&place.lon, query)?,
        );
        tracing::debug!(
            query,
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            display_name = %place.display_name,
            "geocoded"
        );
        Ok(coordinate)
    }
}

fn parse_degrees(raw: &str, query: &str) -> Result<f64, GeocodeError> {
    serde_json::from_str::<f64>(raw.trim()).map_err(|e| GeocodeError::Deserialize {
        context: format!("coordinate \"{raw}\" for {query}"),
        source: e,
    })
}

impl Geocoder for NominatimClient {
    async fn geocode(&self, query: &str) -> Result<Coordinate, GeocodeError> {
        self.search(query).await
    }
}
