use crate::geo::BoundingBox;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    /// Pause between consecutive page fetches.
    pub page_delay_ms: u64,
    pub geocoder_url: String,
    /// Qualifier appended to every geocoding query, e.g. `"Montevideo, Uruguay"`.
    pub locality: String,
    /// Minimum spacing between consecutive geocoder requests.
    pub geocode_delay_ms: u64,
    pub geocode_max_retries: u32,
    pub geocode_backoff_base_ms: u64,
    pub geocode_backoff_multiplier: u32,
    /// Results outside this window are treated as not found. `None` disables the check.
    pub geocode_bounds: Option<BoundingBox>,
}
