use crate::app_config::{AppConfig, Environment};
use crate::geo::BoundingBox;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a working
/// configuration pointed at the public Nominatim instance.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("FERIAS_ENV", "development"))?;
    let log_level = or_default("FERIAS_LOG_LEVEL", "info");
    let user_agent = or_default("FERIAS_USER_AGENT", "ferias/0.1 (feria-map)");
    let request_timeout_secs = parse_u64("FERIAS_REQUEST_TIMEOUT_SECS", "30")?;
    let page_delay_ms = parse_u64("FERIAS_PAGE_DELAY_MS", "1000")?;

    let geocoder_url = or_default(
        "FERIAS_GEOCODER_URL",
        "https://nominatim.openstreetmap.org/",
    );
    let locality = or_default("FERIAS_LOCALITY", "Montevideo, Uruguay");
    if locality.trim().is_empty() {
        return Err(invalid("FERIAS_LOCALITY", "must not be empty".to_owned()));
    }
    let geocode_delay_ms = parse_u64("FERIAS_GEOCODE_DELAY_MS", "1000")?;
    let geocode_max_retries = parse_u32("FERIAS_GEOCODE_MAX_RETRIES", "3")?;
    let geocode_backoff_base_ms = parse_u64("FERIAS_GEOCODE_BACKOFF_BASE_MS", "1000")?;
    let geocode_backoff_multiplier = parse_u32("FERIAS_GEOCODE_BACKOFF_MULTIPLIER", "2")?;
    if geocode_backoff_multiplier == 0 {
        return Err(invalid(
            "FERIAS_GEOCODE_BACKOFF_MULTIPLIER",
            "must be at least 1".to_owned(),
        ));
    }

    let bounds_raw = or_default("FERIAS_GEOCODE_BOUNDS", "-34.95,-56.25,-34.85,-56.05");
    let geocode_bounds = if bounds_raw.trim().eq_ignore_ascii_case("none") {
        None
    } else {
        Some(
            bounds_raw
                .parse::<BoundingBox>()
                .map_err(|reason| invalid("FERIAS_GEOCODE_BOUNDS", reason))?,
        )
    };

    Ok(AppConfig {
        env,
        log_level,
        user_agent,
        request_timeout_secs,
        page_delay_ms,
        geocoder_url,
        locality,
        geocode_delay_ms,
        geocode_max_retries,
        geocode_backoff_base_ms,
        geocode_backoff_multiplier,
        geocode_bounds,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FERIAS_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
