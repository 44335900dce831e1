use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "FERIAS_ENV"));
}

#[test]
fn build_app_config_defaults_from_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.user_agent, "ferias/0.1 (feria-map)");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.page_delay_ms, 1000);
    assert_eq!(cfg.geocoder_url, "https://nominatim.openstreetmap.org/");
    assert_eq!(cfg.locality, "Montevideo, Uruguay");
    assert_eq!(cfg.geocode_delay_ms, 1000);
    assert_eq!(cfg.geocode_max_retries, 3);
    assert_eq!(cfg.geocode_backoff_base_ms, 1000);
    assert_eq!(cfg.geocode_backoff_multiplier, 2);
    let bounds = cfg.geocode_bounds.expect("default bounds");
    assert!((bounds.south - -34.95).abs() < 1e-9);
    assert!((bounds.east - -56.05).abs() < 1e-9);
}

#[test]
fn geocode_max_retries_override() {
    let mut map = HashMap::new();
    map.insert("FERIAS_GEOCODE_MAX_RETRIES", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.geocode_max_retries, 5);
}

#[test]
fn geocode_max_retries_invalid() {
    let mut map = HashMap::new();
    map.insert("FERIAS_GEOCODE_MAX_RETRIES", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FERIAS_GEOCODE_MAX_RETRIES"),
        "expected InvalidEnvVar(FERIAS_GEOCODE_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn geocode_delay_override() {
    let mut map = HashMap::new();
    map.insert("FERIAS_GEOCODE_DELAY_MS", "250");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.geocode_delay_ms, 250);
}

#[test]
fn backoff_multiplier_zero_is_rejected() {
    let mut map = HashMap::new();
    map.insert("FERIAS_GEOCODE_BACKOFF_MULTIPLIER", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FERIAS_GEOCODE_BACKOFF_MULTIPLIER"),
        "got: {result:?}"
    );
}

#[test]
fn bounds_can_be_disabled() {
    let mut map = HashMap::new();
    map.insert("FERIAS_GEOCODE_BOUNDS", "none");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.geocode_bounds.is_none());
}

#[test]
fn bounds_invalid() {
    let mut map = HashMap::new();
    map.insert("FERIAS_GEOCODE_BOUNDS", "-34.9,north");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FERIAS_GEOCODE_BOUNDS"),
        "got: {result:?}"
    );
}

#[test]
fn empty_locality_is_rejected() {
    let mut map = HashMap::new();
    map.insert("FERIAS_LOCALITY", "  ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FERIAS_LOCALITY"),
        "got: {result:?}"
    );
}

#[test]
fn locality_override() {
    let mut map = HashMap::new();
    map.insert("FERIAS_LOCALITY", "Canelones, Uruguay");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.locality, "Canelones, Uruguay");
}
