pub mod app_config;
pub mod config;
pub mod day;
pub mod feria;
pub mod geo;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use day::Day;
pub use feria::{FeriaCandidate, FeriaKey, FeriaRecord, Stretch, ValidationError};
pub use geo::{
    BoundingBox, Coordinate, GeocodeFailure, GeocodeStatus, GeocodedRecord, MappedFeria,
    Placement,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
