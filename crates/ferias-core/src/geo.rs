//! Coordinates and geocoding outcomes attached to feria records.

use serde::{Deserialize, Serialize};

use crate::feria::FeriaRecord;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Rectangular sanity window for geocoder results.
///
/// Parsed from `"south,west,north,east"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south..=self.north).contains(&point.latitude)
            && (self.west..=self.east).contains(&point.longitude)
    }
}

impl std::str::FromStr for BoundingBox {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<f64>().map_err(|e| format!("\"{p}\": {e}")))
            .collect::<Result<Vec<_>, _>>()?;
        let [south, west, north, east] = parts[..] else {
            return Err(format!(
                "expected 4 comma-separated numbers, got {}",
                parts.len()
            ));
        };
        if south > north || west > east {
            return Err("south/west must not exceed north/east".to_owned());
        }
        Ok(Self {
            south,
            west,
            north,
            east,
        })
    }
}

/// How the marker position was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Mean of the two geocoded range endpoints.
    Midpoint,
    /// A single geocoded address (corner or street-only feria).
    Point,
}

/// Terminal reason a record could not be placed on the map.
///
/// Rate limiting is never terminal on its own: once retries run out the
/// address counts as not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeocodeFailure {
    NotFound,
    NetworkError,
}

impl std::fmt::Display for GeocodeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocodeFailure::NotFound => write!(f, "not found"),
            GeocodeFailure::NetworkError => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeocodeStatus {
    Resolved {
        coordinate: Coordinate,
        placement: Placement,
    },
    Failed {
        reason: GeocodeFailure,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedRecord {
    pub record: FeriaRecord,
    pub status: GeocodeStatus,
}

impl GeocodedRecord {
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self.status {
            GeocodeStatus::Resolved { coordinate, .. } => Some(coordinate),
            GeocodeStatus::Failed { .. } => None,
        }
    }

    /// Converts into the map interchange shape; `None` for failed records.
    #[must_use]
    pub fn into_mapped(self) -> Option<MappedFeria> {
        let coordinate = self.coordinate()?;
        Some(MappedFeria {
            record: self.record,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        })
    }
}

/// A resolved feria as consumed by the map renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappedFeria {
    #[serde(flatten)]
    pub record: FeriaRecord,
    pub latitude: f64,
    pub longitude: f64,
}
