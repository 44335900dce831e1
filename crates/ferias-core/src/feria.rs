//! Feria candidates, normalized records, and their identity key.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::day::Day;

/// A feria as matched on the page, before any cleanup.
///
/// Every field is optional: strategies fill in what they can see and leave
/// validation to the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeriaCandidate {
    /// The text the strategy matched against, kept for diagnostics.
    pub raw: String,
    pub barrio: Option<String>,
    pub street: Option<String>,
    pub from_street: Option<String>,
    pub to_street: Option<String>,
    pub day: Option<String>,
    /// Which extraction strategy produced this candidate (`"regex"` or `"structural"`).
    pub strategy: &'static str,
}

/// Which part of a street a feria occupies.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stretch {
    /// The block(s) between two cross streets.
    Range { from: String, to: String },
    /// A single intersection.
    Corner { cross: String },
    /// Only the street name is known.
    Street,
}

/// A validated feria.
///
/// Serialized as `{barrio, street, from, to, day, raw}`. A corner writes its
/// cross street into both `from` and `to`; a street-only feria omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "FeriaRow", try_from = "FeriaRow")]
pub struct FeriaRecord {
    pub barrio: String,
    pub street: String,
    pub stretch: Stretch,
    pub day: Day,
    pub raw: String,
}

/// Case-normalized `(barrio, street, day)` identity used for deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeriaKey {
    barrio: String,
    street: String,
    day: Day,
}

impl FeriaRecord {
    #[must_use]
    pub fn key(&self) -> FeriaKey {
        FeriaKey {
            barrio: self.barrio.to_lowercase(),
            street: self.street.to_lowercase(),
            day: self.day,
        }
    }

    /// Start of the street range; the cross street for a corner.
    #[must_use]
    pub fn from_street(&self) -> Option<&str> {
        match &self.stretch {
            Stretch::Range { from, .. } => Some(from),
            Stretch::Corner { cross } => Some(cross),
            Stretch::Street => None,
        }
    }

    /// End of the street range; the cross street for a corner.
    #[must_use]
    pub fn to_street(&self) -> Option<&str> {
        match &self.stretch {
            Stretch::Range { to, .. } => Some(to),
            Stretch::Corner { cross } => Some(cross),
            Stretch::Street => None,
        }
    }
}

/// Why a candidate could not become a [`FeriaRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing {field} in \"{raw}\"")]
    MissingField { field: &'static str, raw: String },

    #[error("unknown day \"{token}\" in \"{raw}\"")]
    UnknownDay { token: String, raw: String },
}

/// Flat wire shape of a [`FeriaRecord`].
#[derive(Serialize, Deserialize)]
struct FeriaRow {
    barrio: String,
    street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to: Option<String>,
    day: Day,
    #[serde(default)]
    raw: String,
}

impl From<FeriaRecord> for FeriaRow {
    fn from(record: FeriaRecord) -> Self {
        let (from, to) = match record.stretch {
            Stretch::Range { from, to } => (Some(from), Some(to)),
            Stretch::Corner { cross } => (Some(cross.clone()), Some(cross)),
            Stretch::Street => (None, None),
        };
        FeriaRow {
            barrio: record.barrio,
            street: record.street,
            from,
            to,
            day: record.day,
            raw: record.raw,
        }
    }
}

impl TryFrom<FeriaRow> for FeriaRecord {
    type Error = ValidationError;

    fn try_from(row: FeriaRow) -> Result<Self, Self::Error> {
        let stretch = match (row.from, row.to) {
            (Some(from), Some(to)) if from.to_lowercase() == to.to_lowercase() => {
                Stretch::Corner { cross: from }
            }
            (Some(from), Some(to)) => Stretch::Range { from, to },
            (None, None) => Stretch::Street,
            (Some(_), None) => {
                return Err(ValidationError::MissingField {
                    field: "to",
                    raw: row.raw,
                })
            }
            (None, Some(_)) => {
                return Err(ValidationError::MissingField {
                    field: "from",
                    raw: row.raw,
                })
            }
        };
        Ok(FeriaRecord {
            barrio: row.barrio,
            street: row.street,
            stretch,
            day: row.day,
            raw: row.raw,
        })
    }
}
