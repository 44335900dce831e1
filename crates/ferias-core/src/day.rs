//! Weekday enumeration used by feria schedules and the map legend.

use serde::{Deserialize, Serialize};

/// Day of the week on which a feria sets up.
///
/// Serialized with its Spanish name, diacritics included (`"Miércoles"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Day {
    Lunes,
    Martes,
    #[serde(rename = "Miércoles")]
    Miercoles,
    Jueves,
    Viernes,
    #[serde(rename = "Sábado")]
    Sabado,
    Domingo,
}

impl Day {
    /// All days in calendar order, Monday first.
    pub const ALL: [Day; 7] = [
        Day::Lunes,
        Day::Martes,
        Day::Miercoles,
        Day::Jueves,
        Day::Viernes,
        Day::Sabado,
        Day::Domingo,
    ];

    /// Matches a day token case-insensitively.
    ///
    /// Accented and unaccented spellings are both accepted (`"miércoles"`,
    /// `"MIERCOLES"`); anything else returns `None`.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "lunes" => Some(Day::Lunes),
            "martes" => Some(Day::Martes),
            "miércoles" | "miercoles" => Some(Day::Miercoles),
            "jueves" => Some(Day::Jueves),
            "viernes" => Some(Day::Viernes),
            "sábado" | "sabado" => Some(Day::Sabado),
            "domingo" => Some(Day::Domingo),
            _ => None,
        }
    }

    /// Canonical Spanish name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Lunes => "Lunes",
            Day::Martes => "Martes",
            Day::Miercoles => "Miércoles",
            Day::Jueves => "Jueves",
            Day::Viernes => "Viernes",
            Day::Sabado => "Sábado",
            Day::Domingo => "Domingo",
        }
    }

    /// Marker color the map renderer uses for this day.
    ///
    /// Values are CSS color keywords so they can be handed to the map
    /// template untouched.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Day::Lunes => "blue",
            Day::Martes => "green",
            Day::Miercoles => "purple",
            Day::Jueves => "orange",
            Day::Viernes => "darkred",
            Day::Sabado => "red",
            Day::Domingo => "cadetblue",
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
