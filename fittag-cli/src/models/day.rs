use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A day of the week a tag can be scheduled on.
///
/// Serialized with the names the backend stores (`"Lunes"` .. `"Domingo"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingDay {
    #[serde(rename = "Lunes")]
    Monday,
    #[serde(rename = "Martes")]
    Tuesday,
    #[serde(rename = "Miercoles")]
    Wednesday,
    #[serde(rename = "Jueves")]
    Thursday,
    #[serde(rename = "Viernes")]
    Friday,
    #[serde(rename = "Sábado")]
    Saturday,
    #[serde(rename = "Domingo")]
    Sunday,
}

impl TrainingDay {
    /// All days, Monday first
    pub const ALL: [TrainingDay; 7] = [
        TrainingDay::Monday,
        TrainingDay::Tuesday,
        TrainingDay::Wednesday,
        TrainingDay::Thursday,
        TrainingDay::Friday,
        TrainingDay::Saturday,
        TrainingDay::Sunday,
    ];

    /// Name used on the wire and shown in the day list
    pub fn wire_name(&self) -> &'static str {
        match self {
            TrainingDay::Monday => "Lunes",
            TrainingDay::Tuesday => "Martes",
            TrainingDay::Wednesday => "Miercoles",
            TrainingDay::Thursday => "Jueves",
            TrainingDay::Friday => "Viernes",
            TrainingDay::Saturday => "Sábado",
            TrainingDay::Sunday => "Domingo",
        }
    }

    /// Position in the week (0 = Monday)
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|d| d == self).unwrap_or(0)
    }

    /// Day at the given position, if in range
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.index() + 1) % 7]
    }

    pub fn prev(&self) -> Self {
        Self::ALL[(self.index() + 6) % 7]
    }
}

impl fmt::Display for TrainingDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Error returned when a day name is not recognized
#[derive(Debug, thiserror::Error)]
#[error("Unknown day '{0}' (expected e.g. monday, mon, lunes)")]
pub struct ParseDayError(String);

impl FromStr for TrainingDay {
    type Err = ParseDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = crate::models::routine::fold_accents(&s.trim().to_lowercase());

        let day = match normalized.as_str() {
            "monday" | "mon" | "lunes" | "lun" => TrainingDay::Monday,
            "tuesday" | "tue" | "martes" | "mar" => TrainingDay::Tuesday,
            "wednesday" | "wed" | "miercoles" | "mie" => TrainingDay::Wednesday,
            "thursday" | "thu" | "jueves" | "jue" => TrainingDay::Thursday,
            "friday" | "fri" | "viernes" | "vie" => TrainingDay::Friday,
            "saturday" | "sat" | "sabado" | "sab" => TrainingDay::Saturday,
            "sunday" | "sun" | "domingo" | "dom" => TrainingDay::Sunday,
            _ => return Err(ParseDayError(s.to_string())),
        };

        Ok(day)
    }
}
