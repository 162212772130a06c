use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One scheduled training day for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub user_id: Option<String>,

    /// Day name as stored by the backend
    #[serde(default, deserialize_with = "opt_string")]
    pub day: Option<String>,

    #[serde(default, alias = "routine_name", deserialize_with = "opt_string")]
    pub routine: Option<String>,

    /// Creation time; naive timestamps are read as UTC
    #[serde(default, deserialize_with = "opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Tag {
    /// Parsed day, when the backend value is a known day name
    pub fn training_day(&self) -> Option<super::TrainingDay> {
        self.day.as_deref().and_then(|d| d.parse().ok())
    }
}

/// Onboarding status of the logged-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStatus {
    pub first_login: bool,
}

/// Accept ids the backend sends either as JSON strings or numbers.
/// Any other shape reads as missing.
fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => parse_timestamp(&s),
        _ => None,
    })
}

/// RFC 3339 first, then the offset-less forms the backend emits
fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
