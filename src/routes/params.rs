use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// `from` / `to` query parameters as sent by the client, still unparsed.
#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

/// Parses an optional RFC 3339 bound. An empty value counts as absent.
pub fn parse_bound(raw: Option<&str>, name: &str) -> AppResult<Option<DateTime<Utc>>> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s, name).map(Some),
    }
}

/// Parses an RFC 3339 timestamp into UTC.
pub fn parse_date(raw: &str, name: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|_| AppError::BadRequest(format!("Invalid '{}' date format", name)))
}

pub fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse::<i64>().map_err(|_| AppError::BadRequest("Invalid ID".to_string()))
}
