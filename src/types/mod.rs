//! Request and response shapes of the HTTP API.

pub mod account;
pub mod admin;
pub mod booking;
pub mod payment;

use serde::Deserialize;

use crate::error::HotelError;

/// Integer sent either as a JSON number or as a numeric string (`2` or `"2"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IntInput {
    Number(i64),
    Text(String),
}

impl IntInput {
    pub fn parse(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// `None` when absent or blank, 400 naming `field` when not a whole number.
pub fn int_field(field: &str, value: Option<IntInput>) -> Result<Option<i64>, HotelError> {
    match value {
        None => Ok(None),
        Some(IntInput::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .ok_or_else(|| HotelError::BadRequest(format!("{field} must be a whole number"))),
    }
}

/// Trimmed value, or `None` when absent or blank.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Emails are compared case-insensitively; store them lowercased.
pub fn normalize_email(value: Option<String>) -> Option<String> {
    non_blank(value).map(|v| v.to_lowercase())
}

/// `Required fields missing: a, b` for every `(name, present)` pair that is absent.
pub fn missing_fields_message(fields: &[(&str, bool)]) -> Option<String> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();
    (!missing.is_empty()).then(|| format!("Required fields missing: {}", missing.join(", ")))
}
