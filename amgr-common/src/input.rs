//! Form-tolerant request values
//!
//! The browser frontend submits every input as it appears in the form: empty
//! strings for blank fields, numbers as strings from `<select>` elements, and
//! dates either as `YYYY-MM-DD` or as the full timestamp it received from a
//! previous list call. Request bodies are therefore captured as [`FormValue`]
//! and converted to typed values here, with conversion failures reported as
//! [`Error::Validation`].

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A scalar as submitted by an HTML form or a JSON client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Integer(i64),
    Decimal(f64),
    Text(String),
    Flag(bool),
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<i64> for FormValue {
    fn from(value: i64) -> Self {
        FormValue::Integer(value)
    }
}

impl From<f64> for FormValue {
    fn from(value: f64) -> Self {
        FormValue::Decimal(value)
    }
}

/// Trimmed text, `None` for absent, empty or whitespace-only values
pub fn text(value: &Option<FormValue>) -> Option<String> {
    match value {
        Some(FormValue::Text(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(FormValue::Integer(n)) => Some(n.to_string()),
        Some(FormValue::Decimal(n)) => Some(n.to_string()),
        Some(FormValue::Flag(_)) | None => None,
    }
}

/// Optional integer; accepts numbers and numeric strings
pub fn integer(field: &str, value: &Option<FormValue>) -> Result<Option<i64>> {
    let malformed = || Error::Validation(format!("{} must be an integer", field));

    match value {
        None => Ok(None),
        Some(FormValue::Integer(n)) => Ok(Some(*n)),
        Some(FormValue::Decimal(n)) => {
            if n.fract() == 0.0 && n.is_finite() && n.abs() < i64::MAX as f64 {
                Ok(Some(*n as i64))
            } else {
                Err(malformed())
            }
        }
        Some(FormValue::Text(s)) => match s.trim() {
            "" => Ok(None),
            trimmed => trimmed.parse::<i64>().map(Some).map_err(|_| malformed()),
        },
        Some(FormValue::Flag(_)) => Err(malformed()),
    }
}

/// Optional decimal; accepts numbers and numeric strings
pub fn decimal(field: &str, value: &Option<FormValue>) -> Result<Option<f64>> {
    let malformed = || Error::Validation(format!("{} must be a number", field));

    let parsed = match value {
        None => None,
        Some(FormValue::Integer(n)) => Some(*n as f64),
        Some(FormValue::Decimal(n)) => Some(*n),
        Some(FormValue::Text(s)) => match s.trim() {
            "" => None,
            trimmed => Some(trimmed.parse::<f64>().map_err(|_| malformed())?),
        },
        Some(FormValue::Flag(_)) => return Err(malformed()),
    };

    match parsed {
        Some(n) if !n.is_finite() => Err(malformed()),
        other => Ok(other),
    }
}

/// Optional calendar date
///
/// Accepts `YYYY-MM-DD`, or an ISO-8601 timestamp whose date part is used.
pub fn date(field: &str, value: &Option<FormValue>) -> Result<Option<NaiveDate>> {
    let malformed = || Error::Validation(format!("{} must be a date (YYYY-MM-DD)", field));

    match value {
        None => Ok(None),
        Some(FormValue::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            let date_part = match trimmed.split_once('T') {
                Some((day, _)) => day,
                None => trimmed,
            };
            NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| malformed())
        }
        Some(_) => Err(malformed()),
    }
}

/// Positive entity identity (foreign keys and path ids)
pub fn identity(field: &str, value: &Option<FormValue>) -> Result<Option<i64>> {
    match integer(field, value)? {
        Some(id) if id <= 0 => Err(Error::Validation(format!(
            "{} must be a positive integer",
            field
        ))),
        other => Ok(other),
    }
}
