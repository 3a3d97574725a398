//! JSON request bodies accepted by the API and their conversion into domain
//! payloads.

use chrono::NaiveTime;
use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod appointment;
pub mod catalog;
pub mod client;
pub mod photo;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("invalid time `{0}`, expected HH:MM")]
    InvalidTime(String),

    #[error("at least one service must be selected")]
    NoServices,
}

/// Parses a time of day given as `HH:MM` (seconds are tolerated).
pub fn parse_time(value: &str) -> Result<NaiveTime, FormError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| FormError::InvalidTime(value.to_string()))
}

/// Treats blank strings as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
