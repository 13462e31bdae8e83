//! Input rules applied to raw form values before any record is created or changed.
//!
//! Every function here is pure. [`Repository`](crate::Repository) runs the same checks
//! itself, so callers that skip them still cannot persist bad records.

use thiserror::Error;

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    EmptyName,
    #[error("Name must be at least {} characters", MIN_NAME_LEN)]
    NameTooShort,
    #[error("Name must not exceed {} characters", MAX_NAME_LEN)]
    NameTooLong,
    #[error("Please enter a valid day (1-31)")]
    InvalidDay,
    #[error("Please select a valid month")]
    InvalidMonth,
}

/// Fields that passed validation, ready to be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidFields<'a> {
    /// Trimmed, not yet escaped.
    pub name: &'a str,
    pub day: u8,
    pub month: u8,
}

/// Check a raw name and return it trimmed. Length is counted in characters.
pub fn validate_name(raw: &str) -> Result<&str, ValidationError> {
    let name = raw.trim();
    let len = name.chars().count();

    if len == 0 {
        Err(ValidationError::EmptyName)
    } else if len < MIN_NAME_LEN {
        Err(ValidationError::NameTooShort)
    } else if len > MAX_NAME_LEN {
        Err(ValidationError::NameTooLong)
    } else {
        Ok(name)
    }
}

/// Days are not checked against the month's length, so `31` is accepted for February.
pub fn validate_day(raw: &str) -> Result<u8, ValidationError> {
    parse_in_range(raw, 1, 31).ok_or(ValidationError::InvalidDay)
}

pub fn validate_month(raw: &str) -> Result<u8, ValidationError> {
    parse_in_range(raw, 1, 12).ok_or(ValidationError::InvalidMonth)
}

/// Validate all three fields in form order, stopping at the first failure.
pub fn validate<'a>(
    name: &'a str,
    day: &str,
    month: &str,
) -> Result<ValidFields<'a>, ValidationError> {
    Ok(ValidFields {
        name: validate_name(name)?,
        day: validate_day(day)?,
        month: validate_month(month)?,
    })
}

pub(crate) fn is_valid_day(day: u8) -> bool {
    (1..=31).contains(&day)
}

pub(crate) fn is_valid_month(month: u8) -> bool {
    (1..=12).contains(&month)
}

fn parse_in_range(raw: &str, min: u8, max: u8) -> Option<u8> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|n| (min..=max).contains(n))
}
