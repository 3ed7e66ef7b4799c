use chrono::{Local, NaiveDate};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QrCodeValidationError {
    #[error("The ID must not be null")]
    MissingIdentifier,

    #[error("Please provide a valid value")]
    InvalidValue,

    #[error("{0} is required")]
    MissingDate(&'static str),

    #[error("The due date is required and must be after the current date")]
    InvalidDueDate,
}

pub const UPDATED_DATE_FIELD: &str = "Updated date";
pub const EXPIRATION_DATE_FIELD: &str = "Expiration date";

/// Fields of a registration that passed [`validate_core`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedCore<'a> {
    pub id: i64,
    pub value: &'a str,
    pub updated_date: NaiveDate,
    pub expiration_date: NaiveDate,
}

/// Checks the fields every registration needs. The first violated rule wins,
/// in the order identifier, value, updated date, expiration date.
pub fn validate_core<'a>(
    id: Option<i64>,
    value: Option<&'a str>,
    updated_date: Option<NaiveDate>,
    expiration_date: Option<NaiveDate>,
) -> Result<ValidatedCore<'a>, QrCodeValidationError> {
    let Some(id) = id else {
        return Err(QrCodeValidationError::MissingIdentifier);
    };

    let value = match value {
        Some(raw) if parse_amount(raw).is_some_and(|amount| amount > 0.0) => raw,
        _ => return Err(QrCodeValidationError::InvalidValue),
    };

    let Some(updated_date) = updated_date else {
        return Err(QrCodeValidationError::MissingDate(UPDATED_DATE_FIELD));
    };
    let Some(expiration_date) = expiration_date else {
        return Err(QrCodeValidationError::MissingDate(EXPIRATION_DATE_FIELD));
    };

    Ok(ValidatedCore {
        id,
        value,
        updated_date,
        expiration_date,
    })
}

pub fn validate_due_date(due_date: Option<NaiveDate>) -> Result<NaiveDate, QrCodeValidationError> {
    validate_due_date_on(due_date, Local::now().date_naive())
}

/// The due date must fall strictly after `today`.
pub fn validate_due_date_on(
    due_date: Option<NaiveDate>,
    today: NaiveDate,
) -> Result<NaiveDate, QrCodeValidationError> {
    match due_date {
        Some(due_date) if due_date > today => Ok(due_date),
        _ => Err(QrCodeValidationError::InvalidDueDate),
    }
}

/// Accepts plain (`100.00`) and scientific (`1e2`) notation with an optional
/// sign. Blank input, digit separators, `NaN` and infinities yield `None`.
fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}
