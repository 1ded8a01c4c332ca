//! Form validation.
//!
//! Declarative rules live on the DTOs (`validator` derive); the checks that
//! depend on the calendar, on whitespace or on parsing the submitted year are
//! applied here. Nothing in this module touches storage.

use chrono::{Datelike, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::models::{BookDto, UserDto};

/// A single rejected form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a submitted book form, returning every failing field
pub fn validate_book(dto: &BookDto) -> Vec<FieldError> {
    let mut errors = collect(dto.validate());
    reject_blank(&mut errors, "title", dto.title.as_deref(), "Title must not be blank");
    reject_blank(&mut errors, "author", dto.author.as_deref(), "Author must not be blank");
    check_year(&mut errors, "year", "Year", dto.year.as_deref(), 1450);
    sorted(errors)
}

/// Validate a submitted user form, returning every failing field
pub fn validate_user(dto: &UserDto) -> Vec<FieldError> {
    let mut errors = collect(dto.validate());
    reject_blank(
        &mut errors,
        "full_name",
        dto.full_name.as_deref(),
        "Full name must not be blank",
    );
    check_year(
        &mut errors,
        "year_of_birth",
        "Year of birth",
        dto.year_of_birth.as_deref(),
        1900,
    );
    sorted(errors)
}

fn collect(result: Result<(), ValidationErrors>) -> Vec<FieldError> {
    let Err(errors) = result else {
        return Vec::new();
    };

    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                FieldError::new(field.to_string(), message)
            })
        })
        .collect()
}

fn reject_blank(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>, message: &str) {
    if matches!(value, Some(v) if v.trim().is_empty()) {
        errors.push(FieldError::new(field, message));
    }
}

/// A missing year is already reported by the `required` rule
fn check_year(errors: &mut Vec<FieldError>, field: &str, label: &str, value: Option<&str>, min: i32) {
    let Some(value) = value else {
        return;
    };

    match value.trim().parse::<i32>() {
        Err(_) => errors.push(FieldError::new(field, format!("{} must be a number", label))),
        Ok(year) if year < min => {
            errors.push(FieldError::new(field, format!("{} must be {} or later", label, min)))
        }
        Ok(year) if year > Utc::now().year() => {
            errors.push(FieldError::new(field, format!("{} must not be in the future", label)))
        }
        Ok(_) => {}
    }
}

fn sorted(mut errors: Vec<FieldError>) -> Vec<FieldError> {
    errors.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    errors
}
