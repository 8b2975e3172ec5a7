//! Validation helpers used by the create/update payloads.

use crate::changeset::{ValidationCode, ValidationError, ValidationErrors};
use rust_decimal::Decimal;

pub fn is_url(s: &str) -> bool {
    url::Url::parse(s).is_ok()
}

/// Record an error unless `value` holds between `min` and `max` characters.
pub fn check_len(errors: &mut ValidationErrors, field: &str, value: &str, min: usize, max: usize) {
    let len = value.chars().count();
    if len < min {
        let code = if len == 0 {
            ValidationCode::Required
        } else {
            ValidationCode::Len
        };
        errors.push(ValidationError::new(
            field,
            code,
            format!("must be at least {min} characters"),
        ));
    } else if len > max {
        errors.push(ValidationError::new(
            field,
            ValidationCode::Len,
            format!("must be at most {max} characters"),
        ));
    }
}

pub fn check_url(errors: &mut ValidationErrors, field: &str, value: &str) {
    if !is_url(value) {
        errors.push(ValidationError::new(
            field,
            ValidationCode::Url,
            "must be a valid URL",
        ));
    }
}

pub fn check_min(errors: &mut ValidationErrors, field: &str, value: i32, min: i32) {
    if value < min {
        errors.push(ValidationError::new(
            field,
            ValidationCode::Range,
            format!("must be >= {min}"),
        ));
    }
}

/// Record a `Required` error when a non-nullable update field was sent as `null`.
pub fn check_not_null<T>(errors: &mut ValidationErrors, field: &str, value: &Option<Option<T>>) {
    if matches!(value, Some(None)) {
        errors.push(ValidationError::new(
            field,
            ValidationCode::Required,
            "must not be null",
        ));
    }
}

/// Record an error unless `value` lies in `[min, max]`.
pub fn check_decimal_range(
    errors: &mut ValidationErrors,
    field: &str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) {
    if value < min || value > max {
        errors.push(ValidationError::new(
            field,
            ValidationCode::Range,
            format!("must be between {min} and {max}"),
        ));
    }
}
