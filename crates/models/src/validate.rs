use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::ModelError;

/// Field-level checks a request shape runs before it reaches storage.
pub trait Validate {
    fn validate(&self) -> Result<(), ModelError>;
}

pub fn required(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::invalid(format!("{field} is required")));
    }
    Ok(())
}

pub fn required_opt(field: &str, value: Option<&str>) -> Result<(), ModelError> {
    match value {
        Some(v) => required(field, v),
        None => Ok(()),
    }
}

/// Stored form of an email address; unique indexes compare this form.
pub fn normalize_email(value: &str) -> String {
    value.trim().to_string()
}

/// Loose address check: one `@`, non-empty local part, dotted domain, no whitespace.
pub fn email(value: &str) -> Result<(), ModelError> {
    let value = value.trim();
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ModelError::invalid(format!("invalid email address '{value}'")));
    }
    Ok(())
}

pub fn non_negative(field: &str, value: f64) -> Result<(), ModelError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::invalid(format!("{field} must be a non-negative number")));
    }
    Ok(())
}

pub fn in_range(field: &str, value: i64, min: i64, max: i64) -> Result<(), ModelError> {
    if value < min || value > max {
        return Err(ModelError::invalid(format!("{field} must be between {min} and {max}")));
    }
    Ok(())
}

pub fn at_least(field: &str, value: i64, min: i64) -> Result<(), ModelError> {
    if value < min {
        return Err(ModelError::invalid(format!("{field} must be at least {min}")));
    }
    Ok(())
}

/// Serialize an update shape into the `$set` map of fields it actually carries.
///
/// Update shapes mark every field `skip_serializing_if = "Option::is_none"`, so absent fields
/// never reach the store.
pub fn changes<T: Serialize>(update: &T) -> Result<Map<String, Value>, ModelError> {
    match serde_json::to_value(update).map_err(|e| ModelError::Serialization(e.to_string()))? {
        Value::Object(map) => Ok(map),
        other => Err(ModelError::Serialization(format!("expected an object, got {other}"))),
    }
}
