//! Validation utilities for account payloads
//!
//! Agronomic inputs are deliberately not range-checked: out-of-domain values
//! fall into the "low" advisory buckets instead of being rejected.

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::{LoginRequest, SignupRequest};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// First failing field of a `validator` error set, in field-name order
fn first_error(errors: &ValidationErrors) -> ValidationError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| ValidationError {
                field: field.to_string(),
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .unwrap_or_else(|| ValidationError {
            field: "request".to_string(),
            message: "invalid request".to_string(),
        })
}

pub fn validate_signup(request: &SignupRequest) -> Result<(), ValidationError> {
    request.validate().map_err(|e| first_error(&e))
}

pub fn validate_login(request: &LoginRequest) -> Result<(), ValidationError> {
    request.validate().map_err(|e| first_error(&e))
}

/// Crop label for image analysis, falling back to the default when blank
pub fn crop_type_or_default(crop_type: Option<&str>) -> String {
    match crop_type.map(str::trim) {
        Some(c) if !c.is_empty() => c.to_string(),
        _ => crate::advisory::DEFAULT_CROP_TYPE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup(username: &str, email: &str, password: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_valid_signup() {
        assert!(validate_signup(&signup("asha", "asha@farm.in", "s3cretpass")).is_ok());
    }

    #[test]
    fn rejects_bad_email() {
        let err = validate_signup(&signup("asha", "not-an-email", "s3cretpass")).unwrap_err();
        assert_eq!(err.field, "email");
        assert_eq!(err.message, "Invalid email format");
    }

    #[test]
    fn rejects_short_password() {
        let err = validate_signup(&signup("asha", "asha@farm.in", "short")).unwrap_err();
        assert_eq!(err.field, "password");
    }

    #[test]
    fn rejects_empty_username() {
        let err = validate_signup(&signup("", "asha@farm.in", "s3cretpass")).unwrap_err();
        assert_eq!(err.field, "username");
    }

    #[test]
    fn login_requires_email_shape() {
        let login = LoginRequest {
            email: "asha".to_string(),
            password: "whatever".to_string(),
        };
        assert_eq!(validate_login(&login).unwrap_err().field, "email");
    }

    #[test]
    fn crop_type_defaults_to_wheat() {
        assert_eq!(crop_type_or_default(None), "Wheat");
        assert_eq!(crop_type_or_default(Some("  ")), "Wheat");
        assert_eq!(crop_type_or_default(Some("Rice")), "Rice");
    }
}
