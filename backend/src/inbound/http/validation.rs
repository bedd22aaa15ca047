//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every helper produces an `invalid_request` error whose details name the
//! offending body field and a stable machine-readable code.

use serde_json::json;

use crate::domain::{
    Error, LoginValidationError, MealId, MealValidationError, RegistrationValidationError,
    UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    EmptyCaption,
    CaptionTooLong,
    InvalidMealType,
    InvalidMealDate,
    NoChanges,
    InvalidUsername,
    InvalidEmail,
    PasswordTooShort,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidId => "invalid_id",
            Self::EmptyCaption => "empty_caption",
            Self::CaptionTooLong => "caption_too_long",
            Self::InvalidMealType => "invalid_meal_type",
            Self::InvalidMealDate => "invalid_meal_date",
            Self::NoChanges => "no_changes",
            Self::InvalidUsername => "invalid_username",
            Self::InvalidEmail => "invalid_email",
            Self::PasswordTooShort => "password_too_short",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) const MEAL_ID: FieldName = FieldName::new("id");
pub(crate) const CAPTION: FieldName = FieldName::new("caption");
pub(crate) const MEAL_TYPE: FieldName = FieldName::new("mealType");
pub(crate) const MEAL_DATE: FieldName = FieldName::new("mealDate");
pub(crate) const USERNAME: FieldName = FieldName::new("username");
pub(crate) const EMAIL: FieldName = FieldName::new("email");
pub(crate) const PASSWORD: FieldName = FieldName::new("password");

/// Builder for validation errors with field context.
struct ValidationError {
    field: Option<FieldName>,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: Some(field),
            message: message.into(),
        }
    }

    fn unscoped(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        let details = match self.field {
            Some(field) => json!({ "field": field.as_str(), "code": code.as_str() }),
            None => json!({ "code": code.as_str() }),
        };
        Error::invalid_request(self.message).with_details(details)
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field.map(|field| field.as_str()),
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    ValidationError::new(field, format!("missing required field: {}", field.as_str()))
        .with_code(ErrorCode::MissingField)
}

/// Parse a meal id from a path segment.
pub(crate) fn parse_meal_id(value: String) -> Result<MealId, Error> {
    MealId::new(&value).map_err(|err| {
        ValidationError::new(MEAL_ID, err.to_string()).with_value(ErrorCode::InvalidId, value)
    })
}

/// Map meal validation failures to field-scoped errors.
pub(crate) fn map_meal_validation_error(err: MealValidationError) -> Error {
    let message = err.to_string();
    match err {
        MealValidationError::InvalidId(_) => {
            ValidationError::new(MEAL_ID, message).with_code(ErrorCode::InvalidId)
        }
        MealValidationError::EmptyCaption => {
            ValidationError::new(CAPTION, message).with_code(ErrorCode::EmptyCaption)
        }
        MealValidationError::CaptionTooLong { .. } => {
            ValidationError::new(CAPTION, message).with_code(ErrorCode::CaptionTooLong)
        }
        MealValidationError::InvalidMealType { value } => ValidationError::new(MEAL_TYPE, message)
            .with_value(ErrorCode::InvalidMealType, value),
        MealValidationError::InvalidMealDate { value } => ValidationError::new(MEAL_DATE, message)
            .with_value(ErrorCode::InvalidMealDate, value),
        MealValidationError::NoChanges => {
            ValidationError::unscoped(message).with_code(ErrorCode::NoChanges)
        }
    }
}

pub(crate) fn map_registration_validation_error(err: RegistrationValidationError) -> Error {
    let message = err.to_string();
    match err {
        RegistrationValidationError::User(UserValidationError::InvalidEmail) => {
            ValidationError::new(EMAIL, message).with_code(ErrorCode::InvalidEmail)
        }
        RegistrationValidationError::User(_) => {
            ValidationError::new(USERNAME, message).with_code(ErrorCode::InvalidUsername)
        }
        RegistrationValidationError::PasswordTooShort { .. } => {
            ValidationError::new(PASSWORD, message).with_code(ErrorCode::PasswordTooShort)
        }
    }
}

pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => missing_field_error(EMAIL),
        LoginValidationError::EmptyPassword => missing_field_error(PASSWORD),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::Value;

    use super::*;
    use crate::domain::ErrorCode as DomainCode;

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a Value> {
        error.details().and_then(|details| details.get(key))
    }

    #[rstest]
    fn malformed_meal_id_reports_value() {
        let error = parse_meal_id("nope".to_owned()).expect_err("invalid id");

        assert_eq!(error.code(), DomainCode::InvalidRequest);
        assert_eq!(detail(&error, "field"), Some(&Value::from("id")));
        assert_eq!(detail(&error, "code"), Some(&Value::from("invalid_id")));
        assert_eq!(detail(&error, "value"), Some(&Value::from("nope")));
    }

    #[rstest]
    fn valid_meal_id_parses() {
        let id = parse_meal_id("65b000000000000000000001".to_owned()).expect("valid id");
        assert_eq!(id.to_string(), "65b000000000000000000001");
    }

    #[rstest]
    #[case(MealValidationError::EmptyCaption, Some("caption"), "empty_caption")]
    #[case(MealValidationError::CaptionTooLong { max: 500 }, Some("caption"), "caption_too_long")]
    #[case(
        MealValidationError::InvalidMealType { value: "brunch".to_owned() },
        Some("mealType"),
        "invalid_meal_type"
    )]
    #[case(
        MealValidationError::InvalidMealDate { value: "01/02/2024".to_owned() },
        Some("mealDate"),
        "invalid_meal_date"
    )]
    #[case(MealValidationError::NoChanges, None, "no_changes")]
    fn meal_errors_are_field_scoped(
        #[case] err: MealValidationError,
        #[case] field: Option<&str>,
        #[case] code: &str,
    ) {
        let error = map_meal_validation_error(err);

        assert_eq!(error.code(), DomainCode::InvalidRequest);
        assert_eq!(detail(&error, "field").and_then(Value::as_str), field);
        assert_eq!(detail(&error, "code"), Some(&Value::from(code)));
    }

    #[rstest]
    #[case(RegistrationValidationError::User(UserValidationError::InvalidEmail), "email")]
    #[case(RegistrationValidationError::User(UserValidationError::EmptyUsername), "username")]
    #[case(RegistrationValidationError::PasswordTooShort { min: 8 }, "password")]
    fn registration_errors_name_the_field(
        #[case] err: RegistrationValidationError,
        #[case] field: &str,
    ) {
        let error = map_registration_validation_error(err);
        assert_eq!(detail(&error, "field"), Some(&Value::from(field)));
    }

    #[rstest]
    #[case(LoginValidationError::EmptyEmail, "email")]
    #[case(LoginValidationError::EmptyPassword, "password")]
    fn login_errors_are_missing_fields(#[case] err: LoginValidationError, #[case] field: &str) {
        let error = map_login_validation_error(err);
        assert_eq!(detail(&error, "field"), Some(&Value::from(field)));
        assert_eq!(detail(&error, "code"), Some(&Value::from("missing_field")));
    }
}
