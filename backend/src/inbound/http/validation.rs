//! Shared validation helpers for inbound HTTP adapters.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;
use uuid::Uuid;

use crate::domain::{EmailAddress, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidBase64,
    InvalidEmail,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidBase64 => "invalid_base64",
            ErrorCode::InvalidEmail => "invalid_email",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }

    fn with_index(self, code: ErrorCode, index: usize, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "index": index,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

pub(crate) fn invalid_uuid_index_error(field: FieldName, index: usize, value: &str) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("{field} must contain valid UUIDs")).with_index(
        ErrorCode::InvalidUuid,
        index,
        value,
    )
}

/// Parse a UUID-backed identifier, reporting the offending field on failure.
pub(crate) fn parse_id<T: From<Uuid>>(value: &str, field: FieldName) -> Result<T, Error> {
    Uuid::parse_str(value)
        .map(T::from)
        .map_err(|_| invalid_uuid_error(field, value))
}

/// Like [`parse_id`] but for an element of a request array.
pub(crate) fn parse_id_at<T: From<Uuid>>(
    value: &str,
    field: FieldName,
    index: usize,
) -> Result<T, Error> {
    Uuid::parse_str(value)
        .map(T::from)
        .map_err(|_| invalid_uuid_index_error(field, index, value))
}

/// Decode an optional standard-alphabet base64 payload.
pub(crate) fn decode_base64(
    value: Option<&str>,
    field: FieldName,
) -> Result<Option<Vec<u8>>, Error> {
    value
        .map(|encoded| {
            STANDARD.decode(encoded).map_err(|_| {
                let field = field.as_str();
                ValidationError::new(field, format!("{field} must be base64 encoded"))
                    .with_code(ErrorCode::InvalidBase64)
            })
        })
        .transpose()
}

pub(crate) fn encode_base64(bytes: Option<&[u8]>) -> Option<String> {
    bytes.map(|raw| STANDARD.encode(raw))
}

pub(crate) fn parse_email(value: &str, field: FieldName) -> Result<EmailAddress, Error> {
    EmailAddress::new(value).map_err(|error| {
        ValidationError::new(field.as_str(), error.to_string())
            .with_value(ErrorCode::InvalidEmail, value)
    })
}
