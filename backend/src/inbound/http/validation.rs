//! Shared validation helpers for inbound HTTP adapters.
//!
//! Messages are part of the public contract; the `details` object adds the
//! offending field and a stable code for clients that want to highlight it.

use serde_json::json;

use crate::domain::{
    AssetFilename, BackgroundId, DecodedPayload, Error, TemplateId, TemplateValidationError,
    UserId, decode_payload,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidId,
    InvalidFilename,
    InvalidEncoding,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidFilename => "invalid_filename",
            ErrorCode::InvalidEncoding => "invalid_encoding",
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

/// Builder for validation errors with field context.
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
}

/// A required field was absent or blank.
pub(crate) fn missing_field_error(field: FieldName, message: &str) -> Error {
    ValidationError::new(field.as_str(), message).with_code(ErrorCode::MissingField)
}

/// Parse a template id from a path or query value.
///
/// Absent, blank, `undefined` and `null` all read as missing.
pub(crate) fn parse_template_id(raw: Option<&str>, field: FieldName) -> Result<TemplateId, Error> {
    let raw = raw.unwrap_or_default();
    TemplateId::new(raw).map_err(|err| match err {
        TemplateValidationError::MissingId => {
            ValidationError::new(field.as_str(), err.to_string()).with_code(ErrorCode::MissingField)
        }
        other => ValidationError::new(field.as_str(), other.to_string())
            .with_value(ErrorCode::InvalidId, raw),
    })
}

pub(crate) fn parse_user_id(raw: &str, field: FieldName) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| {
        ValidationError::new(field.as_str(), "Invalid user ID format")
            .with_value(ErrorCode::InvalidId, raw)
    })
}

pub(crate) fn parse_background_id(raw: &str, field: FieldName) -> Result<BackgroundId, Error> {
    BackgroundId::new(raw).map_err(|err| {
        ValidationError::new(field.as_str(), err.to_string()).with_value(ErrorCode::InvalidId, raw)
    })
}

/// Validate a bare filename; traversal attempts are rejected.
pub(crate) fn parse_filename(raw: &str, field: FieldName) -> Result<AssetFilename, Error> {
    AssetFilename::new(raw).map_err(|err| {
        ValidationError::new(field.as_str(), err.to_string())
            .with_value(ErrorCode::InvalidFilename, raw)
    })
}

/// Optional variant of [`parse_filename`]; blank values count as absent.
pub(crate) fn parse_optional_filename(
    raw: Option<&str>,
    field: FieldName,
) -> Result<Option<AssetFilename>, Error> {
    raw.filter(|value| !value.trim().is_empty())
        .map(|value| parse_filename(value, field))
        .transpose()
}

/// Decode a base64 or data-URL payload.
pub(crate) fn decode_field(raw: &str, field: FieldName) -> Result<DecodedPayload, Error> {
    decode_payload(raw).map_err(|err| {
        ValidationError::new(field.as_str(), err.to_string()).with_code(ErrorCode::InvalidEncoding)
    })
}
