//! Shared validation helpers for inbound HTTP adapters.
//!
//! Complaint bodies follow truthy-merge semantics: `null`, `false`, `0` and
//! the empty string all count as "not provided".

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::{Map, Value, json};

use crate::domain::{ComplaintId, ComplaintValidationError, Error};

const NOT_FOUND: &str = "Complaint not found";

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidBody,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
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

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &Value) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!(
        "{field} must be an RFC 3339 timestamp, a YYYY-MM-DD date or epoch milliseconds"
    ))
    .with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidTimestamp.as_str(),
    }))
}

pub(crate) fn map_complaint_validation_error(err: ComplaintValidationError) -> Error {
    Error::invalid_field(err.field(), err.code(), err.to_string())
}

/// Path ids that are not UUIDs name no complaint.
pub(crate) fn parse_complaint_id(raw: &str) -> Result<ComplaintId, Error> {
    ComplaintId::new(raw).map_err(|_| Error::not_found(NOT_FOUND))
}

/// Require a JSON object body.
pub(crate) fn body_object(body: &Value) -> Result<&Map<String, Value>, Error> {
    body.as_object().ok_or_else(|| {
        Error::invalid_request("request body must be a JSON object")
            .with_details(json!({ "code": ErrorCode::InvalidBody.as_str() }))
    })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text of a provided field; numbers and `true` are rendered as text.
pub(crate) fn truthy_text(body: &Map<String, Value>, field: FieldName) -> Option<String> {
    let value = body.get(field.as_str()).filter(|value| is_truthy(value))?;
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(_) | Value::Bool(_) => Some(value.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn parse_timestamp_text(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parse a provided schedule; falsy values mean "not provided".
pub(crate) fn truthy_timestamp(
    body: &Map<String, Value>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    let Some(value) = body.get(field.as_str()).filter(|value| is_truthy(value)) else {
        return Ok(None);
    };
    let parsed = match value {
        Value::String(raw) => parse_timestamp_text(raw.trim()),
        Value::Number(number) => number
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    };
    parsed
        .map(Some)
        .ok_or_else(|| invalid_timestamp_error(field, value))
}
