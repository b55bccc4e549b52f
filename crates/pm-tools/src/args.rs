//! Accessors for validated tool arguments
//!
//! Inputs reaching these helpers have passed schema validation and
//! default substitution, so a missing required field here indicates a
//! schema/mapping mismatch, reported as an invalid-argument error rather
//! than a panic.

use pm_core::Error;
use serde_json::Value as JsonValue;

pub(crate) fn required_str(input: &JsonValue, name: &str) -> pm_core::Result<String> {
    input[name]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| Error::InvalidArgument(format!("Missing '{}' parameter", name)))
}

pub(crate) fn optional_str(input: &JsonValue, name: &str) -> Option<String> {
    input[name].as_str().map(str::to_string)
}

pub(crate) fn required_i64(input: &JsonValue, name: &str) -> pm_core::Result<i64> {
    input[name]
        .as_i64()
        .ok_or_else(|| Error::InvalidArgument(format!("Missing '{}' parameter", name)))
}

pub(crate) fn optional_i64(input: &JsonValue, name: &str) -> Option<i64> {
    input[name].as_i64()
}
