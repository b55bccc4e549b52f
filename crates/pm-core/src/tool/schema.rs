//! Declarative input validation
//!
//! Validates raw tool arguments against the JSON-schema subset that tools
//! declare with `json!` literals. Supported keywords:
//!
//! - `type`: "string" | "integer" | "number" | "boolean" | "object" | "array"
//! - `required`: list of field names that must be present and non-null
//! - `properties`: per-field sub-schemas, recursed into when present
//! - `format` on strings: "email" or "date" (YYYY-MM-DD)
//! - `items` and `minItems` on arrays
//! - top-level `oneOf` of `{required: [...]}` branches; exactly one branch
//!   must be satisfied
//!
//! Fields not declared in `properties` are permitted and passed through
//! untouched. Validation happens before default substitution, so error
//! messages always describe the caller's own arguments.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};

/// Validate `args` against `schema`, reporting the first violation
///
/// # Errors
/// Returns `Error::InvalidArgument` carrying the offending field path and
/// the expected constraint.
pub fn validate(schema: &JsonValue, args: &JsonValue) -> Result<()> {
    validate_object(schema, args, "")
}

fn validate_object(schema: &JsonValue, value: &JsonValue, path: &str) -> Result<()> {
    let fields = match value {
        JsonValue::Object(map) => Some(map),
        JsonValue::Null => None,
        _ => {
            return Err(invalid(path, "expected an object"));
        }
    };

    let is_set = |name: &str| {
        fields
            .and_then(|map| map.get(name))
            .is_some_and(|v| !v.is_null())
    };

    if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
        for name in required.iter().filter_map(|n| n.as_str()) {
            if !is_set(name) {
                return Err(invalid(&join(path, name), "required field is missing"));
            }
        }
    }

    if let Some(branches) = schema.get("oneOf").and_then(|o| o.as_array()) {
        let satisfied = branches
            .iter()
            .filter(|branch| {
                branch
                    .get("required")
                    .and_then(|r| r.as_array())
                    .is_some_and(|names| {
                        names.iter().filter_map(|n| n.as_str()).all(|name| is_set(name))
                    })
            })
            .count();
        if satisfied != 1 {
            let names: Vec<&str> = branches
                .iter()
                .filter_map(|b| b.get("required").and_then(|r| r.as_array()))
                .flatten()
                .filter_map(|n| n.as_str())
                .collect();
            return Err(invalid(
                path,
                &format!("exactly one of [{}] must be provided", names.join(", ")),
            ));
        }
    }

    if let (Some(fields), Some(properties)) = (
        fields,
        schema.get("properties").and_then(|p| p.as_object()),
    ) {
        for (name, sub_schema) in properties {
            if let Some(field_value) = fields.get(name).filter(|v| !v.is_null()) {
                validate_value(sub_schema, field_value, &join(path, name))?;
            }
        }
    }

    Ok(())
}

fn validate_value(schema: &JsonValue, value: &JsonValue, path: &str) -> Result<()> {
    let expected_type = schema.get("type").and_then(|t| t.as_str());

    match expected_type {
        Some("string") => {
            let s = value
                .as_str()
                .ok_or_else(|| invalid(path, "expected a string"))?;
            validate_format(schema, s, path)
        }
        Some("integer") => {
            if value.as_i64().is_none() && value.as_u64().is_none() {
                return Err(invalid(path, "expected an integer"));
            }
            Ok(())
        }
        Some("number") => {
            if !value.is_number() {
                return Err(invalid(path, "expected a number"));
            }
            Ok(())
        }
        Some("boolean") => {
            if !value.is_boolean() {
                return Err(invalid(path, "expected a boolean"));
            }
            Ok(())
        }
        Some("object") => validate_object(schema, value, path),
        Some("array") => {
            let items = value
                .as_array()
                .ok_or_else(|| invalid(path, "expected an array"))?;

            if let Some(min) = schema.get("minItems").and_then(|m| m.as_u64()) {
                if (items.len() as u64) < min {
                    return Err(invalid(
                        path,
                        &format!("expected at least {} item(s)", min),
                    ));
                }
            }

            if let Some(item_schema) = schema.get("items") {
                for (index, item) in items.iter().enumerate() {
                    validate_value(item_schema, item, &format!("{}[{}]", path, index))?;
                }
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn validate_format(schema: &JsonValue, value: &str, path: &str) -> Result<()> {
    match schema.get("format").and_then(|f| f.as_str()) {
        Some("email") => {
            if !email_regex().is_match(value) {
                return Err(invalid(path, "expected a valid email address"));
            }
            Ok(())
        }
        Some("date") => {
            if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
                return Err(invalid(path, "expected a YYYY-MM-DD date"));
            }
            Ok(())
        }
        _ => Ok(()),
    }
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
    })
}

fn invalid(path: &str, message: &str) -> Error {
    if path.is_empty() {
        Error::InvalidArgument(message.to_string())
    } else {
        Error::InvalidArgument(format!("{}: {}", path, message))
    }
}

fn join(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", path, name)
    }
}
