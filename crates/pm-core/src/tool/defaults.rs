//! Default substitution for sender and message-stream fields
//!
//! Tools declare which of their fields are filled from process-wide
//! configuration when the caller leaves them unset. Rules are plain data
//! so the substitution is testable apart from any tool.

use serde_json::Value as JsonValue;

/// Process-wide default values drawn from configuration
#[derive(Debug, Clone)]
pub struct ToolDefaults {
    /// Default sender address
    pub sender: String,
    /// Default message stream
    pub message_stream: String,
}

/// Which configured value a rule substitutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultSource {
    Sender,
    MessageStream,
}

/// Where a rule substitutes its value
#[derive(Debug, Clone, Copy)]
pub enum DefaultTarget {
    /// A top-level field of the argument object
    Field(&'static str),
    /// A field of every element of a top-level array field
    ArrayField {
        array: &'static str,
        field: &'static str,
    },
}

/// A single substitution rule
#[derive(Debug, Clone, Copy)]
pub struct DefaultRule {
    pub target: DefaultTarget,
    pub source: DefaultSource,
}

impl DefaultRule {
    pub const fn field(name: &'static str, source: DefaultSource) -> Self {
        Self {
            target: DefaultTarget::Field(name),
            source,
        }
    }

    pub const fn array_field(
        array: &'static str,
        field: &'static str,
        source: DefaultSource,
    ) -> Self {
        Self {
            target: DefaultTarget::ArrayField { array, field },
            source,
        }
    }
}

/// Apply substitution rules to validated arguments
///
/// A field is substituted only when it is absent or null; caller-supplied
/// values are never overwritten. Runs after validation, so errors always
/// refer to the caller's own arguments.
pub fn apply_defaults(rules: &[DefaultRule], defaults: &ToolDefaults, args: &mut JsonValue) {
    for rule in rules {
        let value = match rule.source {
            DefaultSource::Sender => &defaults.sender,
            DefaultSource::MessageStream => &defaults.message_stream,
        };

        match rule.target {
            DefaultTarget::Field(name) => {
                fill_field(args, name, value);
            }
            DefaultTarget::ArrayField { array, field } => {
                if let Some(elements) = args.get_mut(array).and_then(|a| a.as_array_mut()) {
                    for element in elements {
                        fill_field(element, field, value);
                    }
                }
            }
        }
    }
}

fn fill_field(object: &mut JsonValue, name: &str, value: &str) {
    if let Some(map) = object.as_object_mut() {
        let unset = map.get(name).is_none_or(|v| v.is_null());
        if unset {
            map.insert(name.to_string(), JsonValue::String(value.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> ToolDefaults {
        ToolDefaults {
            sender: "info@x.com".to_string(),
            message_stream: "outbound".to_string(),
        }
    }

    const SEND_RULES: &[DefaultRule] = &[
        DefaultRule::field("from", DefaultSource::Sender),
        DefaultRule::field("messageStream", DefaultSource::MessageStream),
    ];

    #[test]
    fn test_fills_unset_fields() {
        let mut args = json!({"to": "a@b.com"});
        apply_defaults(SEND_RULES, &defaults(), &mut args);
        assert_eq!(args["from"], "info@x.com");
        assert_eq!(args["messageStream"], "outbound");
    }

    #[test]
    fn test_keeps_caller_values() {
        let mut args = json!({"to": "a@b.com", "from": "me@y.com"});
        apply_defaults(SEND_RULES, &defaults(), &mut args);
        assert_eq!(args["from"], "me@y.com");
        assert_eq!(args["messageStream"], "outbound");
    }

    #[test]
    fn test_null_counts_as_unset() {
        let mut args = json!({"to": "a@b.com", "from": null});
        apply_defaults(SEND_RULES, &defaults(), &mut args);
        assert_eq!(args["from"], "info@x.com");
    }

    #[test]
    fn test_array_field_per_element() {
        let rules = &[
            DefaultRule::array_field("messages", "from", DefaultSource::Sender),
            DefaultRule::array_field("messages", "messageStream", DefaultSource::MessageStream),
        ];
        let mut args = json!({"messages": [
            {"to": "a@b.com"},
            {"to": "c@d.com", "from": "me@y.com"}
        ]});

        apply_defaults(rules, &defaults(), &mut args);

        assert_eq!(args["messages"][0]["from"], "info@x.com");
        assert_eq!(args["messages"][0]["messageStream"], "outbound");
        assert_eq!(args["messages"][1]["from"], "me@y.com");
        assert_eq!(args["messages"][1]["messageStream"], "outbound");
    }

    #[test]
    fn test_no_rules_is_a_no_op() {
        let mut args = json!({"tag": "welcome"});
        apply_defaults(&[], &defaults(), &mut args);
        assert_eq!(args, json!({"tag": "welcome"}));
    }
}
