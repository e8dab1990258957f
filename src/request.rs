//! Loosely-typed request attribute handling
//!
//! The orchestrator builds request bodies from shell-flavored configuration,
//! so truth values and numbers arrive in whatever representation the caller
//! had at hand. The adapters here normalize those at the deserialization
//! boundary; the handlers only ever see `bool` and `Option<u32>`.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, Result};

/// Normalize a loosely-typed truth value.
///
/// `1`, `true`, `yes`, `on` and `enabled` (case-insensitive) are true;
/// everything else is false. Fails open, never errors.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on" | "enabled"
    )
}

/// Serde adapter for truthy attributes such as `Mutable` and `<Kind>Exists`.
pub fn truthy<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => parse_bool(&s),
        Some(Value::Number(n)) => parse_bool(&n.to_string()),
        _ => false,
    })
}

/// Serde adapter for numeric attributes that may arrive as strings
/// (`KeyParam`). Unparseable values surface as absent and are caught by the
/// handler's presence check.
pub fn loose_u32<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Presence check for a required request attribute.
///
/// Absent and empty are equivalent; the first missing attribute fails the
/// whole invocation with the command and attribute named in the error text.
pub fn required<'a>(
    command: &'static str,
    attribute: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::MissingParameter { command, attribute }),
    }
}
