//! JSON helpers for string attributes holding JSON documents.

use serde_json::Value;

/// JSON provider backed by `serde_json`.
///
/// Objects are stored with sorted keys, so [`JsonProvider::normalize`] yields
/// a canonical compact form: two documents that differ only in key order or
/// whitespace normalize to the same string.
#[derive(Debug, Clone)]
pub struct JsonProvider;

impl JsonProvider {
    /// Parse JSON to a generic `serde_json::Value`.
    pub fn parse_to_value(json_str: &str) -> serde_json::Result<Value> {
        serde_json::from_str(json_str)
    }

    /// Serialize a `serde_json::Value` to a compact JSON string.
    pub fn stringify_value(value: &Value) -> serde_json::Result<String> {
        serde_json::to_string(value)
    }

    /// Round-trip a JSON document through a generic value.
    pub fn normalize(json_str: &str) -> serde_json::Result<String> {
        let value = Self::parse_to_value(json_str)?;
        Self::stringify_value(&value)
    }

    /// Whether two JSON documents are semantically equal. Invalid documents
    /// are never equivalent to anything.
    pub fn equivalent(a: &str, b: &str) -> bool {
        match (Self::parse_to_value(a), Self::parse_to_value(b)) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}
