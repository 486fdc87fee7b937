//! YAML scalar-fragment normalization
//!
//! Rule names and expressions are authored as free-form text, but the rules
//! engine stores them as scalar nodes in its own YAML representation.
//! Parsing each fragment as a YAML document and requiring a single scalar
//! normalizes quoting and escaping differences (`'HighCPU'`, `"cpu > 0.8"`)
//! so the value round-trips through the engine unchanged.

use serde_yaml::Value;

use crate::error::{Error, Result};

/// Parse a text fragment as a single YAML scalar and return its value.
///
/// Numbers and booleans are rendered back to their textual form; empty
/// fragments and structured documents (sequences, mappings) are errors.
pub fn parse(fragment: &str) -> Result<String> {
    if fragment.trim().is_empty() {
        return Err(Error::EmptyScalar);
    }
    let value: Value = serde_yaml::from_str(fragment)?;
    match value {
        Value::Null => Err(Error::EmptyScalar),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) if s.is_empty() => Err(Error::EmptyScalar),
        Value::String(s) => Ok(s),
        other => Err(Error::NotScalar {
            found: kind_name(&other),
        }),
    }
}

/// Human-readable name for a non-scalar YAML node kind
fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
        _ => "scalar",
    }
}
