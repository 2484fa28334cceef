//! Lookup-and-narrow helpers for untyped request documents.
//!
//! Resource payloads arrive as loosely-typed trees. Every step here is total:
//! a lookup yields `Option`, and narrowing a node to a scalar falls back to the
//! zero value of the wanted type, the same way protobuf `Struct` getters do.

use serde_json::{Map, Value};

/// Presence-checked navigation over an untyped document node.
pub trait Lookup {
    /// Returns the child under `name` if this node is a mapping holding that key.
    ///
    /// A key explicitly set to `null` is present.
    fn field(&self, name: &str) -> Option<&Value>;

    /// Narrows this node to a mapping.
    fn fields(&self) -> Option<&Map<String, Value>>;
}

impl Lookup for Value {
    fn field(&self, name: &str) -> Option<&Value> {
        self.fields().and_then(|map| map.get(name))
    }

    fn fields(&self) -> Option<&Map<String, Value>> {
        self.as_object()
    }
}

/// Narrows to a string; any other kind becomes `""`.
pub fn string_or_empty(value: &Value) -> String {
    value.as_str().map(str::to_string).unwrap_or_default()
}

/// Narrows to a number; any other kind becomes `0.0`.
pub fn number_or_zero(value: &Value) -> f64 {
    value.as_f64().unwrap_or(0.0)
}

/// Narrows to a mapping; any other kind becomes an empty mapping.
pub fn fields_or_empty(value: &Value) -> Map<String, Value> {
    value.fields().cloned().unwrap_or_default()
}
