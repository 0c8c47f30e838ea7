//! Context provided to a single rule invocation.

use serde_json::{Map, Value};
use std::collections::HashMap;

static NULL: Value = Value::Null;

/// Read-only bundle handed to [`Rule::validate`](crate::core::Rule::validate).
///
/// Everything is borrowed from the engine for the duration of one rule call,
/// so a rule cannot mutate the input it is checking.
#[derive(Clone, Copy, Debug)]
pub struct ValidationContext<'a> {
    field: &'a str,
    value: &'a Value,
    parameters: &'a [String],
    data: &'a Map<String, Value>,
    attributes: Option<&'a HashMap<String, String>>,
}

impl<'a> ValidationContext<'a> {
    /// Build a context for `field`, reading its value out of `data`.
    ///
    /// Absent fields are presented as `Value::Null`; use
    /// [`is_present`](Self::is_present) to tell the two apart.
    pub fn new(field: &'a str, parameters: &'a [String], data: &'a Map<String, Value>) -> Self {
        Self {
            field,
            value: data.get(field).unwrap_or(&NULL),
            parameters,
            data,
            attributes: None,
        }
    }

    /// Attach the display names configured on the message resolver.
    pub fn with_attributes(mut self, attributes: &'a HashMap<String, String>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn field(&self) -> &'a str {
        self.field
    }

    pub fn value(&self) -> &'a Value {
        self.value
    }

    pub fn parameters(&self) -> &'a [String] {
        self.parameters
    }

    /// Snapshot of every field under validation, for cross-field rules.
    pub fn data(&self) -> &'a Map<String, Value> {
        self.data
    }

    /// Look up another field's value; absent fields read as `Value::Null`.
    pub fn other(&self, field: &str) -> &'a Value {
        self.data.get(field).unwrap_or(&NULL)
    }

    /// Whether the field being validated exists in the input at all.
    pub fn is_present(&self) -> bool {
        self.data.contains_key(self.field)
    }

    /// Display name for `field`: the custom attribute if one is set,
    /// otherwise the raw field name.
    pub fn attribute(&self, field: &str) -> String {
        self.attributes
            .and_then(|attrs| attrs.get(field))
            .cloned()
            .unwrap_or_else(|| field.to_string())
    }
}
