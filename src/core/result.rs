//! Aggregate outcome of a validation run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Field-grouped failure messages produced by the engine.
///
/// A field only appears once it has at least one message, and each field's
/// messages keep the order in which its rules were evaluated. Ordering
/// across fields is unspecified.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: HashMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Fold another result into this one, appending per-field messages.
    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, mut messages) in other.errors {
            self.errors.entry(field).or_default().append(&mut messages);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &HashMap<String, Vec<String>> {
        &self.errors
    }

    pub fn into_errors(self) -> HashMap<String, Vec<String>> {
        self.errors
    }

    /// All messages recorded for `field`, empty if none.
    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First message of some failing field.
    ///
    /// No ordering is guaranteed across fields; inspect [`errors`](Self::errors)
    /// when the choice matters.
    pub fn first_error(&self) -> Option<&str> {
        self.errors
            .values()
            .find_map(|messages| messages.first())
            .map(String::as_str)
    }

    /// First message for `field`, or an empty string.
    pub fn field_error(&self, field: &str) -> &str {
        self.get(field).first().map(String::as_str).unwrap_or("")
    }

    pub fn has_field_error(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    /// Number of fields with at least one message.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message per field, rewritten for end users.
    ///
    /// Required-type failures collapse to `"This field is required"`; other
    /// messages get a capitalised first letter and terminal punctuation.
    pub fn humanized(&self) -> HashMap<String, String> {
        self.errors
            .iter()
            .filter_map(|(field, messages)| {
                messages
                    .first()
                    .map(|message| (field.clone(), humanize(message)))
            })
            .collect()
    }
}

fn humanize(message: &str) -> String {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let lower = trimmed.to_lowercase();
    if lower.starts_with("required") || lower.contains(" required") {
        return "This field is required".to_string();
    }

    let mut chars = trimmed.chars();
    let mut out: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "validation failed with the following errors:")?;
        let mut fields: Vec<_> = self.errors.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        for (field, messages) in fields {
            writeln!(f, "  - field '{}': {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
