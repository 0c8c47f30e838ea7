//! Failure message selection and templating.
//!
//! Resolution order, first match wins:
//!
//! 1. custom message keyed by `"{rule}.{field}"` (`"required.email"`)
//! 2. custom message keyed by the rule name (`"required"`)
//! 3. the built-in default for the rule
//! 4. `"The :attribute field is invalid"`
//!
//! The chosen template then has `:attribute`, `:field` and `:param0..N`
//! substituted. A resolver holds per-request overrides, so callers that
//! share an engine clone it before customizing; the default table is
//! immutable and shared between clones.
//!
//! # Example
//!
//! ```rust
//! use ruleline::message::MessageResolver;
//!
//! let mut resolver = MessageResolver::new();
//! resolver.set_custom_message("required", "X :attribute");
//! resolver.set_custom_message("required.email", "Y");
//!
//! assert_eq!(resolver.resolve("required", "email", &[]), "Y");
//! assert_eq!(resolver.resolve("required", "name", &[]), "X name");
//! ```

mod defaults;
mod template;

pub use defaults::{default_messages, FALLBACK_MESSAGE};
pub(crate) use defaults::default_template;
pub(crate) use template::{render, Placeholders};

use std::collections::HashMap;
use std::sync::Arc;

/// Three-tier message lookup with placeholder substitution.
#[derive(Clone, Debug)]
pub struct MessageResolver {
    custom_messages: HashMap<String, String>,
    custom_attributes: HashMap<String, String>,
    default_messages: Arc<HashMap<String, String>>,
}

impl MessageResolver {
    /// Resolver backed by the built-in message table.
    pub fn new() -> Self {
        Self::with_defaults(default_messages())
    }

    /// Resolver backed by a caller-supplied default table.
    pub fn with_defaults(defaults: HashMap<String, String>) -> Self {
        Self {
            custom_messages: HashMap::new(),
            custom_attributes: HashMap::new(),
            default_messages: Arc::new(defaults),
        }
    }

    /// Render the failure message for `rule` on `field`.
    pub fn resolve(&self, rule: &str, field: &str, params: &[String]) -> String {
        let template = self.template(rule, field);
        render(
            template,
            &Placeholders {
                attribute: self.display_name(field),
                field,
                params,
            },
        )
    }

    fn template(&self, rule: &str, field: &str) -> &str {
        if let Some(message) = self.custom_messages.get(&format!("{rule}.{field}")) {
            return message;
        }
        if let Some(message) = self.custom_messages.get(rule) {
            return message;
        }
        self.default_messages
            .get(rule)
            .map(String::as_str)
            .unwrap_or(FALLBACK_MESSAGE)
    }

    /// Override the message for a rule (`"min"`) or a rule on one field
    /// (`"min.age"`).
    pub fn set_custom_message(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.custom_messages.insert(key.into(), message.into());
    }

    /// Set the display name substituted for `:attribute` on `field`.
    pub fn set_custom_attribute(&mut self, field: impl Into<String>, name: impl Into<String>) {
        self.custom_attributes.insert(field.into(), name.into());
    }

    /// Display name for `field`, falling back to the field itself.
    pub fn display_name<'a>(&'a self, field: &'a str) -> &'a str {
        self.custom_attributes
            .get(field)
            .map(String::as_str)
            .unwrap_or(field)
    }

    pub fn custom_messages(&self) -> &HashMap<String, String> {
        &self.custom_messages
    }

    pub fn custom_attributes(&self) -> &HashMap<String, String> {
        &self.custom_attributes
    }

    pub fn default_message(&self, rule: &str) -> Option<&str> {
        self.default_messages.get(rule).map(String::as_str)
    }
}

impl Default for MessageResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn default_message_with_params() {
        let resolver = MessageResolver::new();

        assert_eq!(
            resolver.resolve("between", "age", &params(&["18", "65"])),
            "The age must be between 18 and 65"
        );
    }

    #[test]
    fn rule_message_overrides_default() {
        let mut resolver = MessageResolver::new();
        resolver.set_custom_message("between", ":attribute must be in [:param0, :param1]");

        assert_eq!(
            resolver.resolve("between", "age", &params(&["18", "65"])),
            "age must be in [18, 65]"
        );
    }

    #[test]
    fn override_cascade() {
        let mut resolver = MessageResolver::new();
        resolver.set_custom_message("required", "X :attribute");
        resolver.set_custom_message("required.email", "Y");

        assert_eq!(resolver.resolve("required", "email", &[]), "Y");
        assert_eq!(resolver.resolve("required", "name", &[]), "X name");

        resolver.set_custom_attribute("name", "Full Name");
        assert_eq!(resolver.resolve("required", "name", &[]), "X Full Name");
    }

    #[test]
    fn field_specific_message_applies_without_rule_override() {
        let mut resolver = MessageResolver::new();
        resolver.set_custom_message("required.email", "Email is required");

        assert_eq!(resolver.resolve("required", "email", &[]), "Email is required");
        assert_eq!(
            resolver.resolve("required", "name", &[]),
            "The name field is required"
        );
    }

    #[test]
    fn custom_attribute_and_field_placeholders() {
        let mut resolver = MessageResolver::new();
        resolver.set_custom_attribute("username", "User Name");
        resolver.set_custom_message("alpha", ":attribute (:field) letters only");

        assert_eq!(
            resolver.resolve("required", "username", &[]),
            "The User Name field is required"
        );
        assert_eq!(
            resolver.resolve("alpha", "username", &[]),
            "User Name (username) letters only"
        );
    }

    #[test]
    fn unknown_rule_uses_fallback() {
        let resolver = MessageResolver::new();

        assert_eq!(
            resolver.resolve("no_such_rule", "x", &params(&["p"])),
            "The x field is invalid"
        );
    }

    #[test]
    fn parameters_are_not_re_expanded() {
        let resolver = MessageResolver::new();

        assert_eq!(
            resolver.resolve("min", "code", &params(&[":attribute"])),
            "The code must be at least :attribute"
        );
    }

    #[test]
    fn clone_is_isolated() {
        let mut original = MessageResolver::new();
        original.set_custom_message("alpha", ":attribute alpha");
        original.set_custom_attribute("field", "Field");

        let mut clone = original.clone();
        clone.set_custom_message("alpha", ":attribute clone alpha");
        clone.set_custom_attribute("field", "Clone Field");
        clone.set_custom_message("required", "changed");

        assert_eq!(original.resolve("alpha", "field", &[]), "Field alpha");
        assert_eq!(clone.resolve("alpha", "field", &[]), "Clone Field clone alpha");
        assert_eq!(
            original.resolve("required", "field", &[]),
            "The Field field is required"
        );
    }

    #[test]
    fn clones_share_default_table() {
        let original = MessageResolver::new();
        let clone = original.clone();

        assert!(Arc::ptr_eq(&original.default_messages, &clone.default_messages));
    }
}
