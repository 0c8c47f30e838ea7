//! Builder API for configuring a [`Validator`].

use crate::core::RuleConstructor;
use crate::engine::Engine;
use crate::facade::{Validator, ValidatorConfig};
use crate::registry::{PasswordVerifier, PresenceVerifier, RegistryBuilder, Verifiers};
use std::sync::Arc;

/// Builder for creating a [`Validator`].
///
/// Registry options are applied once, when [`build`](Self::build) assembles
/// the rule table; messages and attributes seed the validator's resolver.
///
/// ```rust
/// use ruleline::facade::Validator;
/// use serde_json::json;
/// use std::collections::HashMap;
///
/// let validator = Validator::builder()
///     .exclude(["url"])
///     .message("required", ":attribute is missing")
///     .attribute("dob", "Date of birth")
///     .build();
///
/// let rules = HashMap::from([("dob".to_string(), "required".to_string())]);
/// let errors = validator.validate_with_result(&json!({}), &rules).unwrap();
///
/// assert_eq!(errors.field_error("dob"), "Date of birth is missing");
/// assert!(!validator.has_rule("url"));
/// ```
pub struct ValidatorBuilder {
    registry: RegistryBuilder,
    messages: Vec<(String, String)>,
    attributes: Vec<(String, String)>,
}

impl ValidatorBuilder {
    pub fn new() -> Self {
        Self {
            registry: RegistryBuilder::new(),
            messages: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Register only these default rules
    pub fn include_only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry = self.registry.include_only(names);
        self
    }

    /// Skip these default rules
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.registry = self.registry.exclude(names);
        self
    }

    /// Add a custom rule
    pub fn rule(mut self, name: impl Into<String>, constructor: RuleConstructor) -> Self {
        self.registry = self.registry.rule(name, constructor);
        self
    }

    pub fn presence_verifier(
        mut self,
        table: impl Into<String>,
        verifier: Arc<dyn PresenceVerifier>,
    ) -> Self {
        self.registry = self.registry.presence_verifier(table, verifier);
        self
    }

    pub fn password_verifier(mut self, verifier: Arc<dyn PasswordVerifier>) -> Self {
        self.registry = self.registry.password_verifier(verifier);
        self
    }

    pub fn verifiers(mut self, verifiers: Verifiers) -> Self {
        self.registry = self.registry.verifiers(verifiers);
        self
    }

    /// Custom message for a rule (`"min"`) or a rule on one field (`"min.age"`)
    pub fn message(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.push((key.into(), message.into()));
        self
    }

    /// Display name substituted for `:attribute`
    pub fn attribute(mut self, field: impl Into<String>, name: impl Into<String>) -> Self {
        self.attributes.push((field.into(), name.into()));
        self
    }

    /// Apply a configuration record on top of what is already set
    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.registry = self
            .registry
            .include_only(config.include_only)
            .exclude(config.exclude);
        self.messages.extend(config.messages);
        self.attributes.extend(config.attributes);
        self
    }

    /// Build the validator
    pub fn build(self) -> Validator {
        let mut engine = Engine::with_registry(Arc::new(self.registry.build()));
        for (key, message) in self.messages {
            engine.set_custom_message(key, message);
        }
        for (field, name) in self.attributes {
            engine.set_custom_attribute(field, name);
        }
        Validator::from_engine(engine)
    }
}

impl Default for ValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
