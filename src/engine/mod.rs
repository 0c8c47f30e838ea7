//! Rule execution.
//!
//! The [`Engine`] turns a `field -> rule string` map into a
//! [`ValidationErrors`] aggregate. Each field is processed on its own:
//!
//! 1. the rule string is parsed into invocations
//! 2. a `bail` invocation anywhere in the set turns on stop-on-first-failure
//! 3. every other invocation is looked up, constructed and run in order
//!
//! Unknown rules and constructor errors are recorded against the field like
//! any other failure; nothing about malformed rule strings is fatal, and one
//! field bailing never affects another.
//!
//! # Example
//!
//! ```rust
//! use ruleline::engine::Engine;
//! use serde_json::{json, Map, Value};
//! use std::collections::HashMap;
//!
//! let engine = Engine::new();
//! let data: Map<String, Value> = match json!({ "name": "" }) {
//!     Value::Object(map) => map,
//!     _ => unreachable!(),
//! };
//! let rules = HashMap::from([("name".to_string(), "bail|required|min:3".to_string())]);
//!
//! let errors = engine.execute(&data, &rules);
//! assert_eq!(errors.get("name"), ["The name field is required"]);
//! ```

use crate::core::{RuleConstructor, ValidationContext, ValidationErrors};
use crate::message::MessageResolver;
use crate::parser::{self, RuleInvocation};
use crate::registry::{RegistryError, RuleRegistry};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Reserved control name; never dispatched to the registry.
pub const BAIL: &str = "bail";

/// Prefix of the message recorded for an unregistered rule name.
pub const UNKNOWN_RULE_PREFIX: &str = "Unknown rule: ";

/// Prefix of the message recorded when a rule rejects its parameters.
pub const RULE_CREATION_PREFIX: &str = "Rule creation error: ";

/// Executes rule strings against input data.
///
/// The registry is shared: clones of an engine, including those made by
/// [`clone_with_resolver`](Self::clone_with_resolver), see the same rules.
/// The message resolver is owned, so per-request customization on a clone
/// never reaches the original.
#[derive(Clone, Debug)]
pub struct Engine {
    registry: Arc<RuleRegistry>,
    resolver: Option<MessageResolver>,
}

impl Engine {
    /// Engine with every default rule and the default messages.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(RuleRegistry::with_defaults()))
    }

    /// Engine over an existing registry, with the default messages.
    pub fn with_registry(registry: Arc<RuleRegistry>) -> Self {
        Self {
            registry,
            resolver: Some(MessageResolver::new()),
        }
    }

    /// Drop the resolver, so failures report each rule's own message.
    pub fn without_resolver(mut self) -> Self {
        self.resolver = None;
        self
    }

    /// Validate `data` against `rules`, one rule string per field.
    #[tracing::instrument(skip_all, fields(fields = rules.len()))]
    pub fn execute(
        &self,
        data: &Map<String, Value>,
        rules: &HashMap<String, String>,
    ) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for (field, rule_string) in rules {
            for message in self.execute_field(field, rule_string, data) {
                errors.add(field.as_str(), message);
            }
        }
        errors
    }

    fn execute_field(
        &self,
        field: &str,
        rule_string: &str,
        data: &Map<String, Value>,
    ) -> Vec<String> {
        let set = parser::parse(rule_string);
        let bail = set.contains(BAIL);
        tracing::debug!(field, invocations = set.len(), bail, "validating field");

        let mut messages = Vec::new();
        for invocation in set.iter().filter(|inv| !inv.is(BAIL)) {
            if let Some(message) = self.run_invocation(field, invocation, data) {
                messages.push(message);
                if bail {
                    break;
                }
            }
        }
        messages
    }

    /// Run one invocation, returning the failure message if it did not pass.
    fn run_invocation(
        &self,
        field: &str,
        invocation: &RuleInvocation,
        data: &Map<String, Value>,
    ) -> Option<String> {
        tracing::trace!(field, rule = %invocation.name, "running rule");

        let Some(constructor) = self.registry.get(&invocation.name) else {
            tracing::debug!(field, rule = %invocation.name, "unknown rule");
            return Some(format!("{UNKNOWN_RULE_PREFIX}{}", invocation.name));
        };

        let rule = match constructor(&invocation.params) {
            Ok(rule) => rule,
            Err(err) => {
                tracing::debug!(
                    field,
                    rule = %invocation.name,
                    error = %err,
                    "rule construction failed"
                );
                return Some(format!("{RULE_CREATION_PREFIX}{err}"));
            }
        };

        let ctx = ValidationContext::new(field, &invocation.params, data);
        let ctx = match &self.resolver {
            Some(resolver) => ctx.with_attributes(resolver.custom_attributes()),
            None => ctx,
        };

        let failure = rule.validate(&ctx).err()?;
        Some(match &self.resolver {
            Some(resolver) => resolver.resolve(&invocation.name, field, &invocation.params),
            None => failure.message().to_string(),
        })
    }

    /// Register a rule on the shared registry (last write wins).
    pub fn register_rule(
        &self,
        name: impl Into<String>,
        constructor: RuleConstructor,
    ) -> Result<(), RegistryError> {
        self.registry.register(name, constructor)
    }

    pub fn registry(&self) -> &Arc<RuleRegistry> {
        &self.registry
    }

    pub fn message_resolver(&self) -> Option<&MessageResolver> {
        self.resolver.as_ref()
    }

    pub fn set_message_resolver(&mut self, resolver: Option<MessageResolver>) {
        self.resolver = resolver;
    }

    /// Override a message on this engine's resolver, creating one if needed.
    pub fn set_custom_message(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.resolver
            .get_or_insert_with(MessageResolver::new)
            .set_custom_message(key, message);
    }

    /// Set a display name on this engine's resolver, creating one if needed.
    pub fn set_custom_attribute(&mut self, field: impl Into<String>, name: impl Into<String>) {
        self.resolver
            .get_or_insert_with(MessageResolver::new)
            .set_custom_attribute(field, name);
    }

    /// Request-scoped engine sharing this registry but owning `resolver`.
    pub fn clone_with_resolver(&self, resolver: MessageResolver) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            resolver: Some(resolver),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
