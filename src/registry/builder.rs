//! Builder API for assembling a rule registry.

use crate::core::RuleConstructor;
use crate::registry::verifier::{PasswordVerifier, PresenceVerifier, Verifiers};
use crate::registry::RuleRegistry;
use crate::rules;
use std::collections::HashSet;
use std::sync::Arc;

/// Builder for creating a [`RuleRegistry`].
///
/// Filtering applies only to the default rule table and happens once, in
/// [`build`](Self::build), before custom rules are added. Custom rules are
/// never filtered. When an include-only list is set, the exclude list is
/// ignored.
///
/// ```rust
/// use ruleline::registry::RegistryBuilder;
///
/// let registry = RegistryBuilder::new()
///     .include_only(["required", "email"])
///     .build();
///
/// assert!(registry.has("required"));
/// assert!(!registry.has("min"));
/// ```
pub struct RegistryBuilder {
    include_only: HashSet<String>,
    exclude: HashSet<String>,
    custom_rules: Vec<(String, RuleConstructor)>,
    verifiers: Verifiers,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            include_only: HashSet::new(),
            exclude: HashSet::new(),
            custom_rules: Vec::new(),
            verifiers: Verifiers::new(),
        }
    }

    /// Register only these default rules
    pub fn include_only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_only.extend(names.into_iter().map(Into::into));
        self
    }

    /// Skip these default rules
    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add a custom rule, registered after the defaults
    pub fn rule(mut self, name: impl Into<String>, constructor: RuleConstructor) -> Self {
        self.custom_rules.push((name.into(), constructor));
        self
    }

    /// Provide the verifier consulted by `exists`/`unique` for `table`
    pub fn presence_verifier(
        mut self,
        table: impl Into<String>,
        verifier: Arc<dyn PresenceVerifier>,
    ) -> Self {
        self.verifiers = self.verifiers.with_presence(table, verifier);
        self
    }

    /// Provide the verifier consulted by `current_password`
    pub fn password_verifier(mut self, verifier: Arc<dyn PasswordVerifier>) -> Self {
        self.verifiers = self.verifiers.with_password(verifier);
        self
    }

    /// Replace all verifiers at once
    pub fn verifiers(mut self, verifiers: Verifiers) -> Self {
        self.verifiers = verifiers;
        self
    }

    fn keeps(&self, name: &str) -> bool {
        if self.include_only.is_empty() {
            !self.exclude.contains(name)
        } else {
            self.include_only.contains(name)
        }
    }

    /// Build the registry
    pub fn build(self) -> RuleRegistry {
        let registry = RuleRegistry::new();
        let verifiers = Arc::new(self.verifiers.clone());

        let mut dropped = 0usize;
        for (name, constructor) in rules::default_rules(&verifiers) {
            if self.keeps(name) {
                // Names in the default table are non-empty literals.
                let _ = registry.register(name, constructor);
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::debug!(dropped, kept = registry.count(), "filtered default rules");
        }

        for (name, constructor) in self.custom_rules {
            if let Err(err) = registry.register(name, constructor) {
                tracing::warn!(error = %err, "skipping custom rule");
            }
        }

        registry
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
