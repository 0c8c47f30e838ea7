//! Request-scoped validation.

use crate::core::ValidationErrors;
use crate::engine::Engine;
use crate::facade::{into_result, to_map, ValidatorError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::collections::HashMap;

/// A validation run with its own messages, attributes and extra rules.
///
/// Created by [`Validator::request`](crate::facade::Validator::request). The
/// request shares the validator's rule registry but holds a private copy of
/// its message resolver, so customizations made here never leak into the
/// validator or into other requests.
#[derive(Clone, Debug)]
pub struct ValidationRequest {
    engine: Engine,
    extra_rules: HashMap<String, Vec<String>>,
}

impl ValidationRequest {
    pub(crate) fn new(engine: &Engine) -> Self {
        let engine = match engine.message_resolver() {
            Some(resolver) => engine.clone_with_resolver(resolver.clone()),
            None => engine.clone(),
        };
        Self {
            engine,
            extra_rules: HashMap::new(),
        }
    }

    /// Rules appended to a field's rule string on every run of this request.
    ///
    /// ```rust
    /// use ruleline::facade::Validator;
    /// use serde_json::json;
    /// use std::collections::HashMap;
    ///
    /// let validator = Validator::new();
    /// let request = validator
    ///     .request()
    ///     .with_rules([("age", ["integer", "min:18"])]);
    ///
    /// let rules = HashMap::from([("age".to_string(), "required".to_string())]);
    /// let err = request.validate(&json!({ "age": 12 }), &rules).unwrap_err();
    /// let errors = err.errors().unwrap();
    /// assert_eq!(errors.field_error("age"), "The age must be at least 18");
    /// ```
    pub fn with_rules<I, F, R, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = (F, R)>,
        F: Into<String>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (field, list) in rules {
            self.extra_rules
                .entry(field.into())
                .or_default()
                .extend(list.into_iter().map(Into::into));
        }
        self
    }

    /// The caller's rules with this request's extra rules appended.
    fn merged_rules<'a>(
        &self,
        rules: &'a HashMap<String, String>,
    ) -> Cow<'a, HashMap<String, String>> {
        if self.extra_rules.is_empty() {
            return Cow::Borrowed(rules);
        }
        let mut merged = rules.clone();
        for (field, extra) in &self.extra_rules {
            let extra = extra.join("|");
            merged
                .entry(field.clone())
                .and_modify(|existing| {
                    existing.push('|');
                    existing.push_str(&extra);
                })
                .or_insert(extra);
        }
        Cow::Owned(merged)
    }

    /// Custom message for this request only.
    pub fn message(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.engine.set_custom_message(key, message);
        self
    }

    /// Display name for this request only.
    pub fn attribute(mut self, field: impl Into<String>, name: impl Into<String>) -> Self {
        self.engine.set_custom_attribute(field, name);
        self
    }

    /// Apply several custom messages at once.
    pub fn messages<I, K, V>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, message) in messages {
            self.engine.set_custom_message(key, message);
        }
        self
    }

    pub fn validate_map(
        &self,
        data: &Map<String, Value>,
        rules: &HashMap<String, String>,
    ) -> ValidationErrors {
        self.engine.execute(data, &self.merged_rules(rules))
    }

    pub fn validate<T: Serialize + ?Sized>(
        &self,
        data: &T,
        rules: &HashMap<String, String>,
    ) -> Result<(), ValidatorError> {
        into_result(self.validate_map(&to_map(data)?, rules))
    }

    /// Whether `data` satisfies every rule.
    pub fn passes(&self, data: &Map<String, Value>, rules: &HashMap<String, String>) -> bool {
        self.validate_map(data, rules).is_valid()
    }
}
