//! High-level validation entry points.
//!
//! [`Validator`] wraps an [`Engine`] with conveniences for typed input,
//! list-form rules and accumulated results:
//!
//! ```rust
//! use ruleline::facade::Validator;
//! use serde::Serialize;
//! use std::collections::HashMap;
//!
//! #[derive(Serialize)]
//! struct SignUp {
//!     email: String,
//!     age: u32,
//! }
//!
//! let validator = Validator::new();
//! let rules = HashMap::from([
//!     ("email".to_string(), "required|email".to_string()),
//!     ("age".to_string(), "required|integer|min:18".to_string()),
//! ]);
//!
//! let ok = SignUp { email: "ada@example.com".into(), age: 36 };
//! assert!(validator.validate(&ok, &rules).is_ok());
//!
//! let bad = SignUp { email: "nope".into(), age: 12 };
//! let err = validator.validate(&bad, &rules).unwrap_err();
//! assert_eq!(err.errors().unwrap().len(), 2);
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod request;

pub use builder::ValidatorBuilder;
pub use config::ValidatorConfig;
pub use error::{FieldError, ValidatorError};
pub use request::ValidationRequest;

use crate::core::{RuleConstructor, ValidationErrors};
use crate::engine::Engine;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Serialize `data` into the field map the engine works on.
pub(crate) fn to_map<T: Serialize + ?Sized>(
    data: &T,
) -> Result<Map<String, Value>, ValidatorError> {
    match serde_json::to_value(data) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ValidatorError::InvalidData(format!(
            "expected an object with named fields, got {}",
            kind(&other)
        ))),
        Err(err) => Err(ValidatorError::InvalidData(err.to_string())),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub(crate) fn into_result(errors: ValidationErrors) -> Result<(), ValidatorError> {
    if errors.is_valid() {
        Ok(())
    } else {
        Err(ValidatorError::Failed(errors))
    }
}

/// Validator with the default rule set, or one configured through
/// [`ValidatorBuilder`].
#[derive(Clone, Debug)]
pub struct Validator {
    engine: Engine,
}

impl Validator {
    pub fn new() -> Self {
        Self::from_engine(Engine::new())
    }

    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::new()
    }

    /// Validator built from a configuration record.
    pub fn from_config(config: ValidatorConfig) -> Self {
        ValidatorBuilder::new().config(config).build()
    }

    pub fn from_engine(engine: Engine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Validate any serializable record; `Err(Failed)` carries every
    /// field error.
    pub fn validate<T: Serialize + ?Sized>(
        &self,
        data: &T,
        rules: &HashMap<String, String>,
    ) -> Result<(), ValidatorError> {
        into_result(self.validate_with_result(data, rules)?)
    }

    /// Validate any serializable record, returning the full result.
    ///
    /// Only input that cannot be viewed as a map of fields is an error.
    pub fn validate_with_result<T: Serialize + ?Sized>(
        &self,
        data: &T,
        rules: &HashMap<String, String>,
    ) -> Result<ValidationErrors, ValidatorError> {
        Ok(self.validate_map(&to_map(data)?, rules))
    }

    pub fn validate_map(
        &self,
        data: &Map<String, Value>,
        rules: &HashMap<String, String>,
    ) -> ValidationErrors {
        self.engine.execute(data, rules)
    }

    /// Validate with rules given as lists, e.g. `["required", "min:3"]`.
    pub fn validate_list(
        &self,
        data: &Map<String, Value>,
        rules: &HashMap<String, Vec<String>>,
    ) -> ValidationErrors {
        let joined: HashMap<String, String> = rules
            .iter()
            .map(|(field, list)| (field.clone(), list.join("|")))
            .collect();
        self.validate_map(data, &joined)
    }

    /// Validate and accumulate every failure, fields in name order.
    pub fn check(
        &self,
        data: &Map<String, Value>,
        rules: &HashMap<String, String>,
    ) -> Validation<(), NonEmptyVec<FieldError>> {
        let errors = self.validate_map(data, rules);
        let mut fields: Vec<_> = errors.errors().iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));

        let checks: Vec<Validation<(), NonEmptyVec<FieldError>>> = fields
            .into_iter()
            .flat_map(|(field, messages)| {
                messages.iter().map(move |message| {
                    Validation::fail(FieldError {
                        field: field.clone(),
                        message: message.clone(),
                    })
                })
            })
            .collect();

        Validation::all_vec(checks).map(|_| ())
    }

    /// Start a request with its own messages and attributes.
    pub fn request(&self) -> ValidationRequest {
        ValidationRequest::new(&self.engine)
    }

    /// Register a rule (last write wins).
    pub fn add_rule(
        &self,
        name: impl Into<String>,
        constructor: RuleConstructor,
    ) -> Result<(), ValidatorError> {
        Ok(self.engine.register_rule(name, constructor)?)
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.engine.registry().has(name)
    }

    pub fn available_rules(&self) -> BTreeSet<String> {
        self.engine.registry().list()
    }

    pub fn set_custom_message(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.engine.set_custom_message(key, message);
    }

    pub fn set_custom_attribute(&mut self, field: impl Into<String>, name: impl Into<String>) {
        self.engine.set_custom_attribute(field, name);
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FnRule;
    use serde_json::json;

    fn input(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn rules(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(field, rules)| (field.to_string(), rules.to_string()))
            .collect()
    }

    #[test]
    fn validate_accepts_valid_records() {
        let validator = Validator::new();
        let result = validator.validate(
            &json!({ "name": "Ada", "email": "ada@example.com" }),
            &rules(&[("name", "required|alpha"), ("email", "required|email")]),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn validate_rejects_non_objects() {
        let validator = Validator::new();
        let err = validator
            .validate(&vec![1, 2, 3], &rules(&[("x", "required")]))
            .unwrap_err();

        match err {
            ValidatorError::InvalidData(message) => assert!(message.contains("an array")),
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }

    #[test]
    fn validate_with_result_returns_all_errors() {
        let validator = Validator::new();
        let errors = validator
            .validate_with_result(&json!({ "age": 12 }), &rules(&[("age", "min:18|gt:20")]))
            .unwrap();

        assert_eq!(errors.get("age").len(), 2);
    }

    #[test]
    fn validate_list_joins_rules() {
        let validator = Validator::new();
        let list = HashMap::from([(
            "name".to_string(),
            vec!["bail".to_string(), "required".to_string(), "min:3".to_string()],
        )]);

        let errors = validator.validate_list(&input(json!({ "name": "" })), &list);
        assert_eq!(errors.get("name"), ["The name field is required"]);
    }

    #[test]
    fn check_accumulates_every_failure() {
        let validator = Validator::new();
        let result = validator.check(
            &input(json!({ "a": "", "b": "x" })),
            &rules(&[("a", "required|min:2"), ("b", "integer")]),
        );

        match result {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 3);
                let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
                assert_eq!(fields, ["a", "a", "b"]);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn check_succeeds_on_valid_input() {
        let validator = Validator::new();
        let result = validator.check(&input(json!({ "a": "ok" })), &rules(&[("a", "required")]));

        assert!(result.is_success());
    }

    #[test]
    fn rules_can_be_added() {
        let validator = Validator::new();
        validator
            .add_rule("even", FnRule::constructor("even", "odd", |ctx| {
                ctx.value().as_i64().is_some_and(|n| n % 2 == 0)
            }))
            .unwrap();

        assert!(validator.has_rule("even"));
        assert!(validator.available_rules().contains("even"));
        assert!(matches!(
            validator.add_rule("", FnRule::constructor("x", "x", |_| true)),
            Err(ValidatorError::Registry(_))
        ));
    }

    #[test]
    fn unknown_and_broken_rules_are_reported() {
        let validator = Validator::new();
        let errors = validator.validate_map(
            &input(json!({ "a": 1, "b": 1 })),
            &rules(&[("a", "nope"), ("b", "accepted_if")]),
        );

        assert_eq!(errors.field_error("a"), "Unknown rule: nope");
        assert!(errors.field_error("b").starts_with("Rule creation error:"));
    }

    #[test]
    fn custom_messages_and_attributes() {
        let mut validator = Validator::new();
        validator.set_custom_message("email", ":attribute looks wrong");
        validator.set_custom_attribute("contact", "Contact address");

        let errors = validator.validate_map(
            &input(json!({ "contact": "nope" })),
            &rules(&[("contact", "email")]),
        );
        assert_eq!(errors.field_error("contact"), "Contact address looks wrong");
    }

    #[test]
    fn from_config_applies_filters() {
        let config = ValidatorConfig {
            include_only: vec!["required".to_string()],
            ..Default::default()
        };
        let validator = Validator::from_config(config);

        assert_eq!(validator.available_rules().len(), 1);
    }
}
