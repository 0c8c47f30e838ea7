//! Built-in rule implementations.
//!
//! Every rule here is registered by
//! [`RegistryBuilder`](crate::registry::RegistryBuilder) unless filtered out.
//! Rules report failures with their built-in message (see
//! [`crate::message`]); the engine replaces that text with the
//! resolver's message when one is configured.
//!
//! Rules run on absent and null values like any other value. `required`
//! rejects them, most format rules reject them because they are not
//! strings, and `nullable`/`sometimes` are accepted as markers that
//! never fail.

mod comparison;
mod conditional;
mod date;
mod format;
mod password;
mod presence;
mod support;
mod types;
mod verified;

use crate::core::RuleConstructor;
use crate::registry::Verifiers;
use std::sync::Arc;

/// The default rule table, in registration order.
pub(crate) fn default_rules(
    verifiers: &Arc<Verifiers>,
) -> Vec<(&'static str, RuleConstructor)> {
    let mut rules = presence::rules();
    rules.extend(conditional::rules());
    rules.extend(comparison::rules());
    rules.extend(types::rules());
    rules.extend(format::rules());
    rules.extend(password::rules());
    rules.extend(date::rules());
    rules.extend(verified::rules(verifiers));
    rules
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::core::{RuleError, RuleFailure, ValidationContext};
    use serde_json::Value;

    fn lookup(rule: &str, verifiers: &Arc<Verifiers>) -> RuleConstructor {
        default_rules(verifiers)
            .into_iter()
            .find(|(name, _)| *name == rule)
            .map(|(_, ctor)| ctor)
            .unwrap_or_else(|| panic!("no default rule named {rule}"))
    }

    /// Build `rule` with `params` and run it against `field` in `data`.
    pub(crate) fn run_with(
        verifiers: &Arc<Verifiers>,
        rule: &str,
        params: &[&str],
        data: Value,
        field: &str,
    ) -> Result<Result<(), RuleFailure>, RuleError> {
        let params: Vec<String> = params.iter().map(|p| p.to_string()).collect();
        let data = match data {
            Value::Object(map) => map,
            other => panic!("test data must be an object, got {other}"),
        };
        let built = lookup(rule, verifiers)(&params)?;
        Ok(built.validate(&ValidationContext::new(field, &params, &data)))
    }

    pub(crate) fn run(
        rule: &str,
        params: &[&str],
        data: Value,
        field: &str,
    ) -> Result<Result<(), RuleFailure>, RuleError> {
        run_with(&Arc::new(Verifiers::new()), rule, params, data, field)
    }

    /// Whether `rule` accepts `field`; panics on construction errors.
    pub(crate) fn passes(rule: &str, params: &[&str], data: Value, field: &str) -> bool {
        run(rule, params, data, field)
            .unwrap_or_else(|err| panic!("{rule} failed to build: {err}"))
            .is_ok()
    }

    pub(crate) fn construction_error(rule: &str, params: &[&str]) -> RuleError {
        match run(rule, params, Value::Object(Default::default()), "x") {
            Err(err) => err,
            Ok(_) => panic!("{rule} built with {params:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_names_are_unique() {
        let rules = default_rules(&Arc::new(Verifiers::new()));
        let names: HashSet<_> = rules.iter().map(|(name, _)| *name).collect();

        assert_eq!(names.len(), rules.len());
        assert!(!names.contains("bail"));
    }

    #[test]
    fn constructors_report_their_name() {
        for (name, ctor) in default_rules(&Arc::new(Verifiers::new())) {
            let params: Vec<String> = match name {
                "regex" | "not_regex" => vec!["^a$".into()],
                "date_format" => vec!["%Y-%m-%d".into()],
                "after" | "after_or_equal" | "before" | "before_or_equal" | "date_equals" => {
                    vec!["2024-01-01".into()]
                }
                "password" => vec!["min:4".into()],
                _ => vec!["1".into(), "2".into()],
            };
            if let Ok(rule) = ctor(&params) {
                assert_eq!(rule.name(), name);
            }
        }
    }
}
