//! Rules whose requirement depends on other fields.

use super::presence::{is_accepted, is_declined};
use super::support::{display, is_empty_value, predicate, require_params, with_params};
use crate::core::{RuleConstructor, ValidationContext};

type Outcome = fn(&ValidationContext<'_>) -> bool;

/// What has to hold about the listed fields for the rule to apply.
#[derive(Clone, Copy, Debug)]
enum Trigger {
    AnyFilled,
    AllFilled,
    AnyMissing,
    AllMissing,
}

impl Trigger {
    fn holds(self, ctx: &ValidationContext<'_>, fields: &[String]) -> bool {
        let mut states = fields.iter().map(|f| !is_empty_value(ctx.other(f)));
        match self {
            Self::AnyFilled => states.any(|f| f),
            Self::AllFilled => states.all(|f| f),
            Self::AnyMissing => states.any(|f| !f),
            Self::AllMissing => states.all(|f| !f),
        }
    }
}

fn filled(ctx: &ValidationContext<'_>) -> bool {
    !is_empty_value(ctx.value())
}

fn missing_or_empty(ctx: &ValidationContext<'_>) -> bool {
    is_empty_value(ctx.value())
}

/// Whether `field` is present and renders as one of `values`.
fn equals_any(ctx: &ValidationContext<'_>, field: &str, values: &[String]) -> bool {
    if !ctx.data().contains_key(field) {
        return false;
    }
    let other = display(ctx.other(field));
    values.iter().any(|v| *v == other)
}

/// `rule:field,value1,value2...`; applies `outcome` when `field` matches one
/// of the values, or when it matches none if `unless` is set.
fn when_value(name: &'static str, unless: bool, outcome: Outcome) -> RuleConstructor {
    with_params(name, move |params| {
        require_params(name, params, 2)?;
        let field = params[0].clone();
        let values = params[1..].to_vec();
        Ok(predicate(move |ctx| {
            let applies = equals_any(ctx, &field, &values) != unless;
            !applies || outcome(ctx)
        }))
    })
}

/// `rule:field1,field2...`; the value is required when `trigger` holds.
fn when_fields(name: &'static str, trigger: Trigger) -> RuleConstructor {
    with_params(name, move |params| {
        require_params(name, params, 1)?;
        let fields = params.to_vec();
        Ok(predicate(move |ctx| !trigger.holds(ctx, &fields) || filled(ctx)))
    })
}

fn prohibits() -> RuleConstructor {
    with_params("prohibits", |params| {
        require_params("prohibits", params, 1)?;
        let fields = params.to_vec();
        Ok(predicate(move |ctx| {
            missing_or_empty(ctx) || fields.iter().all(|f| is_empty_value(ctx.other(f)))
        }))
    })
}

pub(crate) fn rules() -> Vec<(&'static str, RuleConstructor)> {
    vec![
        ("required_if", when_value("required_if", false, filled)),
        ("required_unless", when_value("required_unless", true, filled)),
        ("required_with", when_fields("required_with", Trigger::AnyFilled)),
        ("required_with_all", when_fields("required_with_all", Trigger::AllFilled)),
        ("required_without", when_fields("required_without", Trigger::AnyMissing)),
        (
            "required_without_all",
            when_fields("required_without_all", Trigger::AllMissing),
        ),
        ("prohibited_if", when_value("prohibited_if", false, missing_or_empty)),
        (
            "prohibited_unless",
            when_value("prohibited_unless", true, missing_or_empty),
        ),
        ("prohibits", prohibits()),
        (
            "accepted_if",
            when_value("accepted_if", false, |ctx| is_accepted(ctx.value())),
        ),
        (
            "declined_if",
            when_value("declined_if", false, |ctx| is_declined(ctx.value())),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use crate::core::RuleError;
    use crate::rules::testing::{construction_error, passes};
    use serde_json::json;

    #[test]
    fn required_if_applies_on_matching_value() {
        let params = ["role", "admin", "owner"];

        assert!(!passes("required_if", &params, json!({ "role": "admin" }), "code"));
        assert!(!passes("required_if", &params, json!({ "role": "owner", "code": "" }), "code"));
        assert!(passes("required_if", &params, json!({ "role": "admin", "code": "x" }), "code"));
        assert!(passes("required_if", &params, json!({ "role": "guest" }), "code"));
        assert!(passes("required_if", &params, json!({}), "code"));
    }

    #[test]
    fn required_if_compares_rendered_values() {
        assert!(!passes("required_if", &["vip", "true"], json!({ "vip": true }), "code"));
        assert!(!passes("required_if", &["level", "3"], json!({ "level": 3 }), "code"));
    }

    #[test]
    fn required_unless_inverts_the_condition() {
        let params = ["role", "guest"];

        assert!(passes("required_unless", &params, json!({ "role": "guest" }), "code"));
        assert!(!passes("required_unless", &params, json!({ "role": "admin" }), "code"));
        assert!(!passes("required_unless", &params, json!({}), "code"));
    }

    #[test]
    fn required_with_variants() {
        let both = json!({ "a": 1, "b": 2 });
        let one = json!({ "a": 1 });
        let none = json!({});

        assert!(!passes("required_with", &["a", "b"], one.clone(), "x"));
        assert!(passes("required_with", &["a", "b"], none.clone(), "x"));

        assert!(passes("required_with_all", &["a", "b"], one.clone(), "x"));
        assert!(!passes("required_with_all", &["a", "b"], both.clone(), "x"));

        assert!(!passes("required_without", &["a", "b"], one.clone(), "x"));
        assert!(passes("required_without", &["a", "b"], both, "x"));

        assert!(passes("required_without_all", &["a", "b"], one, "x"));
        assert!(!passes("required_without_all", &["a", "b"], none, "x"));
    }

    #[test]
    fn prohibited_conditions() {
        let params = ["kind", "free"];

        assert!(!passes("prohibited_if", &params, json!({ "kind": "free", "price": 5 }), "price"));
        assert!(passes("prohibited_if", &params, json!({ "kind": "paid", "price": 5 }), "price"));
        assert!(passes("prohibited_if", &params, json!({ "kind": "free" }), "price"));

        let paid = json!({ "kind": "paid", "price": 5 });
        let free = json!({ "kind": "free", "price": 5 });
        assert!(!passes("prohibited_unless", &params, paid, "price"));
        assert!(passes("prohibited_unless", &params, free, "price"));
    }

    #[test]
    fn prohibits_other_fields() {
        assert!(!passes("prohibits", &["b"], json!({ "a": 1, "b": 2 }), "a"));
        assert!(passes("prohibits", &["b"], json!({ "a": 1 }), "a"));
        assert!(passes("prohibits", &["b"], json!({ "b": 2 }), "a"));
    }

    #[test]
    fn acceptance_conditions() {
        let params = ["plan", "pro"];

        assert!(!passes("accepted_if", &params, json!({ "plan": "pro", "tos": "no" }), "tos"));
        assert!(passes("accepted_if", &params, json!({ "plan": "pro", "tos": "yes" }), "tos"));
        assert!(passes("accepted_if", &params, json!({ "plan": "free" }), "tos"));
        assert!(passes("declined_if", &params, json!({ "plan": "pro", "tos": false }), "tos"));
        assert!(!passes("declined_if", &params, json!({ "plan": "pro", "tos": true }), "tos"));
    }

    #[test]
    fn missing_parameters_fail_construction() {
        assert_eq!(
            construction_error("required_if", &["role"]),
            RuleError::missing("required_if", 2)
        );
        assert_eq!(
            construction_error("required_with", &[]),
            RuleError::missing("required_with", 1)
        );
    }
}
