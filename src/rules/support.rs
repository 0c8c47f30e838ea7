//! Shared building blocks for the default rules.

use crate::core::{constructor, Rule, RuleConstructor, RuleError, RuleFailure, ValidationContext};
use crate::message::{default_template, render, Placeholders, FALLBACK_MESSAGE};
use serde_json::Value;
use std::sync::Arc;

pub(crate) type Predicate = Arc<dyn Fn(&ValidationContext<'_>) -> bool + Send + Sync>;

/// Failure carrying the rule's built-in message, rendered for `ctx`.
pub(crate) fn failure(ctx: &ValidationContext<'_>, rule: &str) -> RuleFailure {
    let template = default_template(rule).unwrap_or(FALLBACK_MESSAGE);
    let attribute = ctx.attribute(ctx.field());
    RuleFailure::new(render(
        template,
        &Placeholders {
            attribute: &attribute,
            field: ctx.field(),
            params: ctx.parameters(),
        },
    ))
}

/// A default rule: a name plus a predicate over the context.
pub(crate) struct Check {
    name: &'static str,
    predicate: Predicate,
}

impl Rule for Check {
    fn name(&self) -> &str {
        self.name
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Result<(), RuleFailure> {
        if (self.predicate)(ctx) {
            Ok(())
        } else {
            Err(failure(ctx, self.name))
        }
    }
}

/// Constructor for a rule that takes no parameters.
pub(crate) fn simple<F>(name: &'static str, predicate: F) -> RuleConstructor
where
    F: Fn(&ValidationContext<'_>) -> bool + Send + Sync + 'static,
{
    let predicate: Predicate = Arc::new(predicate);
    constructor(move |_params| {
        Ok(Box::new(Check {
            name,
            predicate: Arc::clone(&predicate),
        }) as Box<dyn Rule>)
    })
}

/// Constructor that parses its parameters into a predicate up front.
pub(crate) fn with_params<F>(name: &'static str, build: F) -> RuleConstructor
where
    F: Fn(&[String]) -> Result<Predicate, RuleError> + Send + Sync + 'static,
{
    constructor(move |params| {
        let predicate = build(params)?;
        Ok(Box::new(Check { name, predicate }) as Box<dyn Rule>)
    })
}

pub(crate) fn predicate<F>(f: F) -> Predicate
where
    F: Fn(&ValidationContext<'_>) -> bool + Send + Sync + 'static,
{
    Arc::new(f)
}

// Parameter helpers

pub(crate) fn require_params(
    rule: &str,
    params: &[String],
    expected: usize,
) -> Result<(), RuleError> {
    if params.len() < expected {
        Err(RuleError::missing(rule, expected))
    } else {
        Ok(())
    }
}

pub(crate) fn number_param(rule: &str, param: &str) -> Result<f64, RuleError> {
    param
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| RuleError::invalid(rule, param, "not a number"))
}

pub(crate) fn count_param(rule: &str, param: &str) -> Result<usize, RuleError> {
    param
        .trim()
        .parse::<usize>()
        .map_err(|e| RuleError::invalid(rule, param, e))
}

// Value helpers

/// Null, blank strings and empty collections count as empty.
pub(crate) fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Text form used when comparing a value to a rule parameter.
pub(crate) fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Numeric reading of a number or a numeric string.
pub(crate) fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Size used by `min`/`max`/`size`/`between`: string length in chars,
/// collection length, or the number itself. Null is zero.
pub(crate) fn size_of(value: &Value) -> Option<f64> {
    match value {
        Value::Null => Some(0.0),
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Number(n) => n.as_f64(),
        Value::Array(items) => Some(items.len() as f64),
        Value::Object(map) => Some(map.len() as f64),
        Value::Bool(_) => None,
    }
}

/// Like [`size_of`], but numeric strings compare by value.
pub(crate) fn comparable(value: &Value) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::String(s) => numeric(value).or(Some(s.chars().count() as f64)),
        other => size_of(other),
    }
}
