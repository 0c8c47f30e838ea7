//! The `Rule` capability and the constructors that produce rules.
//!
//! A rule is a named predicate over a [`ValidationContext`]. Rules are
//! built fresh for every invocation by a [`RuleConstructor`], which receives
//! the parameters parsed from the rule string and may reject them.

use super::context::ValidationContext;
use super::error::{RuleError, RuleFailure};
use std::fmt;
use std::sync::Arc;

/// Trait for validation rules.
///
/// Rules carry only the configuration baked in by their constructor; they
/// hold no state across calls.
///
/// # Example
///
/// ```rust
/// use ruleline::core::{Rule, RuleFailure, ValidationContext};
///
/// struct NotBlank;
///
/// impl Rule for NotBlank {
///     fn name(&self) -> &str {
///         "not_blank"
///     }
///
///     fn validate(&self, ctx: &ValidationContext<'_>) -> Result<(), RuleFailure> {
///         match ctx.value().as_str() {
///             Some(s) if !s.trim().is_empty() => Ok(()),
///             _ => Err(RuleFailure::new("The value must not be blank")),
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Identifier used for message lookup.
    fn name(&self) -> &str;

    /// Check the context's value.
    fn validate(&self, ctx: &ValidationContext<'_>) -> Result<(), RuleFailure>;
}

/// Factory turning invocation parameters into a rule.
pub type RuleConstructor =
    Arc<dyn Fn(&[String]) -> Result<Box<dyn Rule>, RuleError> + Send + Sync>;

/// Wrap a closure as a [`RuleConstructor`].
pub fn constructor<F>(f: F) -> RuleConstructor
where
    F: Fn(&[String]) -> Result<Box<dyn Rule>, RuleError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Rule backed by a plain predicate closure.
///
/// This is the extension point for ad-hoc rules registered at runtime.
///
/// ```rust
/// use ruleline::core::{FnRule, Rule, ValidationContext};
/// use serde_json::{json, Map};
///
/// let even = FnRule::new("even", "The :attribute must be even", |ctx| {
///     ctx.value().as_i64().is_some_and(|n| n % 2 == 0)
/// });
///
/// let mut data = Map::new();
/// data.insert("n".to_string(), json!(4));
/// let ctx = ValidationContext::new("n", &[], &data);
/// assert!(even.validate(&ctx).is_ok());
/// ```
pub struct FnRule {
    name: String,
    message: String,
    predicate: Box<dyn Fn(&ValidationContext<'_>) -> bool + Send + Sync>,
}

impl FnRule {
    pub fn new<F>(name: impl Into<String>, message: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&ValidationContext<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            message: message.into(),
            predicate: Box::new(predicate),
        }
    }

    /// Constructor that ignores parameters and always yields a fresh
    /// `FnRule` sharing the same predicate.
    pub fn constructor<F>(
        name: impl Into<String>,
        message: impl Into<String>,
        predicate: F,
    ) -> RuleConstructor
    where
        F: Fn(&ValidationContext<'_>) -> bool + Send + Sync + 'static,
    {
        let name = name.into();
        let message = message.into();
        let predicate = Arc::new(predicate);
        constructor(move |_params| {
            let predicate = Arc::clone(&predicate);
            Ok(Box::new(FnRule::new(name.clone(), message.clone(), move |ctx| {
                (*predicate)(ctx)
            })) as Box<dyn Rule>)
        })
    }
}

impl Rule for FnRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Result<(), RuleFailure> {
        if (self.predicate)(ctx) {
            Ok(())
        } else {
            Err(RuleFailure::new(self.message.clone()))
        }
    }
}

impl fmt::Debug for FnRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnRule")
            .field("name", &self.name)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}
