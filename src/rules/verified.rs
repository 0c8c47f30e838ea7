//! Rules backed by injected verifiers: `exists`, `unique`, `current_password`.

use super::support::{failure, require_params};
use crate::core::{
    constructor, Rule, RuleConstructor, RuleError, RuleFailure, ValidationContext, VerifierError,
};
use crate::registry::{PresenceVerifier, Verifiers};
use std::sync::Arc;

type Lookup = Box<dyn Fn(&ValidationContext<'_>) -> Result<bool, VerifierError> + Send + Sync>;

/// A rule whose answer comes from outside the input.
///
/// Verifier errors are logged and reported as an ordinary failure of the
/// rule, so a broken backend never passes a value.
struct Verified {
    name: &'static str,
    lookup: Lookup,
}

impl Rule for Verified {
    fn name(&self) -> &str {
        self.name
    }

    fn validate(&self, ctx: &ValidationContext<'_>) -> Result<(), RuleFailure> {
        match (self.lookup)(ctx) {
            Ok(true) => Ok(()),
            Ok(false) => Err(failure(ctx, self.name)),
            Err(err) => {
                tracing::warn!(
                    rule = self.name,
                    field = ctx.field(),
                    error = %err,
                    "verifier failed"
                );
                Err(failure(ctx, self.name))
            }
        }
    }
}

/// `exists:table[,column]` and `unique:table[,column]`. The column defaults
/// to the field name.
fn presence(name: &'static str, verifiers: &Arc<Verifiers>, want_unique: bool) -> RuleConstructor {
    let verifiers = Arc::clone(verifiers);
    constructor(move |params| {
        require_params(name, params, 1)?;
        let table = params[0].clone();
        let column = params.get(1).cloned();
        let verifier: Arc<dyn PresenceVerifier> =
            verifiers
                .presence(&table)
                .ok_or_else(|| RuleError::MissingVerifier {
                    rule: name.to_string(),
                    table: table.clone(),
                })?;
        let lookup: Lookup = Box::new(move |ctx| {
            let column = column.as_deref().unwrap_or(ctx.field());
            if want_unique {
                verifier.unique(&table, column, ctx.value())
            } else {
                verifier.exists(&table, column, ctx.value())
            }
        });
        Ok(Box::new(Verified { name, lookup }) as Box<dyn Rule>)
    })
}

fn current_password(verifiers: &Arc<Verifiers>) -> RuleConstructor {
    let verifiers = Arc::clone(verifiers);
    constructor(move |_params| {
        let verifier = verifiers
            .password()
            .ok_or_else(|| RuleError::MissingVerifier {
                rule: "current_password".to_string(),
                table: "password".to_string(),
            })?;
        let lookup: Lookup = Box::new(move |ctx| match ctx.value().as_str() {
            Some(password) => verifier.verify(password),
            None => Ok(false),
        });
        Ok(Box::new(Verified {
            name: "current_password",
            lookup,
        }) as Box<dyn Rule>)
    })
}

pub(crate) fn rules(verifiers: &Arc<Verifiers>) -> Vec<(&'static str, RuleConstructor)> {
    vec![
        ("exists", presence("exists", verifiers, false)),
        ("unique", presence("unique", verifiers, true)),
        ("current_password", current_password(verifiers)),
    ]
}
