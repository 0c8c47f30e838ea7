//! Core validation types shared by every layer.
//!
//! This module contains the pieces a rule author needs:
//! - the `Rule` trait and `RuleConstructor` factories
//! - the read-only `ValidationContext` handed to each rule
//! - the `ValidationErrors` aggregate produced by the engine
//! - construction, failure, and verifier errors

mod context;
mod error;
mod result;
mod rule;

pub use context::ValidationContext;
pub use error::{RuleError, RuleFailure, VerifierError};
pub use result::ValidationErrors;
pub use rule::{constructor, FnRule, Rule, RuleConstructor};
