//! Errors raised while constructing and running rules.

use thiserror::Error;

/// Errors that can occur when a rule is constructed from its parameters.
///
/// The engine never propagates these; it records them against the field as
/// `"Rule creation error: {error}"`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RuleError {
    #[error("{rule} rule requires at least {expected} parameter(s)")]
    MissingParameter { rule: String, expected: usize },

    #[error("invalid parameter '{parameter}' for {rule} rule: {reason}")]
    InvalidParameter {
        rule: String,
        parameter: String,
        reason: String,
    },

    #[error("{rule} rule has no verifier registered for '{table}'")]
    MissingVerifier { rule: String, table: String },

    #[error("{0}")]
    Custom(String),
}

impl RuleError {
    pub fn missing(rule: &str, expected: usize) -> Self {
        Self::MissingParameter {
            rule: rule.to_string(),
            expected,
        }
    }

    pub fn invalid(rule: &str, parameter: &str, reason: impl ToString) -> Self {
        Self::InvalidParameter {
            rule: rule.to_string(),
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A rule ran and rejected the value.
///
/// Carries the rule's own message, which the engine falls back to when no
/// message resolver is configured.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RuleFailure {
    message: String,
}

impl RuleFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors reported by presence and password verifiers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("verifier failed: {0}")]
pub struct VerifierError(pub String);
