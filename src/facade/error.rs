//! Errors surfaced by the [`Validator`](crate::facade::Validator) facade.

use crate::core::ValidationErrors;
use crate::registry::RegistryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by the facade's `Result`-based entry points.
#[derive(Debug, Error)]
pub enum ValidatorError {
    /// The input did not serialize into a JSON object.
    #[error("invalid input data: {0}")]
    InvalidData(String),

    /// One or more fields failed validation.
    #[error(transparent)]
    Failed(#[from] ValidationErrors),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("invalid validator configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl ValidatorError {
    /// The field errors, if this is a validation failure.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Failed(errors) => Some(errors),
            _ => None,
        }
    }
}

/// One failure message for one field, as accumulated by
/// [`Validator::check`](crate::facade::Validator::check).
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
