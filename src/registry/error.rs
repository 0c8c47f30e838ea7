//! Registry errors.

use thiserror::Error;

/// Errors that can occur when registering rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Rule name must not be empty")]
    EmptyName,

    #[error("Rule '{name}' is already registered. Use register() to replace it")]
    AlreadyRegistered { name: String },
}
