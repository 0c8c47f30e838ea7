//! Lookup interfaces for rules that need outside knowledge.
//!
//! `exists`/`unique` ask a [`PresenceVerifier`] about stored records and
//! `current_password` asks a [`PasswordVerifier`]. Implementations are
//! handed to [`RegistryBuilder`](crate::registry::RegistryBuilder) once at
//! startup and captured by the rule constructors; there is no process-wide
//! lookup table.

use crate::core::VerifierError;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Existence checks against a backing store, keyed by table.
pub trait PresenceVerifier: Send + Sync {
    /// Whether a record with `column == value` exists in `table`.
    fn exists(&self, table: &str, column: &str, value: &Value) -> Result<bool, VerifierError>;

    /// Whether no record with `column == value` exists in `table`.
    fn unique(&self, table: &str, column: &str, value: &Value) -> Result<bool, VerifierError> {
        self.exists(table, column, value).map(|found| !found)
    }
}

/// Checks a password against the current user's credentials.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, password: &str) -> Result<bool, VerifierError>;
}

/// Verifiers available to the default rule set.
#[derive(Clone, Default)]
pub struct Verifiers {
    presence: HashMap<String, Arc<dyn PresenceVerifier>>,
    password: Option<Arc<dyn PasswordVerifier>>,
}

impl Verifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_presence(
        mut self,
        table: impl Into<String>,
        verifier: Arc<dyn PresenceVerifier>,
    ) -> Self {
        self.presence.insert(table.into(), verifier);
        self
    }

    pub fn with_password(mut self, verifier: Arc<dyn PasswordVerifier>) -> Self {
        self.password = Some(verifier);
        self
    }

    pub fn presence(&self, table: &str) -> Option<Arc<dyn PresenceVerifier>> {
        self.presence.get(table).cloned()
    }

    pub fn password(&self) -> Option<Arc<dyn PasswordVerifier>> {
        self.password.clone()
    }
}

impl fmt::Debug for Verifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tables: Vec<_> = self.presence.keys().collect();
        tables.sort();
        f.debug_struct("Verifiers")
            .field("presence", &tables)
            .field("password", &self.password.is_some())
            .finish()
    }
}

/// In-memory presence verifier, handy for tests and fixtures.
#[derive(Clone, Debug, Default)]
pub struct MemoryPresenceVerifier {
    records: HashMap<(String, String), Vec<Value>>,
}

impl MemoryPresenceVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, table: &str, column: &str, value: Value) -> Self {
        self.records
            .entry((table.to_string(), column.to_string()))
            .or_default()
            .push(value);
        self
    }
}

impl PresenceVerifier for MemoryPresenceVerifier {
    fn exists(&self, table: &str, column: &str, value: &Value) -> Result<bool, VerifierError> {
        Ok(self
            .records
            .get(&(table.to_string(), column.to_string()))
            .is_some_and(|values| values.contains(value)))
    }
}
