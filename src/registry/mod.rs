//! Name -> constructor table for rules.
//!
//! The registry is built once and shared read-only across validation runs.
//! Reads take a shared `parking_lot` read lock, so any number of concurrent
//! `get`/`has`/`list` calls proceed without blocking each other; the rare
//! registration takes the write lock.
//!
//! `register` is last-write-wins: a second registration under the same name
//! replaces the first and logs a warning. `try_register` is the strict
//! variant that refuses to replace.
//!
//! # Example
//!
//! ```rust
//! use ruleline::core::FnRule;
//! use ruleline::registry::RuleRegistry;
//!
//! let registry = RuleRegistry::new();
//! registry
//!     .register("even", FnRule::constructor("even", "The :attribute must be even", |ctx| {
//!         ctx.value().as_i64().is_some_and(|n| n % 2 == 0)
//!     }))
//!     .unwrap();
//!
//! assert!(registry.has("even"));
//! assert_eq!(registry.count(), 1);
//! ```

pub mod builder;
pub mod error;
pub mod verifier;

pub use builder::RegistryBuilder;
pub use error::RegistryError;
pub use verifier::{MemoryPresenceVerifier, PasswordVerifier, PresenceVerifier, Verifiers};

use crate::core::RuleConstructor;
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Registry of rule constructors keyed by rule name.
#[derive(Default)]
pub struct RuleRegistry {
    constructors: RwLock<HashMap<String, RuleConstructor>>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with every default rule.
    pub fn with_defaults() -> Self {
        RegistryBuilder::new().build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Register `constructor` under `name`, replacing any previous entry.
    pub fn register(
        &self,
        name: impl Into<String>,
        constructor: RuleConstructor,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let previous = self.constructors.write().insert(name.clone(), constructor);
        if previous.is_some() {
            tracing::warn!(rule = %name, "replacing previously registered rule");
        }
        Ok(())
    }

    /// Register `constructor` under `name`, failing if the name is taken.
    pub fn try_register(
        &self,
        name: impl Into<String>,
        constructor: RuleConstructor,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }

        let mut constructors = self.constructors.write();
        if constructors.contains_key(&name) {
            return Err(RegistryError::AlreadyRegistered { name });
        }
        constructors.insert(name, constructor);
        Ok(())
    }

    /// Look up the constructor for `name`.
    pub fn get(&self, name: &str) -> Option<RuleConstructor> {
        self.constructors.read().get(name).cloned()
    }

    pub fn has(&self, name: &str) -> bool {
        self.constructors.read().contains_key(name)
    }

    /// Every registered name, sorted.
    pub fn list(&self) -> BTreeSet<String> {
        self.constructors.read().keys().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.constructors.read().len()
    }

    /// Remove `name`, returning its constructor if it was registered.
    pub fn remove(&self, name: &str) -> Option<RuleConstructor> {
        self.constructors.write().remove(name)
    }
}

/// Deep-copies the name table. Constructors are shared, so registering on
/// the clone never affects the original.
impl Clone for RuleRegistry {
    fn clone(&self) -> Self {
        Self {
            constructors: RwLock::new(self.constructors.read().clone()),
        }
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.list())
            .finish()
    }
}
