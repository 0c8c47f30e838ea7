//! Ruleline: field validation driven by compact rule strings
//!
//! Rules are written per field as `"bail|required|min:3|in:a,b"` and run
//! against a JSON-shaped map of input fields. The library is layered:
//!
//! # Core Concepts
//!
//! - **Parser**: turns a rule string into ordered rule invocations
//! - **Registry**: maps rule names to constructors, shared across runs
//! - **Rules**: the built-in predicates, plus any closures you register
//! - **Messages**: per-rule templates with `:attribute`/`:paramN` placeholders
//! - **Engine**: runs every field's rules and collects the failures
//! - **Facade**: typed input, list-form rules and Stillwater `Validation` results
//!
//! # Example
//!
//! ```rust
//! use ruleline::Validator;
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let validator = Validator::new();
//! let rules = HashMap::from([
//!     ("name".to_string(), "bail|required|min:3".to_string()),
//!     ("role".to_string(), "in:admin,editor".to_string()),
//! ]);
//!
//! let errors = validator
//!     .validate_with_result(&json!({ "name": "", "role": "guest" }), &rules)
//!     .unwrap();
//!
//! assert_eq!(errors.get("name"), ["The name field is required"]);
//! assert_eq!(errors.field_error("role"), "The selected role is invalid");
//! ```

pub mod core;
pub mod engine;
pub mod facade;
pub mod message;
pub mod parser;
pub mod registry;
mod rules;

// Re-export commonly used types
pub use core::{
    FnRule, Rule, RuleConstructor, RuleError, RuleFailure, ValidationContext, ValidationErrors,
};
pub use engine::Engine;
pub use facade::{
    FieldError, ValidationRequest, Validator, ValidatorBuilder, ValidatorConfig, ValidatorError,
};
pub use message::MessageResolver;
pub use parser::{parse, ParsedRuleSet, RenderError, RuleInvocation};
pub use registry::{RegistryBuilder, RuleRegistry};
