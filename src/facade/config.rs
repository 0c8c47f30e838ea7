//! Serializable validator configuration.

use crate::facade::ValidatorError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration record consumed once by
/// [`ValidatorBuilder::config`](crate::facade::ValidatorBuilder::config).
///
/// Every field is optional in serialized form.
///
/// ```rust
/// use ruleline::facade::ValidatorConfig;
///
/// let config = ValidatorConfig::from_json(
///     r#"{ "exclude": ["url"], "messages": { "required": ":attribute is missing" } }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.exclude, vec!["url".to_string()]);
/// assert!(config.include_only.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Register only these default rules. Takes precedence over `exclude`.
    pub include_only: Vec<String>,
    /// Default rules to leave out.
    pub exclude: Vec<String>,
    /// Custom messages keyed by `rule` or `rule.field`.
    pub messages: HashMap<String, String>,
    /// Display names keyed by field.
    pub attributes: HashMap<String, String>,
}

impl ValidatorConfig {
    pub fn from_json(json: &str) -> Result<Self, ValidatorError> {
        Ok(serde_json::from_str(json)?)
    }
}
