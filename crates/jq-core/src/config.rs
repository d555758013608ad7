//! Configuration types and loading
//!
//! Defaults match what the issue navigator form posts; environment variables can override
//! them for installations that renamed the cascade function or the sentinel values.

use serde::{Deserialize, Serialize};

/// Top-level configuration for reconcilers and the context resolver
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Issue navigator form settings
    #[serde(default)]
    pub navigator: NavigatorConfig,

    /// Query context settings
    #[serde(default)]
    pub context: ContextConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavigatorConfig {
    /// Form values meaning "any value"; they never produce a clause
    pub all_values: Vec<String>,
    /// Name of the function encoding parent/child selections of cascading fields
    pub cascade_function: String,
    /// Argument of the cascade function meaning "no child selected"
    pub cascade_none_keyword: String,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            all_values: vec!["-1".to_string(), String::new()],
            cascade_function: "cascadeOption".to_string(),
            cascade_none_keyword: "none".to_string(),
        }
    }
}

impl NavigatorConfig {
    pub fn is_all_value(&self, value: &str) -> bool {
        let value = value.trim();
        self.all_values.iter().any(|v| v == value)
    }

    pub fn is_cascade_function(&self, name: &str) -> bool {
        self.cascade_function.eq_ignore_ascii_case(name)
    }

    pub fn is_none_keyword(&self, arg: &str) -> bool {
        self.cascade_none_keyword.eq_ignore_ascii_case(arg.trim())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContextConfig {
    pub project_clause_names: Vec<String>,
    pub issue_type_clause_names: Vec<String>,
    /// Return the global scope instead of an empty one
    pub widen_empty: bool,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            project_clause_names: vec!["project".to_string()],
            issue_type_clause_names: vec!["issuetype".to_string(), "type".to_string()],
            widen_empty: true,
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl SearchConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(values) = std::env::var("JQL_NAVIGATOR_ALL_VALUES") {
            config.navigator.all_values = values.split(',').map(|v| v.trim().to_string()).collect();
        }
        if let Ok(name) = std::env::var("JQL_CASCADE_FUNCTION") {
            config.navigator.cascade_function = name.trim().to_string();
        }
        if let Ok(keyword) = std::env::var("JQL_CASCADE_NONE_KEYWORD") {
            config.navigator.cascade_none_keyword = keyword.trim().to_string();
        }
        if let Ok(widen) = std::env::var("JQL_CONTEXT_WIDEN_EMPTY") {
            config.context.widen_empty = widen == "true" || widen == "1";
        }

        config.validate()?;
        tracing::debug!(
            cascade_function = %config.navigator.cascade_function,
            all_values = ?config.navigator.all_values,
            "loaded search config"
        );
        Ok(config)
    }

    /// Load configuration from a JSON document; missing sections take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.navigator.cascade_function.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "navigator.cascade_function".to_string(),
                message: "must not be blank".to_string(),
            });
        }
        if self.context.project_clause_names.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "context.project_clause_names".to_string(),
                message: "at least one clause name is required".to_string(),
            });
        }
        Ok(())
    }
}
