use crate::config::{ContentConfig, DisplayConfig};
use crate::utils::error::{ContentError, Result};
use crate::utils::validation::Validate;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Site configuration file.
///
/// ```toml
/// [contentful]
/// space_id = "${CONTENTFUL_SPACE_ID}"
/// delivery_token = "${CONTENTFUL_DELIVERY_TOKEN}"
///
/// [display]
/// date_format = "%d/%m/%Y"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub contentful: ContentConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl TomlConfig {
    /// Loads and parses a TOML settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ContentError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ContentError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references with environment values; an unset
    /// variable is a `MissingConfigError`.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ContentError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let mut missing: Option<String> = None;
        let result = re.replace_all(content, |caps: &Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.get_or_insert_with(|| var_name.to_string());
                String::new()
            })
        });

        match missing {
            Some(field) => Err(ContentError::MissingConfigError { field }),
            None => Ok(result.to_string()),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.contentful.validate()?;
        if self.display.date_format.trim().is_empty() {
            return Err(ContentError::InvalidConfigValueError {
                field: "display.date_format".to_string(),
                value: self.display.date_format.clone(),
                reason: "Date format cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}
