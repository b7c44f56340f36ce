#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::utils::date::DEFAULT_DATE_FORMAT;
use crate::utils::error::{ContentError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};

pub const DELIVERY_HOST: &str = "cdn.contentful.com";
pub const PREVIEW_HOST: &str = "preview.contentful.com";

/// Connection settings for the Contentful delivery and preview APIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub space_id: String,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default)]
    pub delivery_token: Option<String>,
    #[serde(default)]
    pub preview_token: Option<String>,
    /// Read drafts from the preview API instead of published content.
    #[serde(default)]
    pub preview: bool,
    /// Replaces `https://{host}`, e.g. for a local proxy.
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

fn default_environment() -> String {
    "master".to_string()
}

impl ContentConfig {
    pub fn new(space_id: impl Into<String>, delivery_token: impl Into<String>) -> Self {
        Self {
            space_id: space_id.into(),
            environment: default_environment(),
            delivery_token: Some(delivery_token.into()),
            preview_token: None,
            preview: false,
            api_base_url: None,
            locale: None,
            timeout_seconds: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from `CONTENTFUL_*` variables; `DEV` set to any
    /// non-empty value switches to preview mode.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let space_id = var("CONTENTFUL_SPACE_ID").ok_or_else(|| ContentError::MissingConfigError {
            field: "CONTENTFUL_SPACE_ID".to_string(),
        })?;

        let timeout_seconds = match var("CONTENTFUL_TIMEOUT_SECONDS") {
            Some(raw) => Some(raw.parse().map_err(|_| ContentError::InvalidConfigValueError {
                field: "CONTENTFUL_TIMEOUT_SECONDS".to_string(),
                value: raw.clone(),
                reason: "expected a whole number of seconds".to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            space_id,
            environment: var("CONTENTFUL_ENVIRONMENT").unwrap_or_else(default_environment),
            delivery_token: var("CONTENTFUL_DELIVERY_TOKEN"),
            preview_token: var("CONTENTFUL_PREVIEW_TOKEN"),
            preview: var("DEV").is_some(),
            api_base_url: var("CONTENTFUL_HOST").map(|host| {
                if host.contains("://") {
                    host
                } else {
                    format!("https://{}", host)
                }
            }),
            locale: var("CONTENTFUL_LOCALE"),
            timeout_seconds,
        })
    }

    pub fn host(&self) -> &str {
        if self.preview {
            PREVIEW_HOST
        } else {
            DELIVERY_HOST
        }
    }

    pub fn base_url(&self) -> String {
        match &self.api_base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.host()),
        }
    }

    /// The token matching the selected API.
    pub fn access_token(&self) -> Result<&str> {
        let (field, token) = if self.preview {
            ("preview_token", &self.preview_token)
        } else {
            ("delivery_token", &self.delivery_token)
        };
        validate_required_field(field, token).map(String::as_str)
    }
}

impl Validate for ContentConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("space_id", &self.space_id)?;
        validate_non_empty_string("environment", &self.environment)?;
        validate_non_empty_string("access_token", self.access_token()?)?;
        validate_url("api_base_url", &self.base_url())?;

        if let Some(timeout) = self.timeout_seconds {
            validate_range("timeout_seconds", timeout, 1, 300)?;
        }

        Ok(())
    }
}

/// How records are presented to the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// `chrono` format string for article start/end dates.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
        }
    }
}
