use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Content API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Entry {entry_id} has no usable value for field '{field}'")]
    MissingField { entry_id: String, field: String },

    #[error("Entry {entry_id} references '{target_id}' through '{field}', but it was not included")]
    UnresolvedReference {
        entry_id: String,
        field: String,
        target_id: String,
    },

    #[error("No '{content_type}' entry exists")]
    MissingSingleton { content_type: String },

    #[error("No '{content_type}' entries to choose from")]
    EmptyCollection { content_type: String },

    #[error("Invalid date '{value}'")]
    InvalidDate { value: String },

    #[error("Invalid colour '{value}': {reason}")]
    InvalidColor { value: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ContentError {
    /// Transport and availability failures, as opposed to bad content or config.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::HttpError(_) | Self::ApiError { .. })
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::HttpError(_) | Self::ApiError { .. } => ErrorSeverity::Medium,
            Self::MissingField { .. }
            | Self::UnresolvedReference { .. }
            | Self::InvalidDate { .. }
            | Self::InvalidColor { .. }
            | Self::SerializationError(_) => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingSingleton { .. }
            | Self::EmptyCollection { .. }
            | Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(_) | Self::ApiError { .. } => {
                format!("The content store could not be reached: {}", self)
            }
            Self::MissingSingleton { content_type } | Self::EmptyCollection { content_type } => {
                format!(
                    "The content model is incomplete: publish at least one '{}' entry",
                    content_type
                )
            }
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => {
                format!("Check the Contentful settings: {}", self)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
