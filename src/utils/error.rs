use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrudError {
    #[error("Invalid argument: {argument} cannot be empty")]
    InvalidArgument { argument: &'static str },

    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Storage,
    Configuration,
}

impl CrudError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        CrudError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CrudError::InvalidArgument { .. } | CrudError::ValidationError { .. } => {
                ErrorCategory::Input
            }
            CrudError::IoError(_)
            | CrudError::SerializationError(_)
            | CrudError::StorageError { .. } => ErrorCategory::Storage,
            CrudError::ConfigError { .. } | CrudError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    /// 給終端使用者看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            CrudError::InvalidArgument { argument } => {
                format!("Missing required input: {}", argument)
            }
            CrudError::ValidationError { message, .. } => message.clone(),
            CrudError::IoError(e) => format!("Could not access the data store: {}", e),
            CrudError::SerializationError(_) => {
                "The data store contains malformed data".to_string()
            }
            CrudError::StorageError { message } => message.clone(),
            CrudError::ConfigError { message } => format!("Configuration problem: {}", message),
            CrudError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CrudError>;
