use crate::domain::model::ErrorDetail;
use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON format";

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Invalid JSON format: {0}")]
    MalformedInput(#[source] serde_json::Error),

    #[error("Validation failed: {}", .0.join("; "))]
    ValidationFailure(Vec<String>),

    #[error("Credential hashing failed: {message}")]
    HashingError {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Repository error: {message}")]
    RepositoryError {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl RegistrationError {
    pub fn hashing<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::HashingError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn repository<E>(message: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::RepositoryError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Transport-level status for this failure. Caller mistakes are 400,
    /// everything else is ours.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MalformedInput(_) | Self::ValidationFailure(_) => 400,
            _ => 500,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            Self::MalformedInput(_) | Self::ValidationFailure(_) => "Validation failed",
            _ => "Internal server error",
        }
    }

    /// Detail attached to the error response outside production mode.
    pub fn detail(&self) -> ErrorDetail {
        match self {
            Self::MalformedInput(_) => ErrorDetail::Messages(vec![INVALID_JSON_MESSAGE.to_string()]),
            Self::ValidationFailure(messages) => ErrorDetail::Messages(messages.clone()),
            other => ErrorDetail::Message(other.to_string()),
        }
    }
}

/// Renders an error and every source below it, outermost first.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        rendered.push_str(" <- ");
        rendered.push_str(&cause.to_string());
        current = cause.source();
    }
    rendered
}

pub type Result<T> = std::result::Result<T, RegistrationError>;
