use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Service unreachable at {url}: {message}")]
    Unreachable { url: String, message: String },

    #[error("Request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    #[error("Service '{service}' is not registered in the catalogue")]
    ServiceNotFound { service: String },

    #[error("Downstream returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unsupported HTTP method: {method}")]
    UnsupportedMethod { method: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Coarse classification used by callers to pick a response without
/// matching on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unreachable,
    Timeout,
    InvalidResponse,
    NotFound,
    Downstream,
    Config,
}

impl ConsoleError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConsoleError::Unreachable { .. } => ErrorKind::Unreachable,
            ConsoleError::Timeout { .. } => ErrorKind::Timeout,
            ConsoleError::InvalidResponse { .. } => ErrorKind::InvalidResponse,
            ConsoleError::ServiceNotFound { .. } => ErrorKind::NotFound,
            ConsoleError::Status { .. } => ErrorKind::Downstream,
            ConsoleError::UnsupportedMethod { .. }
            | ConsoleError::ConfigError { .. }
            | ConsoleError::InvalidConfigValueError { .. }
            | ConsoleError::IoError(_) => ErrorKind::Config,
        }
    }

    /// Short message safe to show to an operator. Never includes downstream bodies.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ConsoleError::Unreachable { .. } => "A backend service could not be reached".to_string(),
            ConsoleError::Timeout { timeout, .. } => {
                format!("A backend service did not answer within {:?}", timeout)
            }
            ConsoleError::InvalidResponse { .. } => {
                "A backend service returned an unreadable response".to_string()
            }
            ConsoleError::ServiceNotFound { service } => {
                format!("Service '{}' is not available right now", service)
            }
            ConsoleError::Status { status, .. } => {
                format!("A backend service rejected the request (status {})", status)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
