// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Service(ServiceError),
}

/// Failures reported by the story backend.
/// Used to decide between silent absorption and a localized alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Transport-level failure (offline, DNS, connection reset, timeout)
    Network(String),

    /// The story no longer exists (expired or already deleted)
    NotFound,

    /// The viewer may not perform this action
    Forbidden,

    /// The backend answered with an unexpected status
    Server { status: u16, message: String },

    /// Generic error with raw message
    Other(String),
}

impl ServiceError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ServiceError::Network(_) => "error-story-network",
            ServiceError::NotFound => "error-story-not-found",
            ServiceError::Forbidden => "error-story-forbidden",
            ServiceError::Server { .. } => "error-story-server",
            ServiceError::Other(_) => "error-story-general",
        }
    }

    /// Categorizes an HTTP status returned by the backend.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            404 | 410 => ServiceError::NotFound,
            401 | 403 => ServiceError::Forbidden,
            _ => ServiceError::Server {
                status,
                message: message.into(),
            },
        }
    }

    /// Returns true when retrying later could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            ServiceError::Network(_) => true,
            ServiceError::Server { status, .. } => *status >= 500,
            ServiceError::NotFound | ServiceError::Forbidden | ServiceError::Other(_) => false,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::Network(msg) => write!(f, "Network error: {}", msg),
            ServiceError::NotFound => write!(f, "Story not found"),
            ServiceError::Forbidden => write!(f, "Action not allowed"),
            ServiceError::Server { status, message } => {
                write!(f, "Server error {}: {}", status, message)
            }
            ServiceError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ServiceError {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Service(e) => write!(f, "Service Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<ServiceError> for Error {
    fn from(err: ServiceError) -> Self {
        Error::Service(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
