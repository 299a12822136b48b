use crate::models::account::Platform;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),
    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),
    #[error("Account store error: {message}")]
    Store { message: String },
    #[error("Failed to read configuration")]
    ConfigurationError {
        #[source]
        source: Box<figment::Error>,
    },
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

impl AppError {
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store { message: message.into() }
    }
}

impl From<figment::Error> for AppError {
    fn from(e: figment::Error) -> Self {
        AppError::ConfigurationError { source: Box::new(e) }
    }
}

/// Failure of a single data source fetch. Never escapes the spend aggregator.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{platform} request failed: {message}")]
    RequestFailed { platform: Platform, message: String },
    #[error("{platform} reported an unsuccessful query")]
    Rejected { platform: Platform },
    #[error("No fetcher registered for {0}")]
    UnsupportedPlatform(Platform),
    #[error("Fetch task did not complete: {0}")]
    TaskFailed(String),
}

impl SourceError {
    pub fn request_failed(platform: Platform, message: impl Into<String>) -> Self {
        Self::RequestFailed {
            platform,
            message: message.into(),
        }
    }
}
