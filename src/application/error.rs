use std::error::Error as StdError;

use thiserror::Error;
use tracing::error;

use crate::domain::error::DomainError;

/// Failure taxonomy for calls against the blog API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error(
        "request failed with status {status}: {}",
        .message.as_deref().or(.first_error.as_deref()).unwrap_or("no message")
    )]
    Status {
        status: u16,
        /// Top-level `message` of the error body.
        message: Option<String>,
        /// `errors[0].message` of the error body.
        first_error: Option<String>,
    },
    #[error("missing session: {0}")]
    MissingSession(&'static str),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        Self::Network(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Top-level `message` the API attached to an error response, if any.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Message of the first entry in the response's `errors` list, if any.
    pub fn first_error_message(&self) -> Option<&str> {
        match self {
            Self::Status { first_error, .. } => first_error.as_deref(),
            _ => None,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Flattened error chain attached to a log line.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = vec![error.to_string()];
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }

    pub fn from_message(source: &'static str, message: impl Into<String>) -> Self {
        Self {
            source,
            messages: vec![message.into()],
        }
    }

    pub fn log(&self) {
        error!(
            source = self.source,
            chain = %self.messages.join(": "),
            "operation failed"
        );
    }
}
