//! Error types for the API client.
//!
//! # Design
//! Every variant displays as a bare human-readable message, so callers that
//! only print the error see the server's `detail` text (or the fallback)
//! unchanged. Callers that need to tell a dead network apart from a 4xx/5xx
//! can match on the variant instead of inspecting the message.

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Errors returned by `ApiClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport failed before a response arrived. Displays as the
    /// transport's own error.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status. `message` is the `detail`
    /// field of the error body, or the fallback message.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The response body was not valid JSON, or did not match the requested
    /// type.
    #[error("{0}")]
    Deserialization(String),

    /// The request body could not be serialized to JSON.
    #[error("{0}")]
    Serialization(String),
}

impl ApiError {
    /// HTTP status of a `Status` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

/// Failure raised by a `Transport` before any response was received.
///
/// Wraps the transport's original error without rewording it.
#[derive(Debug)]
pub struct TransportError {
    inner: Box<dyn StdError + Send + Sync + 'static>,
}

impl TransportError {
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self { inner: err.into() }
    }

    /// The original error, for downcasting.
    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        &*self.inner
    }

    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.inner
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::new(err)
    }
}
