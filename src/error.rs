//! Application error types.
//!
//! These errors are serializable so the display layer can report structured
//! failure details next to the control that triggered the request.

use serde::Serialize;
use thiserror::Error;

/// Application-level errors returned by the review client.
///
/// All variants serialize to a structured JSON object for display consumption.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum AppError {
    /// Network request failed or timed out.
    #[error("Network error: {message}")]
    Network { message: String },

    /// Match service answered with a non-success status.
    #[error("API error: {message}")]
    Api {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
        #[serde(skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
    },

    /// Response body does not follow the endpoint contract.
    #[error("Malformed response from {endpoint}: {message}")]
    MalformedResponse { message: String, endpoint: String },

    /// Invalid input provided.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        field: Option<String>,
    },

    /// Operation is not allowed in the current review state.
    #[error("Invalid review state: {message}")]
    InvalidState { message: String },

    /// Internal application error.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create an API error.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            status_code: None,
            endpoint: None,
        }
    }

    /// Create an API error with status code and endpoint.
    pub fn api_full(message: impl Into<String>, status_code: u16, endpoint: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
            status_code: Some(status_code),
            endpoint: Some(endpoint.into()),
        }
    }

    /// Create a malformed response error for an endpoint.
    pub fn malformed(message: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: None,
        }
    }

    /// Create an invalid input error with field name.
    pub fn invalid_input_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create an invalid review state error.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether this error came from talking to the match service.
    ///
    /// Transport failures are the only errors surfaced to the reviewer; the
    /// triggering control is re-enabled so the action can be retried.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Api { .. } | Self::MalformedResponse { .. }
        )
    }

    /// Get the HTTP status code if this is an API error that carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

// Conversions from common error types

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network("Request timed out")
        } else if err.is_connect() {
            Self::network("Failed to connect to server")
        } else if err.is_status() {
            match err.status() {
                Some(status) => Self::Api {
                    message: format!("HTTP error: {}", err),
                    status_code: Some(status.as_u16()),
                    endpoint: err.url().map(|u| u.path().to_string()),
                },
                None => Self::api(format!("HTTP error: {}", err)),
            }
        } else {
            Self::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::internal(format!("JSON error: {}", err))
    }
}
