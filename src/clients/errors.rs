//! Error types for REST calls.
//!
//! # Error Handling
//!
//! Two kinds of failure exist below the caller:
//!
//! - [`TransportFailure`]: the transport's own error channel (connection
//!   errors, non-2xx statuses)
//! - application errors: a successful exchange whose status is neither
//!   200 nor 204
//!
//! Both are converted by the [`ResponseInterceptor`](crate::clients::ResponseInterceptor)
//! into a [`NormalizedError`], the only error type returned by
//! [`RestClient`](crate::clients::RestClient).
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_service::clients::{CallParams, NormalizedError};
//!
//! match client.get(CallParams::new("/users/{id}").url_param("id", 7)).await {
//!     Ok(response) => println!("User: {}", response.body),
//!     Err(NormalizedError { status: 0, message, .. }) => println!("Offline: {message}"),
//!     Err(error) => println!("Failed with {}: {}", error.status, error.message),
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single error shape surfaced for every failed call.
///
/// # Example
///
/// ```rust
/// use rest_service::clients::NormalizedError;
/// use serde_json::json;
///
/// let error = NormalizedError::new(418, "I'm a teapot", json!({"brew": "no"}));
/// assert_eq!(error.to_string(), "HTTP 418: I'm a teapot");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Serialize, Deserialize)]
#[error("HTTP {status}: {message}")]
pub struct NormalizedError {
    /// The HTTP status code, or 0 when no response was received.
    pub status: u16,
    /// A human-readable message. May be empty.
    pub message: String,
    /// The original failure payload, or an empty object if there was none.
    pub body: serde_json::Value,
}

impl NormalizedError {
    /// Creates a new normalized error.
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            status,
            message: message.into(),
            body,
        }
    }
}

/// A failure reported on the transport's error channel.
///
/// A `status` of 0 means no response was received (connection refused,
/// aborted, blocked).
#[derive(Clone, Debug, Error, PartialEq)]
#[error("Transport failure with status {status}: {message}")]
pub struct TransportFailure {
    /// The HTTP status code, or 0 when no response was received.
    pub status: u16,
    /// The URL of the failing call, if known.
    pub url: Option<String>,
    /// The decoded error payload, if the server sent one.
    pub error: Option<serde_json::Value>,
    /// A description of the failure from the transport.
    pub message: String,
}

impl TransportFailure {
    /// Creates a failure for a call that never received a response.
    #[must_use]
    pub fn network(url: Option<String>, message: impl Into<String>) -> Self {
        Self {
            status: 0,
            url,
            error: None,
            message: message.into(),
        }
    }

    /// Creates a failure for a non-2xx response.
    #[must_use]
    pub fn from_status(
        status: u16,
        url: Option<String>,
        error: Option<serde_json::Value>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status,
            url,
            error,
            message: message.into(),
        }
    }
}

/// Error returned when the default HTTP transport cannot be constructed.
#[derive(Debug, Error)]
#[error("Failed to build HTTP transport: {0}")]
pub struct TransportBuildError(#[from] pub reqwest::Error);
