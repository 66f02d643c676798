//! Error types for the REST service configuration.
//!
//! This module contains the error type raised while building and
//! validating configuration values. Errors raised by individual calls live
//! in [`crate::clients`].
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use rest_service::{BaseUrl, ConfigError};
//!
//! let result = BaseUrl::new("not a url");
//! assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while configuring the REST service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// The redirect target used on authorization failure has no segments.
    #[error("Redirect target cannot be empty. Provide at least one path segment (e.g., [\"403\"]).")]
    EmptyRedirectTarget,

    /// The identity-check path used to detect authorization probes is empty.
    #[error("Identity-check path cannot be empty. An empty path would match every URL.")]
    EmptyIdentityCheckPath,
}
