//! Configuration types for the REST service.
//!
//! This module provides the configuration used to build a
//! [`RestClient`](crate::clients::RestClient) and its
//! [`ResponseInterceptor`](crate::clients::ResponseInterceptor).
//!
//! # Overview
//!
//! - [`RestConfig`]: The main configuration struct
//! - [`RestConfigBuilder`]: A builder for constructing [`RestConfig`] instances
//! - [`BaseUrl`]: A validated base URL for relative call URLs
//!
//! # Example
//!
//! ```rust
//! use rest_service::{BaseUrl, RestConfig};
//!
//! let config = RestConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com").unwrap())
//!     .debug(true)
//!     .redirect_target(["errors", "forbidden"])
//!     .build()
//!     .unwrap();
//!
//! assert!(config.debug());
//! assert_eq!(config.redirect_target(), ["errors", "forbidden"]);
//! ```

mod newtypes;

pub use newtypes::BaseUrl;

use crate::clients::InterceptorConfig;
use crate::error::ConfigError;

/// Default redirect target navigated to on authorization failure.
pub const DEFAULT_REDIRECT_TARGET: &str = "403";

/// Default identity-check ("who am I") path.
pub const DEFAULT_IDENTITY_CHECK_PATH: &str = "api/who-am-i";

/// Default message for status 0 transport failures.
pub const DEFAULT_UNKNOWN_ERROR_MESSAGE: &str = "Unknown Error";

/// Default message for status 401 failures without a payload.
pub const DEFAULT_FORBIDDEN_ERROR_MESSAGE: &str = "Forbidden Error";

/// Configuration for the REST service.
///
/// # Thread Safety
///
/// `RestConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use rest_service::RestConfig;
///
/// let config = RestConfig::default();
/// assert!(config.redirect_on_auth_failure());
/// assert_eq!(config.identity_check_path(), "api/who-am-i");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestConfig {
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    debug: bool,
    redirect_on_auth_failure: bool,
    redirect_target: Vec<String>,
    identity_check_path: String,
    unknown_error_message: String,
    forbidden_error_message: String,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            user_agent_prefix: None,
            debug: false,
            redirect_on_auth_failure: true,
            redirect_target: vec![DEFAULT_REDIRECT_TARGET.to_string()],
            identity_check_path: DEFAULT_IDENTITY_CHECK_PATH.to_string(),
            unknown_error_message: DEFAULT_UNKNOWN_ERROR_MESSAGE.to_string(),
            forbidden_error_message: DEFAULT_FORBIDDEN_ERROR_MESSAGE.to_string(),
        }
    }
}

impl RestConfig {
    /// Creates a new builder for constructing a `RestConfig`.
    #[must_use]
    pub fn builder() -> RestConfigBuilder {
        RestConfigBuilder::new()
    }

    /// Returns the base URL, if configured.
    #[must_use]
    pub const fn base_url(&self) -> Option<&BaseUrl> {
        self.base_url.as_ref()
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns whether failed calls are logged before being propagated.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Returns whether authorization failures trigger a redirect.
    #[must_use]
    pub const fn redirect_on_auth_failure(&self) -> bool {
        self.redirect_on_auth_failure
    }

    /// Returns the path segments navigated to on authorization failure.
    #[must_use]
    pub fn redirect_target(&self) -> &[String] {
        &self.redirect_target
    }

    /// Returns the identity-check path substring.
    #[must_use]
    pub fn identity_check_path(&self) -> &str {
        &self.identity_check_path
    }

    /// Returns the message used for status 0 failures.
    #[must_use]
    pub fn unknown_error_message(&self) -> &str {
        &self.unknown_error_message
    }

    /// Returns the fallback message used for status 401 failures.
    #[must_use]
    pub fn forbidden_error_message(&self) -> &str {
        &self.forbidden_error_message
    }

    /// Derives the interceptor settings from this configuration.
    #[must_use]
    pub fn interceptor_config(&self) -> InterceptorConfig {
        InterceptorConfig {
            debug: self.debug,
            redirect_on_auth_failure: self.redirect_on_auth_failure,
            redirect_target: self.redirect_target.clone(),
            identity_check_path: self.identity_check_path.clone(),
            unknown_error_message: self.unknown_error_message.clone(),
            forbidden_error_message: self.forbidden_error_message.clone(),
        }
    }
}

// Verify RestConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestConfig>();
};

/// Builder for constructing [`RestConfig`] instances.
///
/// Every field is optional.
///
/// # Defaults
///
/// - `base_url`: `None` (call URLs are used as given)
/// - `user_agent_prefix`: `None`
/// - `debug`: `false`
/// - `redirect_on_auth_failure`: `true`
/// - `redirect_target`: `["403"]`
/// - `identity_check_path`: `"api/who-am-i"`
/// - `unknown_error_message`: `"Unknown Error"`
/// - `forbidden_error_message`: `"Forbidden Error"`
#[derive(Debug, Default)]
pub struct RestConfigBuilder {
    base_url: Option<BaseUrl>,
    user_agent_prefix: Option<String>,
    debug: Option<bool>,
    redirect_on_auth_failure: Option<bool>,
    redirect_target: Option<Vec<String>>,
    identity_check_path: Option<String>,
    unknown_error_message: Option<String>,
    forbidden_error_message: Option<String>,
}

impl RestConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL relative call URLs are joined to.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Enables logging of failed calls.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Enables or disables the redirect on authorization failure.
    #[must_use]
    pub const fn redirect_on_auth_failure(mut self, enabled: bool) -> Self {
        self.redirect_on_auth_failure = Some(enabled);
        self
    }

    /// Sets the path segments navigated to on authorization failure.
    #[must_use]
    pub fn redirect_target<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.redirect_target = Some(segments.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the identity-check path substring.
    #[must_use]
    pub fn identity_check_path(mut self, path: impl Into<String>) -> Self {
        self.identity_check_path = Some(path.into());
        self
    }

    /// Sets the message used for status 0 failures.
    #[must_use]
    pub fn unknown_error_message(mut self, message: impl Into<String>) -> Self {
        self.unknown_error_message = Some(message.into());
        self
    }

    /// Sets the fallback message used for status 401 failures.
    #[must_use]
    pub fn forbidden_error_message(mut self, message: impl Into<String>) -> Self {
        self.forbidden_error_message = Some(message.into());
        self
    }

    /// Builds the [`RestConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyRedirectTarget`] if the redirect target
    /// has no segments, and [`ConfigError::EmptyIdentityCheckPath`] if the
    /// identity-check path is empty.
    pub fn build(self) -> Result<RestConfig, ConfigError> {
        let defaults = RestConfig::default();

        let redirect_target = self.redirect_target.unwrap_or(defaults.redirect_target);
        if redirect_target.is_empty() {
            return Err(ConfigError::EmptyRedirectTarget);
        }

        let identity_check_path = self
            .identity_check_path
            .unwrap_or(defaults.identity_check_path);
        if identity_check_path.is_empty() {
            return Err(ConfigError::EmptyIdentityCheckPath);
        }

        Ok(RestConfig {
            base_url: self.base_url,
            user_agent_prefix: self.user_agent_prefix,
            debug: self.debug.unwrap_or(defaults.debug),
            redirect_on_auth_failure: self
                .redirect_on_auth_failure
                .unwrap_or(defaults.redirect_on_auth_failure),
            redirect_target,
            identity_check_path,
            unknown_error_message: self
                .unknown_error_message
                .unwrap_or(defaults.unknown_error_message),
            forbidden_error_message: self
                .forbidden_error_message
                .unwrap_or(defaults.forbidden_error_message),
        })
    }
}
