//! Response interception and error normalization.
//!
//! Every call made by [`RestClient`](crate::clients::RestClient) settles
//! through a [`ResponseInterceptor`]. The interceptor decides the outcome:
//!
//! | Outcome from transport        | Result                                      |
//! |-------------------------------|---------------------------------------------|
//! | Response with status 200/204  | Response passed through unchanged           |
//! | Response with any other status| `NormalizedError` (status text as message)  |
//! | Failure with status 0         | `NormalizedError` ("Unknown Error")         |
//! | Failure with status 401       | `NormalizedError` (payload or "Forbidden Error") |
//! | Failure with any other status | `NormalizedError` (empty message)           |
//!
//! For every error, a status of 403 or a URL containing the identity-check
//! path triggers the [`Navigator`] with the configured redirect target,
//! unless redirects are disabled. The [`PostCallHook`] runs exactly once
//! per call, whatever the outcome.

use std::future::Future;
use std::sync::Arc;

use crate::clients::errors::{NormalizedError, TransportFailure};
use crate::clients::http_response::HttpResponse;
use crate::config::{
    DEFAULT_FORBIDDEN_ERROR_MESSAGE, DEFAULT_IDENTITY_CHECK_PATH, DEFAULT_REDIRECT_TARGET,
    DEFAULT_UNKNOWN_ERROR_MESSAGE,
};

/// Settings that drive a [`ResponseInterceptor`].
///
/// Usually derived from [`RestConfig::interceptor_config`](crate::RestConfig::interceptor_config).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterceptorConfig {
    /// Log errors before propagating them.
    pub debug: bool,
    /// Navigate on authorization failure.
    pub redirect_on_auth_failure: bool,
    /// Path segments navigated to on authorization failure.
    pub redirect_target: Vec<String>,
    /// URL substring identifying identity-check calls.
    pub identity_check_path: String,
    /// Message for status 0 failures.
    pub unknown_error_message: String,
    /// Fallback message for status 401 failures.
    pub forbidden_error_message: String,
}

impl Default for InterceptorConfig {
    fn default() -> Self {
        Self {
            debug: false,
            redirect_on_auth_failure: true,
            redirect_target: vec![DEFAULT_REDIRECT_TARGET.to_string()],
            identity_check_path: DEFAULT_IDENTITY_CHECK_PATH.to_string(),
            unknown_error_message: DEFAULT_UNKNOWN_ERROR_MESSAGE.to_string(),
            forbidden_error_message: DEFAULT_FORBIDDEN_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Navigates the host application, used on authorization failure.
pub trait Navigator: Send + Sync {
    /// Navigates to the given path segments.
    fn navigate(&self, segments: &[String]);
}

impl<F> Navigator for F
where
    F: Fn(&[String]) + Send + Sync,
{
    fn navigate(&self, segments: &[String]) {
        self(segments);
    }
}

/// Runs after every settled call.
pub trait PostCallHook: Send + Sync {
    /// Called once per call, after success or failure.
    fn after_call(&self);
}

impl<F> PostCallHook for F
where
    F: Fn() + Send + Sync,
{
    fn after_call(&self) {
        self();
    }
}

/// A hook that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHook;

impl PostCallHook for NoopHook {
    fn after_call(&self) {}
}

/// Normalizes call outcomes into a response or a [`NormalizedError`].
///
/// Holds no per-call state; one interceptor can serve any number of
/// concurrent calls.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use rest_service::clients::{
///     HttpResponse, InterceptorConfig, ResponseBody, ResponseInterceptor, TransportFailure,
/// };
///
/// let interceptor = ResponseInterceptor::new(
///     InterceptorConfig::default(),
///     Arc::new(|segments: &[String]| println!("navigate to {segments:?}")),
/// );
///
/// let ok = HttpResponse::new(200, "OK", ResponseBody::default());
/// assert!(interceptor.handle(Ok(ok)).is_ok());
///
/// let offline = TransportFailure::network(None, "connection refused");
/// let error = interceptor.handle(Err(offline)).unwrap_err();
/// assert_eq!(error.status, 0);
/// assert_eq!(error.message, "Unknown Error");
/// ```
#[derive(Clone)]
pub struct ResponseInterceptor {
    config: InterceptorConfig,
    navigator: Arc<dyn Navigator>,
    post_hook: Arc<dyn PostCallHook>,
}

impl std::fmt::Debug for ResponseInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseInterceptor")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// Verify ResponseInterceptor is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResponseInterceptor>();
};

impl ResponseInterceptor {
    /// Creates an interceptor with a no-op post-call hook.
    #[must_use]
    pub fn new(config: InterceptorConfig, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            config,
            navigator,
            post_hook: Arc::new(NoopHook),
        }
    }

    /// Replaces the post-call hook.
    #[must_use]
    pub fn with_post_hook(mut self, hook: Arc<dyn PostCallHook>) -> Self {
        self.post_hook = hook;
        self
    }

    /// Returns the interceptor settings.
    #[must_use]
    pub const fn config(&self) -> &InterceptorConfig {
        &self.config
    }

    /// Awaits a transport call and normalizes its outcome.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizedError`] for every outcome except a 200 or 204
    /// response.
    pub async fn intercept<F>(&self, call: F) -> Result<HttpResponse, NormalizedError>
    where
        F: Future<Output = Result<HttpResponse, TransportFailure>> + Send,
    {
        self.handle(call.await)
    }

    /// Normalizes a settled outcome and runs the post-call hook.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizedError`] for every outcome except a 200 or 204
    /// response.
    pub fn handle(
        &self,
        outcome: Result<HttpResponse, TransportFailure>,
    ) -> Result<HttpResponse, NormalizedError> {
        let result = match outcome {
            Ok(response) if matches!(response.status, 200 | 204) => Ok(response),
            Ok(response) => Err(self.application_error(response)),
            Err(failure) => Err(self.transport_error(failure)),
        };
        self.post_hook.after_call();
        result
    }

    /// Returns whether an error with this status and URL is an
    /// authorization failure.
    ///
    /// An empty identity-check path disables the URL check.
    #[must_use]
    pub fn is_auth_failure(&self, status: u16, url: Option<&str>) -> bool {
        let identity_path = self.config.identity_check_path.as_str();
        status == 403
            || (!identity_path.is_empty() && url.is_some_and(|url| url.contains(identity_path)))
    }

    fn application_error(&self, response: HttpResponse) -> NormalizedError {
        let error = NormalizedError::new(
            response.status,
            response.status_text,
            response.body.to_value(),
        );
        if self.config.debug {
            tracing::error!(
                status = error.status,
                body = %error.body,
                "[ErrorWS]: {}",
                error.message
            );
        }
        self.check_authorization(error.status, response.url.as_deref());
        error
    }

    fn transport_error(&self, failure: TransportFailure) -> NormalizedError {
        if self.config.debug {
            tracing::error!(
                status = failure.status,
                url = ?failure.url,
                error = ?failure.error,
                "[Fatal]: {}",
                failure.message
            );
        }

        let message = match failure.status {
            0 => self.config.unknown_error_message.clone(),
            401 => Self::payload_message(failure.error.as_ref())
                .unwrap_or_else(|| self.config.forbidden_error_message.clone()),
            _ => String::new(),
        };

        self.check_authorization(failure.status, failure.url.as_deref());

        NormalizedError::new(
            failure.status,
            message,
            failure.error.unwrap_or_else(|| serde_json::json!({})),
        )
    }

    /// Renders a failure payload as a message. Empty payloads yield `None`.
    fn payload_message(payload: Option<&serde_json::Value>) -> Option<String> {
        match payload? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    fn check_authorization(&self, status: u16, url: Option<&str>) {
        if !self.config.redirect_on_auth_failure || !self.is_auth_failure(status, url) {
            return;
        }
        tracing::warn!(
            status,
            url = url.unwrap_or_default(),
            "Authorization failure, redirecting to {:?}",
            self.config.redirect_target
        );
        self.navigator.navigate(&self.config.redirect_target);
    }
}
