//! REST client implementation.
//!
//! This module provides the [`RestClient`] type: verb methods that resolve a
//! [`CallParams`] into a [`TransportRequest`], send it through the injected
//! [`Transport`], and settle the outcome through the [`ResponseInterceptor`].

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::clients::errors::{NormalizedError, TransportBuildError};
use crate::clients::http_client::ReqwestTransport;
use crate::clients::http_request::{CallParams, HttpMethod};
use crate::clients::http_response::{HttpResponse, ResponseBody};
use crate::clients::interceptor::{Navigator, ResponseInterceptor};
use crate::clients::options::{
    declared_file_type, resolve_blob_options, resolve_body_options, resolve_options,
    RequestOptions,
};
use crate::clients::path::resolve_url;
use crate::clients::resource::{Blob, ObjectUrl, ResourceSanitizer, SafeResourceUrl, TrustingSanitizer};
use crate::clients::transport::{Transport, TransportRequest};
use crate::config::RestConfig;

/// REST client with declarative per-call configuration.
///
/// Provides `get`, `delete`, `post`, `put`, `patch` and `file`, each
/// taking a [`CallParams`]. Every failure reaches the caller as a
/// [`NormalizedError`].
///
/// # Thread Safety
///
/// `RestClient` is `Send + Sync` and holds no per-call state, so calls can
/// run concurrently.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use rest_service::{BaseUrl, RestConfig};
/// use rest_service::clients::{CallParams, RestClient};
///
/// let config = RestConfig::builder()
///     .base_url(BaseUrl::new("https://api.example.com").unwrap())
///     .build()
///     .unwrap();
///
/// let client = RestClient::from_config(&config, Arc::new(|to: &[String]| router.go(to)))?;
///
/// let response = client
///     .get(CallParams::new("/users/{id}").url_param("id", 7))
///     .await?;
///
/// let created = client
///     .post(CallParams::new("/users").json_body(serde_json::json!({"name": "Ana"})))
///     .await?;
/// ```
#[derive(Clone)]
pub struct RestClient {
    transport: Arc<dyn Transport>,
    interceptor: ResponseInterceptor,
    sanitizer: Arc<dyn ResourceSanitizer>,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("interceptor", &self.interceptor)
            .finish_non_exhaustive()
    }
}

// Verify RestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RestClient>();
};

impl RestClient {
    /// Creates a client over the given transport and interceptor.
    ///
    /// File downloads are certified with [`TrustingSanitizer`] until
    /// [`with_sanitizer`](Self::with_sanitizer) replaces it.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, interceptor: ResponseInterceptor) -> Self {
        Self {
            transport,
            interceptor,
            sanitizer: Arc::new(TrustingSanitizer),
        }
    }

    /// Creates a client over a [`ReqwestTransport`] built from `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - Base URL, user agent and interceptor settings
    /// * `navigator` - Called with the redirect target on authorization failure
    ///
    /// # Errors
    ///
    /// Returns [`TransportBuildError`] if the HTTP client cannot be created.
    pub fn from_config(
        config: &RestConfig,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, TransportBuildError> {
        let transport = ReqwestTransport::new(Some(config))?;
        let interceptor = ResponseInterceptor::new(config.interceptor_config(), navigator);
        Ok(Self::new(Arc::new(transport), interceptor))
    }

    /// Replaces the sanitizer used by [`file`](Self::file).
    #[must_use]
    pub fn with_sanitizer(mut self, sanitizer: Arc<dyn ResourceSanitizer>) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Returns the interceptor every call settles through.
    #[must_use]
    pub const fn interceptor(&self) -> &ResponseInterceptor {
        &self.interceptor
    }

    /// Resolves call params into a transport request without sending it.
    ///
    /// Bodies are only kept for POST, PUT and PATCH. A multipart body
    /// drops the `Content-Type` header.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rest_service::clients::{CallParams, HttpMethod, RestClient};
    ///
    /// let request = RestClient::resolve_request(
    ///     HttpMethod::Get,
    ///     CallParams::new("/test/with/{id}").url_param("id", 1),
    /// );
    ///
    /// assert_eq!(request.url, "/test/with/1");
    /// assert!(request.options.with_credentials);
    /// ```
    #[must_use]
    pub fn resolve_request(method: HttpMethod, params: CallParams) -> TransportRequest {
        let url = resolve_url(&params.url, Some(params.url_params.as_slice()));
        let body = if method.has_body() { params.body } else { None };
        let options = resolve_body_options(
            Some(&params.header),
            Some(params.query_params.as_slice()),
            body.as_ref(),
        );

        TransportRequest {
            method,
            url,
            body,
            options,
        }
    }

    /// Sends a GET request.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizedError`] unless the response status is 200 or 204.
    pub async fn get(&self, params: CallParams) -> Result<HttpResponse, NormalizedError> {
        self.send(Self::resolve_request(HttpMethod::Get, params))
            .await
    }

    /// Sends a DELETE request.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizedError`] unless the response status is 200 or 204.
    pub async fn delete(&self, params: CallParams) -> Result<HttpResponse, NormalizedError> {
        self.send(Self::resolve_request(HttpMethod::Delete, params))
            .await
    }

    /// Sends a POST request with the params' body.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizedError`] unless the response status is 200 or 204.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use rest_service::clients::{CallParams, FormData};
    ///
    /// // JSON body
    /// client.post(CallParams::new("/notes").json_body(json!({"text": "hi"}))).await?;
    ///
    /// // Multipart body; the transport sets the boundary
    /// let form = FormData::new().file("doc", bytes, "a.pdf", "application/pdf");
    /// client.post(CallParams::new("/uploads").form_body(form)).await?;
    /// ```
    pub async fn post(&self, params: CallParams) -> Result<HttpResponse, NormalizedError> {
        self.send(Self::resolve_request(HttpMethod::Post, params))
            .await
    }

    /// Sends a PUT request with the params' body.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizedError`] unless the response status is 200 or 204.
    pub async fn put(&self, params: CallParams) -> Result<HttpResponse, NormalizedError> {
        self.send(Self::resolve_request(HttpMethod::Put, params))
            .await
    }

    /// Sends a PATCH request with the params' body.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizedError`] unless the response status is 200 or 204.
    pub async fn patch(&self, params: CallParams) -> Result<HttpResponse, NormalizedError> {
        self.send(Self::resolve_request(HttpMethod::Patch, params))
            .await
    }

    /// Downloads a file as a [`Blob`].
    ///
    /// The request is resolved like [`get`](Self::get), but the response is
    /// kept as raw bytes and tagged with the declared content type
    /// (`content_type`, then `accept`, then `application/octet-stream`).
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizedError`] unless the response status is 200 or 204.
    pub async fn fetch_blob(&self, params: CallParams) -> Result<Blob, NormalizedError> {
        let content_type = declared_file_type(Some(&params.header));
        let url = resolve_url(&params.url, Some(params.url_params.as_slice()));
        let options = resolve_blob_options(Some(&params.header), Some(params.query_params.as_slice()));

        let response = self
            .send(TransportRequest {
                method: HttpMethod::Get,
                url,
                body: None,
                options,
            })
            .await?;

        let bytes = match response.body {
            ResponseBody::Bytes(bytes) => bytes,
            ResponseBody::Json(value) => value.to_string().into_bytes(),
        };
        Ok(Blob::new(bytes, content_type))
    }

    /// Downloads a file and returns a sanitized reference to it.
    ///
    /// The blob from [`fetch_blob`](Self::fetch_blob) is turned into an
    /// [`ObjectUrl`] and certified by the configured sanitizer.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizedError`] unless the response status is 200 or 204.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let pdf = client
    ///     .file(
    ///         CallParams::new("/reports/{id}")
    ///             .url_param("id", 3)
    ///             .header(HeaderParams::new().content_type("application/pdf")),
    ///     )
    ///     .await?;
    /// viewer.embed(pdf.as_ref());
    /// ```
    pub async fn file(&self, params: CallParams) -> Result<SafeResourceUrl, NormalizedError> {
        let blob = self.fetch_blob(params).await?;
        let object_url = ObjectUrl::from_blob(&blob);
        Ok(self.sanitizer.trust_resource_url(object_url))
    }

    /// Sends one GET with HTTP Basic credentials.
    ///
    /// Only the `Authorization` header is sent; credentials are included.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizedError`] unless the response status is 200 or 204.
    pub async fn authenticate(
        &self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<HttpResponse, NormalizedError> {
        let authorization = STANDARD.encode(format!("{username}:{password}"));
        let mut options = RequestOptions {
            headers: std::collections::BTreeMap::new(),
            query: Vec::new(),
            with_credentials: true,
            response_type: None,
        };
        options
            .headers
            .insert("Authorization".to_string(), format!("Basic {authorization}"));

        self.send(TransportRequest {
            method: HttpMethod::Get,
            url: url.to_string(),
            body: None,
            options,
        })
        .await
    }

    /// Sends a DELETE to a logout endpoint with default options.
    ///
    /// # Errors
    ///
    /// Returns a [`NormalizedError`] unless the response status is 200 or 204.
    pub async fn logout(&self, url: &str) -> Result<HttpResponse, NormalizedError> {
        self.send(TransportRequest {
            method: HttpMethod::Delete,
            url: url.to_string(),
            body: None,
            options: resolve_options(None, None),
        })
        .await
    }

    async fn send(&self, request: TransportRequest) -> Result<HttpResponse, NormalizedError> {
        tracing::debug!(method = %request.method, url = %request.url, "Sending REST call");
        self.interceptor
            .intercept(self.transport.execute(request))
            .await
    }
}
