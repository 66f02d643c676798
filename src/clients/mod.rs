//! HTTP client types for REST service communication.
//!
//! This module provides the call-preparation and response-handling layers
//! behind [`RestClient`].
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`RestClient`]: The REST client with `get()`, `post()`, `put()`, `patch()`,
//!   `delete()` and `file()` methods
//! - [`CallParams`]: Declarative description of one call
//! - [`HttpResponse`]: A response passed through to the caller
//! - [`NormalizedError`]: The single error shape every failure becomes
//! - [`Transport`]: The network seam, with [`ReqwestTransport`] as default
//! - [`ResponseInterceptor`]: Classifies outcomes and redirects on auth failure
//!
//! # Request Options
//!
//! Every call gets these options unless the caller overrides them:
//!
//! - `Content-Type: application/json` (omitted for multipart bodies)
//! - `Accept: application/json`
//! - `Access-Control-Allow-Origin: *`
//! - Credentials included
//!
//! # Example
//!
//! ```rust
//! use rest_service::clients::{CallParams, HeaderParams, HttpMethod, RestClient};
//!
//! let request = RestClient::resolve_request(
//!     HttpMethod::Get,
//!     CallParams::new("/reports/{id}")
//!         .url_param("id", 42)
//!         .query_param("format", "csv")
//!         .header(HeaderParams::new().accept("text/csv")),
//! );
//!
//! assert_eq!(request.url, "/reports/42");
//! assert_eq!(request.options.header("Accept"), Some("text/csv"));
//! assert_eq!(request.options.header("Content-Type"), Some("application/json"));
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod interceptor;
mod options;
mod page;
mod path;
mod resource;
pub mod rest;
mod transport;

pub use errors::{NormalizedError, TransportBuildError, TransportFailure};
pub use http_client::{ReqwestTransport, SDK_VERSION};
pub use http_request::{
    CallParams, FormData, FormPart, FormPartValue, HeaderParams, HttpMethod, RequestBody,
    ResponseType,
};
pub use http_response::{HttpResponse, ResponseBody};
pub use interceptor::{InterceptorConfig, Navigator, NoopHook, PostCallHook, ResponseInterceptor};
pub use options::{
    declared_file_type, resolve_blob_options, resolve_body_options, resolve_file_options,
    resolve_options, RequestOptions, ACCEPT, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
    DEFAULT_MEDIA_TYPE, OCTET_STREAM,
};
pub use page::PageResponse;
pub use path::{param_to_string, resolve_url};
pub use resource::{Blob, ObjectUrl, ResourceSanitizer, SafeResourceUrl, TrustingSanitizer};
pub use transport::{Transport, TransportRequest};

// Re-export the REST client at the clients module level
pub use rest::RestClient;
