//! Request option resolution.
//!
//! Turns the header and query settings of a [`CallParams`](crate::clients::CallParams)
//! into transport-ready [`RequestOptions`]. Resolution is pure: identical
//! inputs always produce equal outputs.
//!
//! # Header Rules
//!
//! - `Content-Type` is the caller's value, or `application/json`
//! - `Accept` is the caller's value, or `application/json`
//! - `Access-Control-Allow-Origin: *` is always attached
//! - Multipart bodies omit `Content-Type` so the transport can add the
//!   boundary itself
//!
//! `with_credentials` is always `true`. `response_type` is only set when
//! the caller asked for one.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::clients::http_request::{HeaderParams, RequestBody, ResponseType};
use crate::clients::path::param_to_string;

/// The `Content-Type` header name.
pub const CONTENT_TYPE: &str = "Content-Type";

/// The `Accept` header name.
pub const ACCEPT: &str = "Accept";

/// The CORS header attached to every call.
pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";

/// The media type used when the caller does not set one.
pub const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// Media type used for file downloads when nothing was declared.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Transport-ready options for one call.
///
/// # Example
///
/// ```rust
/// use rest_service::clients::resolve_options;
///
/// let options = resolve_options(None, None);
/// assert_eq!(options.header("Content-Type"), Some("application/json"));
/// assert_eq!(options.header("Accept"), Some("application/json"));
/// assert!(options.with_credentials);
/// assert!(options.response_type.is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct RequestOptions {
    /// Headers to send.
    pub headers: BTreeMap<String, String>,
    /// Query parameters, passed through unmodified.
    pub query: Vec<(String, Value)>,
    /// Whether credentials (cookies) accompany the call.
    pub with_credentials: bool,
    /// Explicit response decoding mode, if any.
    pub response_type: Option<ResponseType>,
}

impl RequestOptions {
    /// Returns the value of a header, if set.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Flattens the query parameters into string pairs.
    ///
    /// Array values become repeated keys. Null values are dropped.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.query.len());
        for (key, value) in &self.query {
            if let Value::Array(items) = value {
                pairs.extend(
                    items
                        .iter()
                        .filter_map(param_to_string)
                        .map(|item| (key.clone(), item)),
                );
            } else if let Some(value) = param_to_string(value) {
                pairs.push((key.clone(), value));
            }
        }
        pairs
    }

    /// Returns the decoding mode the transport should use.
    #[must_use]
    pub fn effective_response_type(&self) -> ResponseType {
        self.response_type.unwrap_or_default()
    }
}

fn base_headers(accept: &str) -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(ACCEPT.to_string(), accept.to_string());
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN.to_string(), "*".to_string());
    headers
}

fn accept_of(header: Option<&HeaderParams>) -> &str {
    header
        .and_then(|h| h.accept.as_deref())
        .unwrap_or(DEFAULT_MEDIA_TYPE)
}

/// Resolves the options for a JSON (or bodiless) call.
///
/// # Arguments
///
/// * `header` - The caller's header settings
/// * `query` - The caller's query parameters
#[must_use]
pub fn resolve_options(
    header: Option<&HeaderParams>,
    query: Option<&[(String, Value)]>,
) -> RequestOptions {
    let content_type = header
        .and_then(|h| h.content_type.as_deref())
        .unwrap_or(DEFAULT_MEDIA_TYPE);

    let mut headers = base_headers(accept_of(header));
    headers.insert(CONTENT_TYPE.to_string(), content_type.to_string());

    RequestOptions {
        headers,
        query: query.map(<[_]>::to_vec).unwrap_or_default(),
        with_credentials: true,
        response_type: header.and_then(|h| h.response_type),
    }
}

/// Resolves the options for a multipart form call.
///
/// Identical to [`resolve_options`] except that `Content-Type` is omitted.
#[must_use]
pub fn resolve_file_options(
    header: Option<&HeaderParams>,
    query: Option<&[(String, Value)]>,
) -> RequestOptions {
    RequestOptions {
        headers: base_headers(accept_of(header)),
        ..resolve_options(header, query)
    }
}

/// Resolves the options for a call that may carry a body.
///
/// The body kind is inspected on every call; multipart bodies use
/// [`resolve_file_options`], anything else uses [`resolve_options`].
#[must_use]
pub fn resolve_body_options(
    header: Option<&HeaderParams>,
    query: Option<&[(String, Value)]>,
    body: Option<&RequestBody>,
) -> RequestOptions {
    match body {
        Some(RequestBody::BinaryForm(_)) => resolve_file_options(header, query),
        _ => resolve_options(header, query),
    }
}

/// Returns the content type a caller declared for a file download.
///
/// Uses `content_type`, then `accept`, then `application/octet-stream`.
#[must_use]
pub fn declared_file_type(header: Option<&HeaderParams>) -> String {
    header
        .and_then(|h| h.content_type.as_deref().or(h.accept.as_deref()))
        .unwrap_or(OCTET_STREAM)
        .to_string()
}

/// Resolves the options for a file download.
///
/// Same as [`resolve_options`], with `Accept` set to the declared file
/// type and the response kept as raw bytes.
#[must_use]
pub fn resolve_blob_options(
    header: Option<&HeaderParams>,
    query: Option<&[(String, Value)]>,
) -> RequestOptions {
    let mut options = resolve_options(header, query);
    options
        .headers
        .insert(ACCEPT.to_string(), declared_file_type(header));
    options.response_type = Some(ResponseType::Blob);
    options
}
