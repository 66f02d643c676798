//! HTTP transport abstraction.
//!
//! The REST client never talks to the network itself. It resolves each call
//! into a [`TransportRequest`] and hands it to an injected [`Transport`].
//! [`ReqwestTransport`](crate::clients::ReqwestTransport) is the default
//! implementation; tests and embedders can supply their own.

use async_trait::async_trait;

use crate::clients::errors::TransportFailure;
use crate::clients::http_request::{HttpMethod, RequestBody};
use crate::clients::http_response::HttpResponse;
use crate::clients::options::RequestOptions;

/// A fully resolved request, ready for the network.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The resolved URL (placeholders already substituted).
    pub url: String,
    /// The request body, for POST, PUT and PATCH.
    pub body: Option<RequestBody>,
    /// Headers, query, credentials and decoding mode.
    pub options: RequestOptions,
}

/// Executes resolved requests.
///
/// Implementations report non-2xx statuses and connection errors on the
/// failure channel. A `status` of 0 means no response was received.
///
/// Implementations should fill [`HttpResponse::url`] and
/// [`TransportFailure::url`] with the URL of the call. The interceptor
/// matches the identity-check path against it; a missing URL never
/// matches.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends one request and returns its response or failure.
    async fn execute(&self, request: TransportRequest) -> Result<HttpResponse, TransportFailure>;
}
