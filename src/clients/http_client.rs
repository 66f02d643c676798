//! Default HTTP transport over `reqwest`.
//!
//! This module provides [`ReqwestTransport`], the [`Transport`] used by
//! [`RestClient::from_config`](crate::clients::RestClient::from_config).

use std::collections::HashMap;

use async_trait::async_trait;

use crate::clients::errors::{TransportBuildError, TransportFailure};
use crate::clients::http_request::{FormData, FormPartValue, HttpMethod, RequestBody, ResponseType};
use crate::clients::http_response::{HttpResponse, ResponseBody};
use crate::clients::transport::{Transport, TransportRequest};
use crate::config::{BaseUrl, RestConfig};

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP transport backed by a [`reqwest::Client`].
///
/// The transport handles:
/// - Joining relative call URLs onto the configured [`BaseUrl`]
/// - Default headers including User-Agent
/// - JSON and `multipart/form-data` request bodies
/// - JSON or raw-byte response decoding
/// - Reporting non-2xx statuses and connection errors as [`TransportFailure`]
///
/// Credentials are carried by the client's cookie store, which is shared
/// by every call made through this transport.
///
/// # Thread Safety
///
/// `ReqwestTransport` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust
/// use rest_service::{BaseUrl, RestConfig};
/// use rest_service::clients::ReqwestTransport;
///
/// let config = RestConfig::builder()
///     .base_url(BaseUrl::new("https://api.example.com").unwrap())
///     .build()
///     .unwrap();
///
/// let transport = ReqwestTransport::new(Some(&config)).unwrap();
/// assert_eq!(transport.full_url("/users"), "https://api.example.com/users");
/// ```
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Option<BaseUrl>,
    default_headers: HashMap<String, String>,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a new transport.
    ///
    /// # Arguments
    ///
    /// * `config` - Optional configuration for `base_url` and `user_agent_prefix`
    ///
    /// # Errors
    ///
    /// Returns [`TransportBuildError`] if the underlying reqwest client
    /// cannot be created (e.g., TLS initialization failure).
    pub fn new(config: Option<&RestConfig>) -> Result<Self, TransportBuildError> {
        let user_agent_prefix = config
            .and_then(RestConfig::user_agent_prefix)
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}REST Service Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.and_then(|c| c.base_url().cloned()),
            default_headers,
        })
    }

    /// Returns the base URL, if configured.
    #[must_use]
    pub const fn base_url(&self) -> Option<&BaseUrl> {
        self.base_url.as_ref()
    }

    /// Returns the default headers sent with every call.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the URL a call URL is sent to.
    #[must_use]
    pub fn full_url(&self, url: &str) -> String {
        self.base_url
            .as_ref()
            .map_or_else(|| url.to_string(), |base| base.join(url))
    }

    fn method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Converts a form body into a reqwest multipart form.
    fn multipart(form: &FormData) -> Result<reqwest::multipart::Form, reqwest::Error> {
        let mut multipart = reqwest::multipart::Form::new();
        for part in form.parts() {
            multipart = match &part.value {
                FormPartValue::Text(value) => multipart.text(part.name.clone(), value.clone()),
                FormPartValue::File {
                    bytes,
                    file_name,
                    content_type,
                } => {
                    let mut file = reqwest::multipart::Part::bytes(bytes.clone());
                    if let Some(file_name) = file_name {
                        file = file.file_name(file_name.clone());
                    }
                    if let Some(content_type) = content_type {
                        file = file.mime_str(content_type)?;
                    }
                    multipart.part(part.name.clone(), file)
                }
            };
        }
        Ok(multipart)
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Decodes an error payload. Empty bodies carry no payload.
    fn error_payload(bytes: &[u8]) -> Option<serde_json::Value> {
        if bytes.is_empty() {
            return None;
        }
        Some(serde_json::from_slice(bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
        }))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: TransportRequest) -> Result<HttpResponse, TransportFailure> {
        let url = self.full_url(&request.url);

        let mut req_builder = self
            .client
            .request(Self::method(request.method), &url);

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        for (key, value) in &request.options.headers {
            req_builder = req_builder.header(key, value);
        }

        let query = request.options.query_pairs();
        if !query.is_empty() {
            req_builder = req_builder.query(&query);
        }

        match &request.body {
            // String bodies go out raw
            Some(RequestBody::Json(serde_json::Value::String(text))) => {
                req_builder = req_builder.body(text.clone());
            }
            Some(RequestBody::Json(value)) => {
                req_builder = req_builder.body(value.to_string());
            }
            Some(RequestBody::BinaryForm(form)) => {
                let multipart = Self::multipart(form)
                    .map_err(|e| TransportFailure::network(Some(url.clone()), e.to_string()))?;
                req_builder = req_builder.multipart(multipart);
            }
            None => {}
        }

        let res = req_builder
            .send()
            .await
            .map_err(|e| TransportFailure::network(Some(url.clone()), e.to_string()))?;

        let status = res.status();
        let code = status.as_u16();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let final_url = res.url().to_string();
        let headers = Self::parse_response_headers(res.headers());
        let bytes = res
            .bytes()
            .await
            .map_err(|e| TransportFailure::network(Some(final_url.clone()), e.to_string()))?;

        if !status.is_success() {
            return Err(TransportFailure::from_status(
                code,
                Some(final_url.clone()),
                Self::error_payload(&bytes),
                format!("Http failure response for {final_url}: {code} {status_text}"),
            ));
        }

        let body = match request.options.effective_response_type() {
            ResponseType::Blob => ResponseBody::Bytes(bytes.to_vec()),
            ResponseType::Json if bytes.is_empty() => ResponseBody::default(),
            ResponseType::Json => match serde_json::from_slice(&bytes) {
                Ok(value) => ResponseBody::Json(value),
                Err(e) => {
                    return Err(TransportFailure::from_status(
                        code,
                        Some(final_url.clone()),
                        Self::error_payload(&bytes),
                        format!("Http failure during parsing for {final_url}: {e}"),
                    ));
                }
            },
        };

        Ok(HttpResponse {
            status: code,
            status_text,
            url: Some(final_url),
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_without_config_uses_urls_verbatim() {
        let transport = ReqwestTransport::new(None).unwrap();

        assert!(transport.base_url().is_none());
        assert_eq!(
            transport.full_url("http://localhost/api"),
            "http://localhost/api"
        );
    }

    #[test]
    fn test_transport_joins_base_url() {
        let config = RestConfig::builder()
            .base_url(BaseUrl::new("https://api.example.com/v2").unwrap())
            .build()
            .unwrap();
        let transport = ReqwestTransport::new(Some(&config)).unwrap();

        assert_eq!(
            transport.full_url("items/1"),
            "https://api.example.com/v2/items/1"
        );
    }

    #[test]
    fn test_user_agent_header_format() {
        let transport = ReqwestTransport::new(None).unwrap();

        let user_agent = transport.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.contains("REST Service Library v"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let config = RestConfig::builder()
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();
        let transport = ReqwestTransport::new(Some(&config)).unwrap();

        let user_agent = transport.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("MyApp/1.0 | "));
    }

    #[test]
    fn test_error_payload_decoding() {
        assert_eq!(ReqwestTransport::error_payload(b""), None);
        assert_eq!(
            ReqwestTransport::error_payload(br#"{"error":"nope"}"#),
            Some(serde_json::json!({"error": "nope"}))
        );
        assert_eq!(
            ReqwestTransport::error_payload(b"plain text"),
            Some(serde_json::json!("plain text"))
        );
    }

    #[test]
    fn test_multipart_rejects_invalid_mime() {
        let form = FormData::new().file("f", vec![1], "a.bin", "not a mime");
        assert!(ReqwestTransport::multipart(&form).is_err());
    }
}
