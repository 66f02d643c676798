//! HTTP response types.
//!
//! This module provides the [`HttpResponse`] type returned by a
//! [`Transport`](crate::clients::Transport) and passed through unchanged to
//! callers on success.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

/// A decoded response body.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    /// A body decoded as JSON.
    Json(serde_json::Value),
    /// A body kept as raw bytes.
    Bytes(Vec<u8>),
}

impl ResponseBody {
    /// Returns the body as a JSON value.
    ///
    /// Raw bytes become a JSON string (lossy UTF-8), or an empty object if
    /// there are none.
    #[must_use]
    pub fn to_value(&self) -> serde_json::Value {
        match self {
            Self::Json(value) => value.clone(),
            Self::Bytes(bytes) if bytes.is_empty() => serde_json::json!({}),
            Self::Bytes(bytes) => {
                serde_json::Value::String(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

impl Default for ResponseBody {
    fn default() -> Self {
        Self::Json(serde_json::json!({}))
    }
}

/// An HTTP response from a transport.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The reason phrase for the status.
    pub status_text: String,
    /// The final URL of the call, if the transport reports it.
    ///
    /// Used to detect identity-check calls; `None` never matches.
    pub url: Option<String>,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The decoded response body.
    pub body: ResponseBody,
}

impl HttpResponse {
    /// Creates a new `HttpResponse` with no headers or URL.
    #[must_use]
    pub fn new(status: u16, status_text: impl Into<String>, body: ResponseBody) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            url: None,
            headers: HashMap::new(),
            body,
        }
    }

    /// Returns `true` if the response status is 2xx.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns the first value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the raw bytes of the body, if it was kept raw.
    #[must_use]
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.body {
            ResponseBody::Bytes(bytes) => Some(bytes.as_slice()),
            ResponseBody::Json(_) => None,
        }
    }

    /// Deserializes the body into `T`.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        match &self.body {
            ResponseBody::Json(value) => T::deserialize(value),
            ResponseBody::Bytes(bytes) => serde_json::from_slice(bytes),
        }
    }
}
