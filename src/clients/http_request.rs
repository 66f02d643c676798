//! Declarative call descriptions.
//!
//! This module provides [`CallParams`], the per-call configuration handed to
//! the verb methods of [`RestClient`](crate::clients::RestClient), and the
//! types it is made of.

use std::fmt;

/// HTTP methods supported by the REST client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns whether requests with this method carry a body.
    #[must_use]
    pub const fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// How the transport should decode a response body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResponseType {
    /// Decode the body as JSON.
    #[default]
    Json,
    /// Keep the body as raw bytes.
    Blob,
}

/// Header-related settings of a single call.
///
/// Unset fields fall back to `application/json`. `accept` and
/// `content_type` are independent.
///
/// # Example
///
/// ```rust
/// use rest_service::clients::{HeaderParams, ResponseType};
///
/// let header = HeaderParams::new()
///     .content_type("text/csv")
///     .response_type(ResponseType::Json);
///
/// assert_eq!(header.content_type.as_deref(), Some("text/csv"));
/// assert!(header.accept.is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderParams {
    /// Value of the `Content-Type` header.
    pub content_type: Option<String>,
    /// Value of the `Accept` header.
    pub accept: Option<String>,
    /// Explicit response decoding mode.
    pub response_type: Option<ResponseType>,
}

impl HeaderParams {
    /// Creates empty header params.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `Content-Type` header.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the `Accept` header.
    #[must_use]
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Sets the response decoding mode.
    #[must_use]
    pub const fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }
}

/// The content of one multipart form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormPartValue {
    /// A plain text field.
    Text(String),
    /// A file field.
    File {
        /// The raw file content.
        bytes: Vec<u8>,
        /// The file name sent with the part.
        file_name: Option<String>,
        /// The MIME type of the part.
        content_type: Option<String>,
    },
}

/// One named multipart form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormPart {
    /// The field name.
    pub name: String,
    /// The field content.
    pub value: FormPartValue,
}

/// A binary `multipart/form-data` body.
///
/// # Example
///
/// ```rust
/// use rest_service::clients::FormData;
///
/// let form = FormData::new()
///     .text("description", "Quarterly report")
///     .file("document", b"%PDF-1.7".to_vec(), "report.pdf", "application/pdf");
///
/// assert_eq!(form.parts().len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormData {
    parts: Vec<FormPart>,
}

impl FormData {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: FormPartValue::Text(value.into()),
        });
        self
    }

    /// Appends a file field.
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        bytes: Vec<u8>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: FormPartValue::File {
                bytes,
                file_name: Some(file_name.into()),
                content_type: Some(content_type.into()),
            },
        });
        self
    }

    /// Returns the form fields in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }
}

/// A request body, tagged by how it must be sent.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// A JSON-serializable value.
    Json(serde_json::Value),
    /// Multipart form content. The transport sets the `Content-Type` with
    /// its boundary.
    BinaryForm(FormData),
}

impl RequestBody {
    /// Returns whether this is a multipart form body.
    #[must_use]
    pub const fn is_binary_form(&self) -> bool {
        matches!(self, Self::BinaryForm(_))
    }
}

impl From<serde_json::Value> for RequestBody {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<FormData> for RequestBody {
    fn from(form: FormData) -> Self {
        Self::BinaryForm(form)
    }
}

/// Declarative description of one REST call.
///
/// Constructed fresh for each call. `url` may contain `{name}` placeholders
/// that are filled from `url_params`.
///
/// # Example
///
/// ```rust
/// use rest_service::clients::{CallParams, HeaderParams};
/// use serde_json::json;
///
/// let params = CallParams::new("/users/{id}/posts")
///     .url_param("id", 42)
///     .query_param("page", 2)
///     .query_param("tags", json!(["rust", "http"]))
///     .header(HeaderParams::new().accept("application/json"))
///     .json_body(json!({"title": "Hello"}));
///
/// assert_eq!(params.url, "/users/{id}/posts");
/// assert_eq!(params.url_params.len(), 1);
/// assert_eq!(params.query_params.len(), 2);
/// assert!(params.body.is_some());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CallParams {
    /// The URL template.
    pub url: String,
    /// Values substituted into `{name}` placeholders, in insertion order.
    pub url_params: Vec<(String, serde_json::Value)>,
    /// Query parameters. Array values are sent as repeated keys.
    pub query_params: Vec<(String, serde_json::Value)>,
    /// Header settings.
    pub header: HeaderParams,
    /// The body for POST, PUT and PATCH calls.
    pub body: Option<RequestBody>,
}

impl CallParams {
    /// Creates params for the given URL template.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Adds a single URL placeholder value.
    #[must_use]
    pub fn url_param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.url_params.push((key.into(), value.into()));
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    /// Sets the header settings.
    #[must_use]
    pub fn header(mut self, header: HeaderParams) -> Self {
        self.header = header;
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<RequestBody>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a JSON body.
    #[must_use]
    pub fn json_body(self, value: impl Into<serde_json::Value>) -> Self {
        self.body(RequestBody::Json(value.into()))
    }

    /// Sets a multipart form body.
    #[must_use]
    pub fn form_body(self, form: FormData) -> Self {
        self.body(RequestBody::BinaryForm(form))
    }
}
