//! Binary resources returned by file downloads.
//!
//! A downloaded file moves through three stages:
//!
//! 1. [`Blob`]: the raw bytes tagged with the declared content type
//! 2. [`ObjectUrl`]: a client-local reference to the blob (a `data:` URL)
//! 3. [`SafeResourceUrl`]: the reference after a [`ResourceSanitizer`]
//!    certified it as safe for embedding
//!
//! `data:` URLs own their content, so there is nothing to revoke once the
//! caller drops the reference.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Raw bytes tagged with a content type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    content_type: String,
    bytes: Vec<u8>,
}

impl Blob {
    /// Creates a blob.
    #[must_use]
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Returns the content type.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the raw bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the blob is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A client-local reference to a [`Blob`].
///
/// # Example
///
/// ```rust
/// use rest_service::clients::{Blob, ObjectUrl};
///
/// let url = ObjectUrl::from_blob(&Blob::new(b"hi".to_vec(), "text/plain"));
/// assert_eq!(url.as_ref(), "data:text/plain;base64,aGk=");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectUrl(String);

impl ObjectUrl {
    /// Encodes a blob as a `data:` URL.
    #[must_use]
    pub fn from_blob(blob: &Blob) -> Self {
        Self(format!(
            "data:{};base64,{}",
            blob.content_type(),
            STANDARD.encode(blob.bytes())
        ))
    }

    /// Returns the URL as an owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for ObjectUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resource URL certified as safe for embedding.
///
/// Only a [`ResourceSanitizer`] should create these.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SafeResourceUrl(String);

impl SafeResourceUrl {
    /// Marks a URL as trusted without any checks.
    #[must_use]
    pub fn trusted(url: impl Into<String>) -> Self {
        Self(url.into())
    }
}

impl AsRef<str> for SafeResourceUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SafeResourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Certifies client-local resource references as safe for embedding.
pub trait ResourceSanitizer: Send + Sync {
    /// Certifies `url`.
    fn trust_resource_url(&self, url: ObjectUrl) -> SafeResourceUrl;
}

impl<F> ResourceSanitizer for F
where
    F: Fn(ObjectUrl) -> SafeResourceUrl + Send + Sync,
{
    fn trust_resource_url(&self, url: ObjectUrl) -> SafeResourceUrl {
        self(url)
    }
}

/// A sanitizer that trusts every reference it is given.
///
/// Suitable when references never leave the process.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrustingSanitizer;

impl ResourceSanitizer for TrustingSanitizer {
    fn trust_resource_url(&self, url: ObjectUrl) -> SafeResourceUrl {
        SafeResourceUrl::trusted(url.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_accessors() {
        let blob = Blob::new(vec![0x25, 0x50], "application/pdf");
        assert_eq!(blob.content_type(), "application/pdf");
        assert_eq!(blob.bytes(), &[0x25, 0x50]);
        assert_eq!(blob.len(), 2);
        assert!(!blob.is_empty());
    }

    #[test]
    fn test_object_url_encodes_content_type_and_bytes() {
        let url = ObjectUrl::from_blob(&Blob::new(b"%PDF".to_vec(), "application/pdf"));
        assert_eq!(url.as_ref(), "data:application/pdf;base64,JVBERg==");
    }

    #[test]
    fn test_object_url_for_empty_blob() {
        let url = ObjectUrl::from_blob(&Blob::new(Vec::new(), "text/plain"));
        assert_eq!(url.to_string(), "data:text/plain;base64,");
    }

    #[test]
    fn test_trusting_sanitizer_keeps_url() {
        let url = ObjectUrl::from_blob(&Blob::new(b"x".to_vec(), "text/plain"));
        let safe = TrustingSanitizer.trust_resource_url(url.clone());
        assert_eq!(safe.as_ref(), url.as_ref());
    }

    #[test]
    fn test_closure_sanitizer() {
        let sanitizer = |url: ObjectUrl| SafeResourceUrl::trusted(format!("safe:{url}"));
        let safe = sanitizer.trust_resource_url(ObjectUrl::from_blob(&Blob::new(
            Vec::new(),
            "a/b",
        )));
        assert_eq!(safe.as_ref(), "safe:data:a/b;base64,");
    }
}
