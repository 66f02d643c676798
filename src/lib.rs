//! # REST Service
//!
//! A declarative REST client: callers describe each call with a
//! [`CallParams`](clients::CallParams) and receive either the raw
//! [`HttpResponse`] or a single normalized error shape.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`RestConfig`] and [`RestConfigBuilder`]
//! - URL templates with `{placeholder}` substitution
//! - JSON and `multipart/form-data` request bodies with matching headers
//! - File downloads returned as sanitized resource references
//! - Uniform [`NormalizedError`] values for every failure
//! - Redirect-on-authorization-failure through an injected navigator
//! - A pluggable [`Transport`](clients::Transport), with a `reqwest` default
//!
//! ## Quick Start
//!
//! ```rust
//! use rest_service::{BaseUrl, RestConfig};
//!
//! let config = RestConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com").unwrap())
//!     .redirect_target(["auth", "forbidden"])
//!     .debug(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.redirect_target(), ["auth", "forbidden"]);
//! ```
//!
//! ## Making Calls
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rest_service::clients::{CallParams, FormData, HeaderParams};
//! use rest_service::RestClient;
//!
//! let client = RestClient::from_config(&config, Arc::new(|to: &[String]| router.go(to)))?;
//!
//! // GET /users/7?active=true
//! let user = client
//!     .get(CallParams::new("/users/{id}").url_param("id", 7).query_param("active", true))
//!     .await?;
//!
//! // Multipart upload
//! let form = FormData::new().file("avatar", bytes, "me.png", "image/png");
//! client.post(CallParams::new("/users/7/avatar").form_body(form)).await?;
//!
//! // File download
//! let pdf = client
//!     .file(CallParams::new("/reports/1").header(HeaderParams::new().content_type("application/pdf")))
//!     .await?;
//! ```
//!
//! ## Error Handling
//!
//! Every failure becomes a [`NormalizedError`] with `status`, `message` and
//! `body`. A status of 0 means the server was never reached.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Newtypes and builders validate on construction
//! - **Thread-safe**: All client types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod clients;
pub mod config;
pub mod error;

// Re-export public types at crate root for convenience
pub use config::{BaseUrl, RestConfig, RestConfigBuilder};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    CallParams, HttpMethod, HttpResponse, NormalizedError, ResponseInterceptor, RestClient,
    Transport, TransportFailure,
};
