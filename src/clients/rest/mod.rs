//! REST client over an injected transport.
//!
//! This module provides [`RestClient`], the entry point for making calls.
//! Each verb method takes a [`CallParams`](crate::clients::CallParams),
//! resolves the URL template and request options, sends the request through
//! a [`Transport`](crate::clients::Transport), and normalizes the outcome
//! through a [`ResponseInterceptor`](crate::clients::ResponseInterceptor).
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rest_service::{BaseUrl, RestConfig};
//! use rest_service::clients::{CallParams, RestClient};
//!
//! let config = RestConfig::builder()
//!     .base_url(BaseUrl::new("https://api.example.com").unwrap())
//!     .debug(true)
//!     .build()
//!     .unwrap();
//!
//! let client = RestClient::from_config(&config, Arc::new(|to: &[String]| {
//!     println!("redirecting to {to:?}");
//! }))?;
//!
//! match client.get(CallParams::new("/users/{id}").url_param("id", 1)).await {
//!     Ok(response) => println!("{:?}", response.body),
//!     Err(error) => println!("{} {}", error.status, error.message),
//! }
//! ```

mod client;

pub use client::RestClient;
