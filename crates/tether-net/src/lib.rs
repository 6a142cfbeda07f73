//! Networking module for Tether.
//!
//! This crate provides a small HTTP client facade and a reachability monitor:
//!
//! - **HTTP Client**: `get`, `post` (url-encoded form) and `upload`
//!   (multipart) with per-request timeouts and response interception
//! - **Reachability**: the current connection type with change notification
//!
//! The two are independent; the process-wide monitor is reachable through
//! [`network_info::shared`] or [`HttpClient::reachability`].
//!
//! # HTTP Client
//!
//! ```ignore
//! use std::time::Duration;
//! use tether_net::{HttpClient, RequestOptions, ResponseFormat};
//!
//! let client = HttpClient::builder()
//!     .host("https://api.example.com")
//!     .timeout(Duration::from_secs(15))
//!     .build()?;
//!
//! let page = client
//!     .get("/status", RequestOptions::new().content_type(ResponseFormat::Text))
//!     .await?;
//! ```
//!
//! ## Timeouts
//!
//! Each request races its transport against a deadline. If the deadline wins,
//! the transport is cancelled and the call fails with
//! [`NetworkError::Timeout`], whose code is `-1:err_api_timeout`. A request
//! that completes first disarms its deadline.
//!
//! # Reachability
//!
//! ```ignore
//! use tether_net::network_info;
//!
//! let monitor = network_info::shared();
//! let _guard = monitor.on_change(|state| println!("now {state}"));
//! ```

mod error;
pub mod http;
pub mod network_info;
pub mod runtime;

pub use error::{NetworkError, Result, TIMEOUT_CODE};

// Re-export commonly used types at the crate root
pub use http::{
    ErrorStrings, FileUpload, HttpClient, HttpClientBuilder, HttpClientConfig, HttpMethod,
    HttpRequest, RequestBody, RequestOptions, ResponseFormat, ResponseInterceptor, Transport,
    TransportResponse,
};
pub use network_info::{ConnectionState, ReachabilityMonitor};
