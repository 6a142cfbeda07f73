//! HTTP client for Tether.
//!
//! [`HttpClient`] turns `get`, `post` and `upload` calls into fully specified
//! requests, races each one against its timeout, and passes every successful
//! body through a response interceptor before returning it.
//!
//! # Example
//!
//! ```ignore
//! use tether_net::http::{FileUpload, HttpClient, RequestOptions, interceptor};
//!
//! let client = HttpClient::builder()
//!     .host("https://api.example.com")
//!     .on_received(interceptor(|body, _| Ok(body["data"].clone())))
//!     .build()?;
//!
//! // GET /users?page=1 with cache bypass
//! let users = client
//!     .get("/users", RequestOptions::new().param("page", "1").use_cache(false))
//!     .await?;
//!
//! // Form POST without cookies
//! client
//!     .post("/login", RequestOptions::new().form_field("user", "john").use_cookie(false))
//!     .await?;
//!
//! // Multipart upload
//! client
//!     .upload(
//!         "/avatar",
//!         RequestOptions::new()
//!             .file(FileUpload::new("avatar", "file:///tmp/me.png", "me.png").mime_type("image/png")),
//!     )
//!     .await?;
//! ```

mod client;
mod encoding;
mod error_strings;
mod interceptor;
mod pending;
mod request;
mod response;
mod transport;

pub use client::{DEFAULT_HOST, DEFAULT_TIMEOUT, HttpClient, HttpClientBuilder, HttpClientConfig};
pub use encoding::{encode_component, form_body};
pub use error_strings::ErrorStrings;
pub use interceptor::{ResponseInterceptor, async_interceptor, identity, interceptor};
pub use request::{
    CACHE_CONTROL, CONTENT_TYPE, COOKIE, FORM_CONTENT_TYPE, FileUpload, Headers, HttpMethod,
    HttpRequest, JSON_CONTENT_TYPE, MULTIPART_CONTENT_TYPE, PRAGMA, Part, RequestBody,
    RequestOptions,
};
pub use response::{ResponseFormat, TransportResponse};
pub use transport::{ReqwestTransport, Transport};
