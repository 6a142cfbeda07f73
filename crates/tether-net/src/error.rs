//! Error types for the networking module.

use std::fmt;

/// Code carried by [`NetworkError::Timeout`].
pub const TIMEOUT_CODE: &str = "-1:err_api_timeout";

/// Network-specific errors.
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// The request did not settle before its deadline.
    Timeout,
    /// HTTP request failed.
    Request(String),
    /// Connection refused or failed.
    Connection(String),
    /// Invalid URL provided.
    InvalidUrl(String),
    /// Invalid header name or value.
    InvalidHeader(String),
    /// JSON deserialization error while reading a response body.
    Json(String),
    /// I/O error, e.g. reading an upload file.
    Io(String),
    /// The transport task was cancelled before producing a response.
    Cancelled,
    /// A response interceptor failed.
    Interceptor(String),
    /// The platform connectivity query failed.
    Connectivity(String),
    /// Invalid client configuration.
    Config(String),
}

impl NetworkError {
    /// Machine-readable code for this error, suitable as an
    /// [`ErrorStrings`](crate::http::ErrorStrings) lookup key.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Timeout => TIMEOUT_CODE,
            Self::Request(_) => "err_request",
            Self::Connection(_) => "err_connection",
            Self::InvalidUrl(_) => "err_invalid_url",
            Self::InvalidHeader(_) => "err_invalid_header",
            Self::Json(_) => "err_json",
            Self::Io(_) => "err_io",
            Self::Cancelled => "err_cancelled",
            Self::Interceptor(_) => "err_interceptor",
            Self::Connectivity(_) => "err_connectivity",
            Self::Config(_) => "err_config",
        }
    }

    /// Check if this is the request timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "{TIMEOUT_CODE}"),
            Self::Request(msg) => write!(f, "HTTP request error: {msg}"),
            Self::Connection(msg) => write!(f, "Connection error: {msg}"),
            Self::InvalidUrl(msg) => write!(f, "Invalid URL: {msg}"),
            Self::InvalidHeader(msg) => write!(f, "Invalid header: {msg}"),
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::Cancelled => write!(f, "Request was cancelled"),
            Self::Interceptor(msg) => write!(f, "Response interceptor error: {msg}"),
            Self::Connectivity(msg) => write!(f, "Connectivity query failed: {msg}"),
            Self::Config(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_decode() {
            Self::Json(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for NetworkError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<std::io::Error> for NetworkError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<http::header::InvalidHeaderName> for NetworkError {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for NetworkError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<toml::de::Error> for NetworkError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A specialized Result type for network operations.
pub type Result<T> = std::result::Result<T, NetworkError>;
