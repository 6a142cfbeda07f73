//! HTTP response types.

use bytes::Bytes;
use serde_json::Value;

use crate::error::Result;

/// How a response body is parsed before interception.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResponseFormat {
    /// Parse as JSON.
    #[default]
    Json,
    /// Keep as plain text, delivered as [`Value::String`].
    Text,
}

impl ResponseFormat {
    /// Parse a buffered response according to this format.
    pub fn parse(self, response: &TransportResponse) -> Result<Value> {
        match self {
            Self::Json => response.json(),
            Self::Text => Ok(Value::String(response.text())),
        }
    }
}

/// A buffered response produced by a [`Transport`](super::Transport).
///
/// Non-2xx statuses are not errors at this level; the body is still parsed.
#[derive(Clone, Debug)]
pub struct TransportResponse {
    status: u16,
    headers: http::HeaderMap,
    body: Bytes,
}

impl TransportResponse {
    /// Create a response from its parts.
    pub fn new(status: u16, headers: http::HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// A 200 response with the given body and no headers.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(200, http::HeaderMap::new(), body)
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response headers.
    pub fn headers(&self) -> &http::HeaderMap {
        &self.headers
    }

    /// Get a specific header value.
    pub fn header(&self, name: impl AsRef<str>) -> Option<&str> {
        self.headers
            .get(name.as_ref())
            .and_then(|v| v.to_str().ok())
    }

    /// Get the raw body.
    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    /// Get the body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_slice(&self.body)?)
    }
}
