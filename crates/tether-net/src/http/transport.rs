//! Transports that put requests on the wire.
//!
//! [`HttpClient`](super::HttpClient) builds requests and races them against a
//! deadline; a [`Transport`] only has to execute them. The default transport is
//! [`ReqwestTransport`]; tests plug in their own.

use std::time::Duration;

use futures_util::future::BoxFuture;

use super::request::{CONTENT_TYPE, HttpRequest, Part, RequestBody};
use super::response::TransportResponse;
use crate::error::Result;

/// Executes fully specified requests.
///
/// The returned future is run on its own task. Cancelling a request aborts
/// that task, which drops the future; implementations release in-flight
/// resources on drop.
pub trait Transport: Send + Sync {
    /// Execute a request and buffer its response.
    fn execute(&self, request: HttpRequest) -> BoxFuture<'static, Result<TransportResponse>>;
}

/// Transport backed by a shared `reqwest` client.
///
/// Deadlines are enforced by the caller, so the reqwest client only carries a
/// connect timeout. Multipart bodies get reqwest's own
/// `multipart/form-data; boundary=...` header in place of the bare declared one.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with cookie storage and the Tether user agent.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .cookie_store(true)
            .user_agent(format!("Tether/{} (Rust)", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'static, Result<TransportResponse>> {
        let client = self.client.clone();
        Box::pin(async move {
            let url = url::Url::parse(&request.url)?;
            let mut req_builder = client.request(request.method.to_reqwest(), url);

            let is_multipart = matches!(request.body, RequestBody::Multipart(_));
            for (name, value) in &request.headers {
                if is_multipart && name.eq_ignore_ascii_case(CONTENT_TYPE) {
                    continue;
                }
                let name = http::HeaderName::from_bytes(name.as_bytes())?;
                let value = http::HeaderValue::from_str(value)?;
                req_builder = req_builder.header(name, value);
            }

            match request.body {
                RequestBody::None => {}
                RequestBody::Form(body) => {
                    req_builder = req_builder.body(body);
                }
                RequestBody::Multipart(parts) => {
                    req_builder = req_builder.multipart(multipart_form(parts).await?);
                }
            }

            let response = req_builder.send().await?;
            let status = response.status().as_u16();
            let headers = response.headers().clone();
            let body = response.bytes().await?;
            Ok(TransportResponse::new(status, headers, body))
        })
    }
}

/// Build a reqwest form, reading file parts from disk.
async fn multipart_form(parts: Vec<Part>) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    for part in parts {
        form = match part {
            Part::Text { name, value } => form.text(name, value),
            Part::File {
                name,
                filename,
                mime_type,
                path,
            } => {
                let contents = tokio::fs::read(&path).await?;
                let mut file_part = reqwest::multipart::Part::bytes(contents).file_name(filename);
                if let Some(mime) = mime_type {
                    file_part = file_part.mime_str(&mime)?;
                }
                form.part(name, file_part)
            }
        };
    }
    Ok(form)
}
