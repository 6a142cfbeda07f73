//! HTTP client implementation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::encoding::form_body;
use super::error_strings::ErrorStrings;
use super::interceptor::{ResponseInterceptor, identity};
use super::pending::PendingRequest;
use super::request::{
    FORM_CONTENT_TYPE, Headers, HttpMethod, HttpRequest, JSON_CONTENT_TYPE,
    MULTIPART_CONTENT_TYPE, RequestBody, RequestOptions,
};
use super::transport::{ReqwestTransport, Transport};
use crate::error::Result;
use crate::network_info::{self, ReachabilityMonitor};
use tether_core::logging::targets;

/// Default base URL.
pub const DEFAULT_HOST: &str = "http://localhost";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Configuration for the HTTP client.
///
/// Can be loaded from TOML:
///
/// ```toml
/// host = "https://api.example.com"
/// timeout_ms = 15000
///
/// [default_headers]
/// X-App-Version = "3.2.0"
/// ```
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    /// Base URL prepended to every endpoint.
    pub host: String,
    /// Timeout applied when a call does not set its own.
    #[serde(rename = "timeout_ms", deserialize_with = "deserialize_millis")]
    pub timeout: Duration,
    /// Headers used by `post` and `upload` when a call supplies none.
    pub default_headers: Headers,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_headers: Headers::new(),
        }
    }
}

impl HttpClientConfig {
    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

fn deserialize_millis<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}

/// Builder for creating an HTTP client with custom configuration.
pub struct HttpClientBuilder {
    config: HttpClientConfig,
    on_received: Option<ResponseInterceptor>,
    error_strings: Option<HashMap<String, String>>,
    error_table: Option<ErrorStrings>,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClientBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::from_config(HttpClientConfig::default())
    }

    /// Start from an existing configuration.
    pub fn from_config(config: HttpClientConfig) -> Self {
        Self {
            config,
            on_received: None,
            error_strings: None,
            error_table: None,
            transport: None,
        }
    }

    /// Set the base URL. An empty host falls back to [`DEFAULT_HOST`].
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the default request timeout. A zero timeout falls back to
    /// [`DEFAULT_TIMEOUT`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header for `post` and `upload`.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(name.into(), value.into());
        self
    }

    /// Replace the default headers.
    pub fn default_headers(mut self, headers: Headers) -> Self {
        self.config.default_headers = headers;
        self
    }

    /// Set the client-level response interceptor.
    pub fn on_received(mut self, interceptor: ResponseInterceptor) -> Self {
        self.on_received = Some(interceptor);
        self
    }

    /// Error text to publish in the shared table when the client is built.
    pub fn error_strings(mut self, strings: HashMap<String, String>) -> Self {
        self.error_strings = Some(strings);
        self
    }

    /// Bind the client to a specific table instead of [`ErrorStrings::global`].
    pub fn error_table(mut self, table: ErrorStrings) -> Self {
        self.error_table = Some(table);
        self
    }

    /// Use a custom transport instead of [`ReqwestTransport`].
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the HTTP client.
    pub fn build(mut self) -> Result<HttpClient> {
        if self.config.host.is_empty() {
            self.config.host = DEFAULT_HOST.to_string();
        }
        if self.config.timeout.is_zero() {
            self.config.timeout = DEFAULT_TIMEOUT;
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };

        let error_strings = self.error_table.unwrap_or_else(ErrorStrings::global);
        if let Some(strings) = self.error_strings {
            error_strings.replace(strings);
        }

        Ok(HttpClient {
            inner: Arc::new(HttpClientInner {
                config: self.config,
                transport,
                on_received: self.on_received.unwrap_or_else(identity),
                error_strings,
            }),
        })
    }
}

/// Internal state for the HTTP client.
struct HttpClientInner {
    config: HttpClientConfig,
    transport: Arc<dyn Transport>,
    on_received: ResponseInterceptor,
    error_strings: ErrorStrings,
}

/// A thin HTTP client: builds requests, races them against a timeout and
/// passes every successful body through a response interceptor.
///
/// The client is cheaply cloneable and thread-safe. Concurrent calls are
/// independent: each has its own deadline and cancellation, and there is no
/// queue or limit on how many run at once.
///
/// # Example
///
/// ```ignore
/// use tether_net::http::{HttpClient, RequestOptions};
///
/// let client = HttpClient::builder()
///     .host("https://api.example.com")
///     .default_header("X-App", "demo")
///     .build()?;
///
/// let items = client
///     .get("/items", RequestOptions::new().param("page", "1"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<HttpClientInner>,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Create a new HTTP client with default configuration.
    pub fn new() -> Self {
        HttpClientBuilder::new()
            .build()
            .expect("Failed to create HTTP client with default configuration")
    }

    /// Create a builder for configuring a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Get the client's configuration.
    pub fn config(&self) -> &HttpClientConfig {
        &self.inner.config
    }

    /// The error-string table this client publishes to.
    pub fn error_strings(&self) -> &ErrorStrings {
        &self.inner.error_strings
    }

    /// The process-wide reachability monitor.
    pub fn reachability() -> Arc<ReachabilityMonitor> {
        network_info::shared()
    }

    /// Build a GET request without sending it.
    ///
    /// The URL is `host + endpoint + "?" + params`, where each key and value is
    /// percent-encoded. Headers start from the call's own map (never the
    /// client defaults).
    pub fn build_get(&self, endpoint: &str, options: &RequestOptions) -> HttpRequest {
        let url = format!("{}?{}", self.url_for(endpoint), form_body(&options.params));
        let headers = options.finish_headers(
            options.headers.clone().unwrap_or_default(),
            JSON_CONTENT_TYPE,
            false,
        );

        HttpRequest {
            method: HttpMethod::Get,
            url,
            headers,
            body: RequestBody::None,
        }
    }

    /// Build a form POST request without sending it.
    pub fn build_post(&self, endpoint: &str, options: &RequestOptions) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.url_for(endpoint),
            headers: options.finish_headers(self.base_headers(options), FORM_CONTENT_TYPE, true),
            body: RequestBody::Form(form_body(&options.form_data)),
        }
    }

    /// Build a multipart upload request without sending it.
    pub fn build_upload(&self, endpoint: &str, options: &RequestOptions) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: self.url_for(endpoint),
            headers: options.finish_headers(
                self.base_headers(options),
                MULTIPART_CONTENT_TYPE,
                true,
            ),
            body: RequestBody::Multipart(options.multipart_parts()),
        }
    }

    /// Send a GET request.
    pub async fn get(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let request = self.build_get(endpoint, &options);
        self.fetch(request, &options).await
    }

    /// Send a url-encoded form POST.
    pub async fn post(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let request = self.build_post(endpoint, &options);
        self.fetch(request, &options).await
    }

    /// Send a multipart upload.
    pub async fn upload(&self, endpoint: &str, options: RequestOptions) -> Result<Value> {
        let request = self.build_upload(endpoint, &options);
        self.fetch(request, &options).await
    }

    /// Dispatch a request, race it against its timeout, parse the body and
    /// run it through the response interceptor.
    ///
    /// The interceptor runs only when the transport succeeded in time; its
    /// result is what this call returns.
    pub async fn fetch(&self, request: HttpRequest, options: &RequestOptions) -> Result<Value> {
        let timeout = options
            .timeout
            .filter(|timeout| !timeout.is_zero())
            .unwrap_or(self.inner.config.timeout);
        let method = request.method;
        let url = request.url.clone();
        tracing::debug!(target: targets::HTTP, %method, %url, ?timeout, "dispatching request");

        let pending = PendingRequest::dispatch(
            Arc::clone(&self.inner.transport),
            request,
            options.content_type,
            timeout,
        );

        let body = match pending.settle().await {
            Ok(body) => body,
            Err(err) => {
                tracing::warn!(target: targets::HTTP, %method, %url, error = %err, "request failed");
                return Err(err);
            }
        };
        tracing::debug!(target: targets::HTTP, %method, %url, "request completed");

        let interceptor = options
            .on_received
            .as_ref()
            .unwrap_or(&self.inner.on_received);
        interceptor(body, options).await
    }

    fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.inner.config.host, endpoint)
    }

    /// Per-call headers, or a fresh copy of the client defaults.
    fn base_headers(&self, options: &RequestOptions) -> Headers {
        options
            .headers
            .clone()
            .unwrap_or_else(|| self.inner.config.default_headers.clone())
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.inner.config)
            .finish()
    }
}
