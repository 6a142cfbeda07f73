//! HTTP request types and per-call options.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use super::encoding::{encode_component, strip_file_scheme};
use super::interceptor::ResponseInterceptor;
use super::response::ResponseFormat;

/// Header mapping. Keys keep the case the caller supplied.
pub type Headers = HashMap<String, String>;

/// `Content-Type` header name as set by the client.
pub const CONTENT_TYPE: &str = "Content-Type";
/// `Cookie` header name as set by the client.
pub const COOKIE: &str = "Cookie";
/// `pragma` header name as set by the client.
pub const PRAGMA: &str = "pragma";
/// `cache-control` header name as set by the client.
pub const CACHE_CONTROL: &str = "cache-control";

/// Content type declared by `get`.
pub const JSON_CONTENT_TYPE: &str = "application/json";
/// Content type declared by `post`.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// Content type declared by `upload`.
pub const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// HTTP request methods used by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method.
    Get,
    /// HTTP POST method.
    Post,
}

impl HttpMethod {
    /// Convert to reqwest method.
    pub(crate) fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// One part of a multipart body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Part {
    /// A plain name/value field.
    Text {
        /// Field name.
        name: String,
        /// Field value.
        value: String,
    },
    /// A file whose content is read from a local path by the transport.
    File {
        /// Field name.
        name: String,
        /// File name reported to the server.
        filename: String,
        /// Declared MIME type.
        mime_type: Option<String>,
        /// Local path, already stripped of any `file://` prefix.
        path: PathBuf,
    },
}

/// The body of an HTTP request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// An `application/x-www-form-urlencoded` string.
    Form(String),
    /// An ordered list of multipart parts.
    Multipart(Vec<Part>),
}

/// A fully specified request, ready for a [`Transport`](super::Transport).
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// The full request URL, including any query string.
    pub url: String,
    /// Request headers.
    pub headers: Headers,
    /// Request body.
    pub body: RequestBody,
}

impl HttpRequest {
    /// Look up a header by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// A file to attach to an upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileUpload {
    /// Form field name.
    pub name: String,
    /// Local path or `file://` URI.
    pub file: String,
    /// File name reported to the server.
    pub filename: String,
    /// Declared MIME type.
    pub mime_type: Option<String>,
}

impl FileUpload {
    /// Create a file attachment.
    pub fn new(
        name: impl Into<String>,
        file: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            filename: filename.into(),
            mime_type: None,
        }
    }

    /// Set the declared MIME type.
    pub fn mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    fn into_part(self) -> Part {
        Part::File {
            path: PathBuf::from(strip_file_scheme(&self.file)),
            name: self.name,
            filename: self.filename,
            mime_type: self.mime_type,
        }
    }
}

/// Options for a single `get`, `post` or `upload` call.
///
/// ```ignore
/// let options = RequestOptions::new()
///     .param("page", "2")
///     .use_cache(false)
///     .timeout(Duration::from_secs(5));
/// let body = client.get("/items", options).await?;
/// ```
#[derive(Clone, Default)]
pub struct RequestOptions {
    /// Headers for this call. `post`/`upload` fall back to the client's
    /// default headers when this is `None`; `get` starts empty.
    pub headers: Option<Headers>,
    /// Query parameters for `get`, in order.
    pub params: Vec<(String, String)>,
    /// Form fields for `post` and `upload`, in order.
    pub form_data: Vec<(String, String)>,
    /// Files for `upload`.
    pub files: Vec<FileUpload>,
    /// `Some(false)` adds `pragma`/`cache-control: no-cache`.
    pub use_cache: Option<bool>,
    /// `Some(false)` forces an empty `Cookie` header on `post`/`upload`.
    pub use_cookie: Option<bool>,
    /// Per-call timeout overriding the client default. Zero means unset.
    pub timeout: Option<Duration>,
    /// How to parse the response body.
    pub content_type: ResponseFormat,
    /// Per-call interceptor overriding the client-level one.
    pub on_received: Option<ResponseInterceptor>,
}

impl RequestOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header, creating the per-call header map if needed.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the per-call header map.
    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Add a query parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Add multiple query parameters.
    pub fn params(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.params.extend(pairs);
        self
    }

    /// Add a form field.
    pub fn form_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form_data.push((key.into(), value.into()));
        self
    }

    /// Add multiple form fields.
    pub fn form_data(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.form_data.extend(pairs);
        self
    }

    /// Attach a file to an upload.
    pub fn file(mut self, file: FileUpload) -> Self {
        self.files.push(file);
        self
    }

    /// Allow or forbid cached responses.
    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = Some(use_cache);
        self
    }

    /// Allow or suppress cookies.
    pub fn use_cookie(mut self, use_cookie: bool) -> Self {
        self.use_cookie = Some(use_cookie);
        self
    }
    /// Set a timeout for this call. A zero timeout keeps the client default.
    /// Set a timeout for this call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set how the response body is parsed.
    pub fn content_type(mut self, format: ResponseFormat) -> Self {
        self.content_type = format;
        self
    }

    /// Set a per-call response interceptor.
    pub fn on_received(mut self, interceptor: ResponseInterceptor) -> Self {
        self.on_received = Some(interceptor);
        self
    }

    /// Apply cache, cookie and content-type rules on top of `headers`.
    pub(crate) fn finish_headers(
        &self,
        mut headers: Headers,
        content_type: &str,
        honor_cookie: bool,
    ) -> Headers {
        if self.use_cache == Some(false) {
            headers.insert(PRAGMA.to_string(), "no-cache".to_string());
            headers.insert(CACHE_CONTROL.to_string(), "no-cache".to_string());
        }

        headers.insert(CONTENT_TYPE.to_string(), content_type.to_string());

        if honor_cookie && self.use_cookie == Some(false) {
            headers.insert(COOKIE.to_string(), String::new());
        }

        headers
    }

    /// Multipart parts: encoded form fields first, then files.
    pub(crate) fn multipart_parts(&self) -> Vec<Part> {
        let fields = self.form_data.iter().map(|(key, value)| Part::Text {
            name: encode_component(key),
            value: encode_component(value),
        });
        let files = self.files.iter().cloned().map(FileUpload::into_part);
        fields.chain(files).collect()
    }
}

impl std::fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestOptions")
            .field("headers", &self.headers)
            .field("params", &self.params)
            .field("form_data", &self.form_data)
            .field("files", &self.files)
            .field("use_cache", &self.use_cache)
            .field("use_cookie", &self.use_cookie)
            .field("timeout", &self.timeout)
            .field("content_type", &self.content_type)
            .field("on_received", &self.on_received.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_always_set() {
        let options = RequestOptions::new().header(CONTENT_TYPE, "text/plain");
        let base = options.headers.clone().unwrap_or_default();
        let headers = options.finish_headers(base, JSON_CONTENT_TYPE, false);
        assert_eq!(headers.get(CONTENT_TYPE).map(String::as_str), Some(JSON_CONTENT_TYPE));
        assert!(!headers.contains_key(PRAGMA));
    }

    #[test]
    fn test_no_cache_headers() {
        let headers = RequestOptions::new()
            .use_cache(false)
            .finish_headers(Headers::new(), FORM_CONTENT_TYPE, true);
        assert_eq!(headers.get(PRAGMA).map(String::as_str), Some("no-cache"));
        assert_eq!(headers.get(CACHE_CONTROL).map(String::as_str), Some("no-cache"));
    }

    #[test]
    fn test_use_cache_true_adds_nothing() {
        let headers = RequestOptions::new()
            .use_cache(true)
            .finish_headers(Headers::new(), FORM_CONTENT_TYPE, true);
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_cookie_cleared_only_when_honored() {
        let mut base = Headers::new();
        base.insert(COOKIE.to_string(), "session=abc".to_string());
        let options = RequestOptions::new().use_cookie(false);

        let post = options.finish_headers(base.clone(), FORM_CONTENT_TYPE, true);
        assert_eq!(post.get(COOKIE).map(String::as_str), Some(""));

        let get = options.finish_headers(base, JSON_CONTENT_TYPE, false);
        assert_eq!(get.get(COOKIE).map(String::as_str), Some("session=abc"));
    }

    #[test]
    fn test_multipart_parts_order() {
        let options = RequestOptions::new()
            .form_field("title", "my photo")
            .file(FileUpload::new("photo", "file:///tmp/p.jpg", "p.jpg").mime_type("image/jpeg"))
            .form_field("tag", "a&b");

        let parts = options.multipart_parts();
        assert_eq!(parts.len(), 3);
        assert_eq!(
            parts[0],
            Part::Text {
                name: "title".to_string(),
                value: "my%20photo".to_string()
            }
        );
        assert_eq!(
            parts[1],
            Part::Text {
                name: "tag".to_string(),
                value: "a%26b".to_string()
            }
        );
        assert_eq!(
            parts[2],
            Part::File {
                name: "photo".to_string(),
                filename: "p.jpg".to_string(),
                mime_type: Some("image/jpeg".to_string()),
                path: PathBuf::from("/tmp/p.jpg"),
            }
        );
    }
}
