//! Response interceptors.
//!
//! An interceptor receives the parsed body of every successful response plus
//! the options of the call, and returns the value the caller will see. It
//! runs exactly once per successful request and never on timeout or error.

use std::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{self, BoxFuture};
use serde_json::Value;

use super::request::RequestOptions;
use crate::error::{NetworkError, Result};

/// Type alias for response interceptors.
///
/// Returning an error fails the call with that error.
pub type ResponseInterceptor =
    Arc<dyn Fn(Value, &RequestOptions) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// The interceptor used when none is configured: returns the body unchanged.
pub fn identity() -> ResponseInterceptor {
    Arc::new(|body: Value, _: &RequestOptions| {
        future::ready(Ok::<_, NetworkError>(body)).boxed()
    })
}

/// Wrap a synchronous transformation.
///
/// ```ignore
/// let unwrap_data = interceptor(|body, _| Ok(body["data"].clone()));
/// ```
pub fn interceptor<F>(f: F) -> ResponseInterceptor
where
    F: Fn(Value, &RequestOptions) -> Result<Value> + Send + Sync + 'static,
{
    Arc::new(move |body: Value, options: &RequestOptions| {
        future::ready(f(body, options)).boxed()
    })
}

/// Wrap an asynchronous transformation. The call waits for the returned future.
pub fn async_interceptor<F, Fut>(f: F) -> ResponseInterceptor
where
    F: Fn(Value, &RequestOptions) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(move |body: Value, options: &RequestOptions| f(body, options).boxed())
}
