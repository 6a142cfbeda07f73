//! The per-request race between the transport and a deadline.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::task::JoinHandle;
use tokio::time::Sleep;

use super::request::HttpRequest;
use super::response::ResponseFormat;
use super::transport::Transport;
use crate::error::{NetworkError, Result};
use tether_core::logging::targets;

/// One in-flight request: a deadline and the task running the transport.
///
/// Exactly one of {response, deadline} settles the request. Dropping a pending
/// request disarms its deadline and cancels the transport task if it is still
/// running.
pub(crate) struct PendingRequest {
    task: JoinHandle<Result<Value>>,
    deadline: Pin<Box<Sleep>>,
    cancelled: bool,
}

impl PendingRequest {
    /// Arm the deadline and start the transport task.
    ///
    /// Body parsing happens inside the task, so a slow body read counts
    /// against the deadline too.
    pub(crate) fn dispatch(
        transport: Arc<dyn Transport>,
        request: HttpRequest,
        format: ResponseFormat,
        timeout: Duration,
    ) -> Self {
        let deadline = Box::pin(tokio::time::sleep(timeout));
        let in_flight = transport.execute(request);
        let task = tokio::spawn(async move {
            let response = in_flight.await?;
            format.parse(&response)
        });

        Self {
            task,
            deadline,
            cancelled: false,
        }
    }

    /// Wait for whichever side settles first.
    pub(crate) async fn settle(mut self) -> Result<Value> {
        let outcome = tokio::select! {
            biased;
            joined = &mut self.task => match joined {
                Ok(result) => result,
                Err(err) if err.is_cancelled() => Err(NetworkError::Cancelled),
                Err(err) => Err(NetworkError::Request(format!("transport task failed: {err}"))),
            },
            () = &mut self.deadline => Err(NetworkError::Timeout),
        };

        if outcome.is_err() {
            self.cancel();
        }
        outcome
    }

    /// Best-effort cancellation of the transport task, at most once.
    fn cancel(&mut self) {
        if self.cancelled || self.task.is_finished() {
            return;
        }
        self.cancelled = true;
        self.task.abort();
        tracing::debug!(target: targets::HTTP, "cancelled in-flight transport");
    }
}

impl Drop for PendingRequest {
    fn drop(&mut self) {
        self.cancel();
    }
}
