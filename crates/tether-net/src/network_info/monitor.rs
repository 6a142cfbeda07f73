//! Reachability monitoring.

use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex};
use tether_core::{ConnectionGuard, Signal};

use super::provider::{ConnectivityHandler, ConnectivityProvider, WatchHandle};
use super::state::{ConnectionInfo, ConnectionState};
use crate::error::Result;
use tether_core::logging::targets;

/// Tracks the current connection type and emits a signal when it changes.
///
/// Every report, whether from an explicit [`probe`](Self::probe) or pushed by
/// the provider, goes through the same path: normalize, compare with the
/// stored state, store, and emit only if it differs. Missing or empty reports
/// are ignored, so consecutive identical states never emit twice.
///
/// Reports may arrive concurrently from the platform watcher thread and from
/// a probe on the runtime. Each report is delivered whole under one delivery
/// lock, so listeners see changes in the order they were stored and the last
/// event delivered always matches [`current_state`](Self::current_state).
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use tether_net::network_info::{PlatformConnectivity, ReachabilityMonitor};
///
/// let monitor = ReachabilityMonitor::new(Arc::new(PlatformConnectivity::new()));
///
/// let _guard = monitor.on_change(|state| {
///     println!("Connection is now {state}");
/// });
///
/// // Probe once, then follow platform notifications
/// monitor.start().await?;
/// ```
pub struct ReachabilityMonitor {
    /// Signal emitted with the new state whenever it changes.
    pub state_changed: Arc<Signal<ConnectionState>>,

    provider: Arc<dyn ConnectivityProvider>,
    inner: Arc<Mutex<MonitorInner>>,
    delivery: Arc<ReentrantMutex<()>>,
}

struct MonitorInner {
    state: ConnectionState,
    is_running: bool,
    watch: Option<WatchHandle>,
}

impl ReachabilityMonitor {
    /// Create a monitor in the `UNSET` state. No platform query is made until
    /// [`probe`](Self::probe) or [`start`](Self::start).
    pub fn new(provider: Arc<dyn ConnectivityProvider>) -> Self {
        Self {
            state_changed: Arc::new(Signal::new()),
            provider,
            inner: Arc::new(Mutex::new(MonitorInner {
                state: ConnectionState::unset(),
                is_running: false,
                watch: None,
            })),
            delivery: Arc::new(ReentrantMutex::new(())),
        }
    }

    /// Create a monitor and start it in the background on the crate runtime.
    ///
    /// A failed start is logged; the monitor then stays at its last state.
    pub fn launch(provider: Arc<dyn ConnectivityProvider>) -> Arc<Self> {
        let monitor = Arc::new(Self::new(provider));
        let starting = Arc::clone(&monitor);
        crate::runtime::spawn(async move {
            if let Err(err) = starting.start().await {
                tracing::warn!(target: targets::NETWORK_INFO, error = %err, "reachability monitor failed to start");
            }
        });
        monitor
    }

    /// The last known state, `UNSET` before the first successful probe.
    pub fn current_state(&self) -> ConnectionState {
        self.inner.lock().state.clone()
    }

    /// Register a listener for state changes.
    ///
    /// Listeners run synchronously in registration order. The listener stays
    /// connected until the returned guard is dropped.
    pub fn on_change<F>(&self, listener: F) -> ConnectionGuard<ConnectionState>
    where
        F: Fn(&ConnectionState) + Send + Sync + 'static,
    {
        self.state_changed.connect_scoped(listener)
    }

    /// Query the provider once and apply the result.
    ///
    /// On failure the stored state is left untouched and the error is returned.
    pub async fn probe(&self) -> Result<ConnectionState> {
        match self.provider.current_state().await {
            Ok(info) => {
                apply_report(&self.inner, &self.delivery, &self.state_changed, info);
                Ok(self.current_state())
            }
            Err(err) => {
                tracing::warn!(target: targets::NETWORK_INFO, error = %err, "connectivity probe failed");
                Err(err)
            }
        }
    }

    /// Probe once, then subscribe to provider notifications.
    ///
    /// Subscribing only after the probe resolves means the first state is
    /// always observed. Starting a running monitor is a no-op; if the probe
    /// fails the monitor is left stopped.
    pub async fn start(&self) -> Result<ConnectionState> {
        {
            let mut inner = self.inner.lock();
            if inner.is_running {
                return Ok(inner.state.clone());
            }
            inner.is_running = true;
        }

        let state = match self.probe().await {
            Ok(state) => state,
            Err(err) => {
                self.inner.lock().is_running = false;
                return Err(err);
            }
        };

        let weak_inner: Weak<Mutex<MonitorInner>> = Arc::downgrade(&self.inner);
        let signal = Arc::clone(&self.state_changed);
        let delivery = Arc::clone(&self.delivery);
        let handler: ConnectivityHandler = Arc::new(move |info: ConnectionInfo| {
            if let Some(inner) = weak_inner.upgrade() {
                apply_report(&inner, &delivery, &signal, info);
            }
        });

        let watch = match self.provider.subscribe(handler) {
            Ok(watch) => watch,
            Err(err) => {
                self.inner.lock().is_running = false;
                return Err(err);
            }
        };

        let mut inner = self.inner.lock();
        if inner.is_running {
            inner.watch = Some(watch);
        }
        Ok(state)
    }

    /// Stop following provider notifications. The last state is kept.
    pub fn stop(&self) {
        let watch = {
            let mut inner = self.inner.lock();
            inner.is_running = false;
            inner.watch.take()
        };
        drop(watch);
    }

    /// Check if the monitor is currently running.
    pub fn is_running(&self) -> bool {
        self.inner.lock().is_running
    }
}

impl Drop for ReachabilityMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for ReachabilityMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ReachabilityMonitor")
            .field("state", &inner.state)
            .field("is_running", &inner.is_running)
            .finish()
    }
}

/// Store a report and emit if the state changed. Returns whether it emitted.
///
/// The delivery lock is held from compare through emit. It is reentrant so a
/// listener that triggers another report on the same thread does not deadlock;
/// the state lock itself is released before listeners run.
fn apply_report(
    inner: &Mutex<MonitorInner>,
    delivery: &ReentrantMutex<()>,
    signal: &Signal<ConnectionState>,
    info: ConnectionInfo,
) -> bool {
    let Some(new_state) = ConnectionState::from_reported(info.connection_type.as_deref()) else {
        tracing::trace!(target: targets::NETWORK_INFO, "ignoring empty connectivity report");
        return false;
    };

    let _delivering = delivery.lock();
    {
        let mut guard = inner.lock();
        if guard.state == new_state {
            return false;
        }
        tracing::info!(
            target: targets::NETWORK_INFO,
            from = %guard.state,
            to = %new_state,
            "reachability changed"
        );
        guard.state = new_state.clone();
    }

    signal.emit(new_state);
    true
}
