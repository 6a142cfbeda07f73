//! Connectivity providers: the platform side of reachability.

use std::sync::Arc;

use futures_util::future::BoxFuture;
use netdev::interface::InterfaceType;

use super::state::ConnectionInfo;
use crate::error::{NetworkError, Result};
use tether_core::logging::targets;

/// Callback receiving pushed connectivity reports.
pub type ConnectivityHandler = Arc<dyn Fn(ConnectionInfo) + Send + Sync>;

/// Keeps a provider subscription alive. Dropping it unsubscribes.
pub struct WatchHandle {
    _guard: Box<dyn Send>,
}

impl WatchHandle {
    /// Wrap whatever object keeps the underlying subscription alive.
    pub fn new<T: Send + 'static>(guard: T) -> Self {
        Self {
            _guard: Box::new(guard),
        }
    }
}

impl std::fmt::Debug for WatchHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchHandle").finish_non_exhaustive()
    }
}

/// Source of connectivity information.
pub trait ConnectivityProvider: Send + Sync {
    /// Query the current connection type once.
    fn current_state(&self) -> BoxFuture<'static, Result<ConnectionInfo>>;

    /// Deliver every subsequent change to `handler` until the handle is dropped.
    fn subscribe(&self, handler: ConnectivityHandler) -> Result<WatchHandle>;
}

/// Provider backed by the operating system's interface table.
///
/// The default interface is classified by its link type; interface changes
/// are watched with `netwatcher`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlatformConnectivity;

impl PlatformConnectivity {
    /// Create a platform provider.
    pub fn new() -> Self {
        Self
    }
}

impl ConnectivityProvider for PlatformConnectivity {
    fn current_state(&self) -> BoxFuture<'static, Result<ConnectionInfo>> {
        Box::pin(async {
            tokio::task::spawn_blocking(classify_default_interface)
                .await
                .map_err(|e| NetworkError::Connectivity(e.to_string()))
        })
    }

    fn subscribe(&self, handler: ConnectivityHandler) -> Result<WatchHandle> {
        let handle = netwatcher::watch_interfaces(move |update| {
            tracing::trace!(
                target: targets::NETWORK_INFO,
                added = update.diff.added.len(),
                removed = update.diff.removed.len(),
                "interface update"
            );
            handler(classify_default_interface());
        })
        .map_err(|e| NetworkError::Connectivity(e.to_string()))?;

        Ok(WatchHandle::new(handle))
    }
}

/// Classify the interface carrying the default route.
fn classify_default_interface() -> ConnectionInfo {
    match netdev::get_default_interface() {
        Ok(iface) if iface.is_up() && !iface.is_loopback() => {
            ConnectionInfo::new(classify_link(&iface.if_type))
        }
        Ok(_) => ConnectionInfo::new("none"),
        Err(err) => {
            tracing::debug!(target: targets::NETWORK_INFO, error = %err, "no default interface");
            ConnectionInfo::new("none")
        }
    }
}

/// Map a link type to a connection type.
fn classify_link(link: &InterfaceType) -> &'static str {
    match link {
        InterfaceType::Wireless80211 => "wifi",
        InterfaceType::Wwanpp | InterfaceType::Wwanpp2 | InterfaceType::Wman => "cellular",
        InterfaceType::Ethernet
        | InterfaceType::FastEthernetT
        | InterfaceType::FastEthernetFx
        | InterfaceType::GigabitEthernet => "ethernet",
        _ => "unknown",
    }
}
