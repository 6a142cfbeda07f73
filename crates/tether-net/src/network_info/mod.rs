//! Network reachability for Tether.
//!
//! This module keeps a best-effort classification of the current network
//! connection (`WIFI`, `CELLULAR`, `NONE`, ...) and announces changes through
//! a [`Signal`](tether_core::Signal).
//!
//! # Example
//!
//! ```ignore
//! use tether_net::network_info;
//!
//! // The process-wide monitor, started in the background on first use
//! let monitor = network_info::shared();
//!
//! let _guard = monitor.on_change(|state| {
//!     println!("Reachability changed: {}", state);
//! });
//!
//! if monitor.current_state().is_connected() {
//!     println!("Online");
//! }
//! ```
//!
//! Tests and applications that want isolation construct their own
//! [`ReachabilityMonitor`] around any [`ConnectivityProvider`].

mod monitor;
mod provider;
mod state;

use std::sync::{Arc, OnceLock};

pub use monitor::ReachabilityMonitor;
pub use provider::{ConnectivityHandler, ConnectivityProvider, PlatformConnectivity, WatchHandle};
pub use state::{ConnectionInfo, ConnectionState};

/// The process-wide monitor over [`PlatformConnectivity`].
///
/// Created and started on first access; it lives for the rest of the process.
pub fn shared() -> Arc<ReachabilityMonitor> {
    static SHARED: OnceLock<Arc<ReachabilityMonitor>> = OnceLock::new();
    Arc::clone(SHARED.get_or_init(|| {
        ReachabilityMonitor::launch(Arc::new(PlatformConnectivity::new()))
    }))
}
