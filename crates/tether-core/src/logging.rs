//! Logging facilities for Tether.
//!
//! Tether uses the `tracing` crate for instrumentation. To see logs, install a
//! tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("tether_net=debug")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "tether_core::signal";
    /// HTTP client target.
    pub const HTTP: &str = "tether_net::http";
    /// Reachability monitoring target.
    pub const NETWORK_INFO: &str = "tether_net::network_info";
}
