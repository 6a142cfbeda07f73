//! Core primitives for Tether.
//!
//! This crate provides the pieces shared by the networking layer:
//!
//! - **Signal/Slot System**: Type-safe publish/subscribe notifications
//! - **Logging**: `tracing` target names for filtering by subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use tether_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//!
//! value_changed.disconnect(conn_id);
//! ```

pub mod logging;
pub mod signal;

pub use signal::{ConnectionGuard, ConnectionId, Signal};
