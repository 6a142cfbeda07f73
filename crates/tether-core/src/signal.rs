//! Signal/slot system for Tether.
//!
//! A [`Signal<Args>`] is a typed publish/subscribe channel. Slots (callbacks)
//! are connected to it and invoked synchronously, in registration order,
//! every time the signal is emitted.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type used to emit notifications
//! - [`ConnectionId`] - Identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Example
//!
//! ```
//! use tether_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//!
//! text_changed.disconnect(conn_id);
//! ```

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::logging::targets;

/// A unique identifier for a signal-slot connection.
///
/// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
/// Identifiers are never reused by the signal that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Connections in registration order.
struct Connections<Args> {
    next_id: AtomicU64,
    slots: Mutex<Vec<(ConnectionId, Slot<Args>)>>,
}

impl<Args> Connections<Args> {
    fn remove(&self, id: ConnectionId) -> bool {
        let mut slots = self.slots.lock();
        match slots.iter().position(|(slot_id, _)| *slot_id == id) {
            Some(index) => {
                slots.remove(index);
                true
            }
            None => false,
        }
    }
}

/// A type-safe signal that can have multiple connected slots.
///
/// When a signal is emitted, every connected slot is invoked with a reference
/// to the provided arguments, in the order the slots were connected.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple for multiple arguments.
///
/// # Thread Safety
///
/// `Signal<Args>` is `Send + Sync` and can be shared between threads. Slots run
/// on whichever thread calls [`emit`](Self::emit).
pub struct Signal<Args> {
    connections: Arc<Connections<Args>>,
    blocked: AtomicBool,
}

impl<Args: Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Send + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Connections {
                next_id: AtomicU64::new(1),
                slots: Mutex::new(Vec::new()),
            }),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use tether_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// assert!(signal.disconnect(id));
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = ConnectionId(self.connections.next_id.fetch_add(1, Ordering::Relaxed));
        self.connections.slots.lock().push((id, Arc::new(slot)));
        id
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.remove(id)
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.slots.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.slots.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in registration order.
    ///
    /// The slot list is snapshotted before any slot runs, so slots may connect
    /// or disconnect freely; such changes apply from the next emission.
    #[tracing::instrument(skip_all, target = "tether_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let snapshot: Vec<Slot<Args>> = self
            .connections
            .slots
            .lock()
            .iter()
            .map(|(_, slot)| Arc::clone(slot))
            .collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = snapshot.len(), "emitting signal");

        for slot in snapshot {
            slot(&args);
        }
    }

    /// Connect a slot with automatic disconnection when the guard is dropped.
    ///
    /// The guard only holds a weak reference to the signal's connection list,
    /// so dropping it after the signal is gone is harmless.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            connections: Arc::downgrade(&self.connections),
            id: Some(id),
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.slots.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`].
///
/// # Example
///
/// ```
/// use tether_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Signal::<i32>::new();
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |&n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.emit(42);
/// }
/// signal.emit(43);
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
#[must_use = "dropping the guard disconnects the slot immediately"]
pub struct ConnectionGuard<Args> {
    connections: Weak<Connections<Args>>,
    id: Option<ConnectionId>,
}

impl<Args> ConnectionGuard<Args> {
    /// The ID of the guarded connection, if it has not been released.
    pub fn id(&self) -> Option<ConnectionId> {
        self.id
    }

    /// Disconnect now instead of waiting for drop.
    ///
    /// Returns `true` if the connection was still registered.
    pub fn disconnect(&mut self) -> bool {
        match (self.id.take(), self.connections.upgrade()) {
            (Some(id), Some(connections)) => connections.remove(id),
            _ => false,
        }
    }

    /// Keep the connection alive for the lifetime of the signal.
    pub fn forget(mut self) -> Option<ConnectionId> {
        self.id.take()
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl<Args> std::fmt::Debug for ConnectionGuard<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard").field("id", &self.id).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_signal_connect_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(42);
        signal.emit(100);

        let values = received.lock();
        assert_eq!(*values, vec![42, 100]);
    }

    #[test]
    fn test_slots_run_in_registration_order() {
        let signal = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for n in 0..5 {
            let order = order.clone();
            signal.connect(move |_| order.lock().push(n));
        }
        signal.emit(());

        assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_order_survives_disconnect_and_reconnect() {
        let signal = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let o = order.clone();
        let first = signal.connect(move |_| o.lock().push("first"));
        let o = order.clone();
        signal.connect(move |_| o.lock().push("second"));
        assert!(signal.disconnect(first));
        let o = order.clone();
        signal.connect(move |_| o.lock().push("third"));

        signal.emit(());
        assert_eq!(*order.lock(), vec!["second", "third"]);
    }

    #[test]
    fn test_disconnect() {
        let signal = Signal::<i32>::new();
        let counter = Arc::new(Mutex::new(0));

        let counter_clone = counter.clone();
        let id = signal.connect(move |_| {
            *counter_clone.lock() += 1;
        });

        signal.emit(1);
        assert!(signal.disconnect(id));
        assert!(!signal.disconnect(id));
        signal.emit(2);

        assert_eq!(*counter.lock(), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_blocked_signal() {
        let signal = Signal::<i32>::new();
        let counter = Arc::new(Mutex::new(0));

        let counter_clone = counter.clone();
        signal.connect(move |_| {
            *counter_clone.lock() += 1;
        });

        signal.set_blocked(true);
        signal.emit(1);
        assert_eq!(*counter.lock(), 0);

        signal.set_blocked(false);
        signal.emit(2);
        assert_eq!(*counter.lock(), 1);
    }

    #[test]
    fn test_slot_can_disconnect_during_emit() {
        let signal = Arc::new(Signal::<i32>::new());
        let counter = Arc::new(Mutex::new(0));
        let own_id = Arc::new(Mutex::new(None));

        let sig = Arc::downgrade(&signal);
        let id_cell = own_id.clone();
        let counter_clone = counter.clone();
        let id = signal.connect(move |_| {
            *counter_clone.lock() += 1;
            if let (Some(sig), Some(id)) = (sig.upgrade(), *id_cell.lock()) {
                sig.disconnect(id);
            }
        });
        *own_id.lock() = Some(id);

        signal.emit(1);
        signal.emit(2);
        assert_eq!(*counter.lock(), 1);
    }

    #[test]
    fn test_scoped_guard_outlives_signal() {
        let signal = Signal::<i32>::new();
        let guard = signal.connect_scoped(|_| {});
        assert_eq!(signal.connection_count(), 1);
        drop(signal);
        drop(guard);
    }

    #[test]
    fn test_scoped_guard_forget() {
        let signal = Signal::<i32>::new();
        let id = signal.connect_scoped(|_| {}).forget();
        assert!(id.is_some());
        assert_eq!(signal.connection_count(), 1);
    }
}
