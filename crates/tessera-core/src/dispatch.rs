//! DOM-style custom events and listener registration.
//!
//! A widget owns an [`EventTarget`] and exposes it as its subscription point.
//! Dispatch is synchronous: every matching listener runs to completion before
//! [`EventTarget::dispatch`] returns. Listeners must not rely on the order in
//! which other listeners for the same event are called.
//!
//! # Examples
//!
//! ```
//! use tessera_core::{CustomEvent, EventTarget};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! let mut target = EventTarget::new();
//! let calls = Arc::new(AtomicUsize::new(0));
//! let seen = calls.clone();
//! target.add_listener("remove", move |_event| {
//!     seen.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! let mut event = CustomEvent::new("remove").cancelable(true);
//! assert!(target.dispatch(&mut event));
//! assert_eq!(calls.load(Ordering::SeqCst), 1);
//! ```

use std::fmt;
use tracing::{debug, trace};

/// Callback invoked for a dispatched event.
pub type ListenerFn = Box<dyn Fn(&mut CustomEvent) + Send + Sync>;

/// Handle returned by [`EventTarget::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Raw identifier value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// A named notification with standard event metadata and no payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomEvent {
    name: String,
    cancelable: bool,
    default_prevented: bool,
    /// Monotonic sequence number assigned by the dispatching target.
    timestamp: u64,
}

impl CustomEvent {
    /// Create a non-cancelable event.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cancelable: false,
            default_prevented: false,
            timestamp: 0,
        }
    }

    /// Set whether listeners may cancel the event.
    #[must_use]
    pub const fn cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    /// Event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the event can be canceled.
    #[must_use]
    pub const fn is_cancelable(&self) -> bool {
        self.cancelable
    }

    /// Whether a listener canceled the event.
    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Sequence number of the dispatch that delivered this event.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Cancel the event. Has no effect on non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.cancelable {
            self.default_prevented = true;
        }
    }
}

struct Registration {
    id: ListenerId,
    name: String,
    callback: ListenerFn,
}

/// Listener registry and synchronous dispatcher.
#[derive(Default)]
pub struct EventTarget {
    listeners: Vec<Registration>,
    next_id: u64,
    /// Dispatch counter.
    counter: u64,
}

impl EventTarget {
    /// Create an empty target.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for events named `name`.
    pub fn add_listener<F>(&mut self, name: impl Into<String>, callback: F) -> ListenerId
    where
        F: Fn(&mut CustomEvent) + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        let name = name.into();
        debug!(listener = id.0, event = %name, "listener registered");
        self.listeners.push(Registration {
            id,
            name,
            callback: Box::new(callback),
        });
        id
    }

    /// Unregister a listener. Returns `false` if the id was unknown.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|r| r.id != id);
        let removed = self.listeners.len() != before;
        if removed {
            debug!(listener = id.0, "listener removed");
        }
        removed
    }

    /// Number of listeners registered for `name`.
    #[must_use]
    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.iter().filter(|r| r.name == name).count()
    }

    /// Total number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Check if no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Number of events dispatched so far.
    #[must_use]
    pub const fn dispatch_count(&self) -> u64 {
        self.counter
    }

    /// Deliver `event` to every listener registered for its name.
    ///
    /// Returns `false` if the event is cancelable and a listener called
    /// [`CustomEvent::prevent_default`], `true` otherwise.
    pub fn dispatch(&mut self, event: &mut CustomEvent) -> bool {
        self.counter += 1;
        event.timestamp = self.counter;

        let name = event.name.clone();
        let mut delivered = 0usize;
        for registration in self.listeners.iter().filter(|r| r.name == name) {
            trace!(listener = registration.id.0, event = %name, "delivering");
            (registration.callback)(event);
            delivered += 1;
        }

        debug!(
            event = %name,
            delivered,
            default_prevented = event.default_prevented,
            "event dispatched"
        );
        !event.default_prevented
    }
}

impl fmt::Debug for EventTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTarget")
            .field("listeners", &self.listeners.len())
            .field("dispatched", &self.counter)
            .finish()
    }
}
