//! Change notification.
//!
//! Controllers hold a [`ChangeNotifier`] shared with the container that owns
//! them. Every mutation notifies it before returning, so listeners always
//! observe the state the mutation produced.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::value::Value;

/// What changed.
#[derive(Debug, Clone, PartialEq)]
pub enum ChangeEvent {
    /// A control's value was written.
    ValueChanged {
        key: String,
        /// Position within a repeatable field, `None` for single fields.
        index: Option<usize>,
        value: Value,
    },
    /// A repeatable field gained an item at `index`.
    ItemAdded { key: String, index: usize },
    /// A repeatable field lost the item at `index`.
    ItemRemoved { key: String, index: usize },
    /// A field (or the whole form) was reset to its defaults.
    Reset { key: Option<String> },
}

impl ChangeEvent {
    /// Key of the field the event belongs to, `None` for form-wide events.
    pub fn key(&self) -> Option<&str> {
        match self {
            ChangeEvent::ValueChanged { key, .. }
            | ChangeEvent::ItemAdded { key, .. }
            | ChangeEvent::ItemRemoved { key, .. } => Some(key),
            ChangeEvent::Reset { key } => key.as_deref(),
        }
    }
}

/// Unique identifier for a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

impl ListenerId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

type Listener = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

/// Handle for registering and notifying change listeners.
///
/// Cheap to clone; clones share the same listener list.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    listeners: Arc<Mutex<Vec<(ListenerId, Listener)>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It is called synchronously for every event.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&ChangeEvent) + Send + Sync + 'static,
    {
        let id = ListenerId::new();
        self.with_listeners(|listeners| listeners.push((id, Arc::new(listener))));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        self.with_listeners(|listeners| {
            let before = listeners.len();
            listeners.retain(|(i, _)| *i != id);
            listeners.len() != before
        })
    }

    pub fn listener_count(&self) -> usize {
        self.with_listeners(|listeners| listeners.len())
    }

    /// Deliver an event to every listener.
    ///
    /// Listeners are snapshotted first, so a listener may subscribe or
    /// unsubscribe while being called.
    pub fn notify(&self, event: &ChangeEvent) {
        let snapshot: Vec<Listener> =
            self.with_listeners(|listeners| listeners.iter().map(|(_, l)| Arc::clone(l)).collect());
        for listener in snapshot {
            listener(event);
        }
    }

    fn with_listeners<R>(&self, f: impl FnOnce(&mut Vec<(ListenerId, Listener)>) -> R) -> R {
        match self.listeners.lock() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listener_count())
            .finish()
    }
}
