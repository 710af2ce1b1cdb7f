//! # Event-target adapter: streams from listener registration.
//!
//! [`EventTarget`] is the interface the core consumes: anything that can
//! register and deregister named-event listeners. [`Observable::from_event`]
//! turns one registration into a stream — subscribing adds a listener whose
//! calls become `next` signals, disposing removes exactly that listener.
//!
//! The adapter never emits `error` or `complete` on its own: an event stream
//! is an infinite, error-free source whose only termination mechanism is
//! disposal (typically via `take`/`take_until`).
//!
//! [`EventEmitter`] is the in-process reference implementation, used by the
//! demos and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::{Observable, Observer, Subscription};

/// Callback registered on an [`EventTarget`] for a named event.
pub type EventListener<T> = Arc<dyn Fn(T) + Send + Sync>;

/// Opaque handle identifying one registered listener.
///
/// Stands in for listener identity: removal names the exact registration to
/// undo, so two subscriptions to the same event never unhook each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Anything that can register and deregister named-event listeners.
pub trait EventTarget<T>: Send + Sync {
    /// Registers `listener` for `event`; returns the handle removal needs.
    fn add_listener(&self, event: &str, listener: EventListener<T>) -> ListenerId;

    /// Deregisters the listener previously returned for `event`.
    ///
    /// Unknown handles are ignored (the listener may already be gone).
    fn remove_listener(&self, event: &str, id: ListenerId);
}

/// In-process event target: a listener registry keyed by event name.
///
/// ### Properties
/// - **Non-blocking emit**: listeners are snapshotted under the lock and
///   invoked outside it, so a listener may add/remove listeners (including
///   itself) without deadlocking.
/// - **Snapshot delivery**: listeners removed during an `emit` still receive
///   that emission; listeners added during one do not.
pub struct EventEmitter<T> {
    next_id: AtomicU64,
    listeners: Mutex<HashMap<String, Vec<(ListenerId, EventListener<T>)>>>,
}

impl<T> EventEmitter<T> {
    /// Creates an emitter with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Delivers `value` to every listener currently registered for `event`.
    pub fn emit(&self, event: &str, value: T)
    where
        T: Clone,
    {
        let snapshot: Vec<EventListener<T>> = {
            let guard = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            match guard.get(event) {
                Some(entries) => entries.iter().map(|(_, l)| Arc::clone(l)).collect(),
                None => return,
            }
        };
        for listener in snapshot {
            listener(value.clone());
        }
    }

    /// Number of listeners currently registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(event)
            .map_or(0, Vec::len)
    }
}

impl<T> Default for EventEmitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventTarget<T> for EventEmitter<T> {
    fn add_listener(&self, event: &str, listener: EventListener<T>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(event.to_string())
            .or_default()
            .push((id, listener));
        id
    }

    fn remove_listener(&self, event: &str, id: ListenerId) {
        let mut guard = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entries) = guard.get_mut(event) {
            entries.retain(|(entry_id, _)| *entry_id != id);
            if entries.is_empty() {
                guard.remove(event);
            }
        }
    }
}

impl<T: Send + 'static> Observable<T> {
    /// Stream of every `event` delivery on `target`.
    ///
    /// Subscribing registers one listener; disposing deregisters exactly
    /// that listener. Each subscription is an independent registration.
    pub fn from_event(target: Arc<dyn EventTarget<T>>, event: impl Into<String>) -> Observable<T> {
        let event: Arc<str> = Arc::from(event.into());

        Observable::new(move |observer: Observer<T>| {
            let listener: EventListener<T> = {
                let observer = observer.clone();
                Arc::new(move |value| observer.next(value))
            };
            let id = target.add_listener(&event, listener);

            let target = Arc::clone(&target);
            let event = Arc::clone(&event);
            Subscription::from_action(move || target.remove_listener(&event, id))
        })
    }
}
