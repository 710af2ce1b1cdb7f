//! # Lazy, cold, push-based stream factory.
//!
//! [`Observable`] wraps a single subscribe function: "start producing and
//! deliver signals to this observer". Constructing an observable has no side
//! effect; side effects begin when [`subscribe`](Observable::subscribe) runs
//! the wrapped function, independently for every call.
//!
//! ## Control flow
//! ```text
//! consumer ── subscribe ──► outermost operator ── subscribe ──► … ──► producer
//! producer ── next/error/complete ──► … ──► outermost operator ──► consumer
//! consumer ── dispose ──► transitively disposes every nested subscription
//! ```
//!
//! Subscriptions chain outermost → innermost; signals flow back the opposite
//! way; disposal cascades top-down through the attached teardown tree.

use std::sync::Arc;

use crate::core::observer::Observer;
use crate::core::subscription::Subscription;
use crate::error::StreamError;

type SubscribeFn<T> = dyn Fn(Observer<T>) -> Subscription + Send + Sync;

/// Lazy, cold stream of `T` values.
///
/// Cheap to clone: clones share the subscribe function and nothing else.
/// Each [`subscribe`](Observable::subscribe) call is an independent
/// activation with its own lifetime, ending at disposal or at the terminal
/// signal, whichever comes first.
pub struct Observable<T> {
    subscribe_fn: Arc<SubscribeFn<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            subscribe_fn: Arc::clone(&self.subscribe_fn),
        }
    }
}

impl<T: Send + 'static> Observable<T> {
    /// Wraps a subscribe function into an observable.
    ///
    /// The function receives the downstream [`Observer`] and returns the
    /// [`Subscription`] that releases whatever producing requires.
    #[must_use]
    pub fn new(subscribe: impl Fn(Observer<T>) -> Subscription + Send + Sync + 'static) -> Self {
        Self {
            subscribe_fn: Arc::new(subscribe),
        }
    }

    /// Subscribes with a structured observer. The typed entry point.
    ///
    /// Runs the wrapped subscribe function, then ties the observer's signal
    /// gate to the returned subscription: disposing it suppresses any signal
    /// a producer might still attempt to deliver.
    pub fn subscribe(&self, observer: Observer<T>) -> Subscription {
        let gate = observer.gate();
        let sub = (self.subscribe_fn)(observer);
        sub.attach_action(move || {
            gate.close();
        });
        sub
    }

    /// Subscribes with the three-callback form.
    ///
    /// Convenience over [`subscribe`](Self::subscribe) mirroring the
    /// positional calling convention; see [`for_each`](Self::for_each) for
    /// the next-only form.
    pub fn subscribe_fns(
        &self,
        next: impl Fn(T) + Send + Sync + 'static,
        error: impl Fn(StreamError) + Send + Sync + 'static,
        complete: impl Fn() + Send + Sync + 'static,
    ) -> Subscription {
        self.subscribe(Observer::new(next, error, complete))
    }

    /// Subscribes with a value callback only; terminals are no-ops.
    pub fn for_each(&self, next: impl Fn(T) + Send + Sync + 'static) -> Subscription {
        self.subscribe(Observer::from_next(next))
    }
}
