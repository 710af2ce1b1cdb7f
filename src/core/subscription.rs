//! # Disposable handle for one stream activation.
//!
//! [`Subscription`] represents one active subscription of an
//! [`Observable`](crate::Observable). Its only operation is [`dispose`],
//! which stops future signal delivery and releases whatever the activation
//! holds: timer tasks, event listeners, nested subscriptions of composed
//! operators.
//!
//! ## Rules
//! - **Idempotent**: `dispose()` transitions active → disposed exactly once;
//!   repeated calls are no-ops and never double-release.
//! - **Transitive**: disposing a subscription disposes every child
//!   subscription and runs every release action attached to it, in attach
//!   order, within the same call.
//! - **Late attach**: attaching to an already-disposed subscription runs the
//!   release action (or disposes the child) immediately. Operators rely on
//!   this: they create the subscription first, let delivery callbacks capture
//!   a clone, and attach the upstream subscription afterwards — so a
//!   synchronous `dispose()` during the subscribe call is still honored.
//!
//! [`dispose`]: Subscription::dispose

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// One teardown entry: either a release action or a nested subscription.
enum Teardown {
    Action(Box<dyn FnOnce() + Send>),
    Child(Subscription),
}

struct Inner {
    disposed: AtomicBool,
    teardown: Mutex<Vec<Teardown>>,
}

/// Disposable handle returned by subscribing.
///
/// Cheap to clone; all clones share the same disposal state, so any clone can
/// dispose the activation and every clone observes the transition.
///
/// The subscriber that receives a `Subscription` from
/// [`subscribe`](crate::Observable::subscribe) owns it; operators that create
/// nested subscriptions attach them here so disposal cascades.
#[derive(Clone)]
pub struct Subscription {
    inner: Arc<Inner>,
}

impl Subscription {
    /// Creates an empty, active subscription with no teardown attached yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                disposed: AtomicBool::new(false),
                teardown: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Creates a subscription whose disposal runs a single release action.
    ///
    /// Used by producer adapters to wrap resource release (deregistering a
    /// listener, cancelling a timer task).
    #[must_use]
    pub fn from_action(release: impl FnOnce() + Send + 'static) -> Self {
        let sub = Self::new();
        sub.attach_action(release);
        sub
    }

    /// Returns `true` once [`dispose`](Self::dispose) has been called.
    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::SeqCst)
    }

    /// Stops the activation and releases everything attached to it.
    ///
    /// Runs all release actions and disposes all child subscriptions, in
    /// attach order, synchronously. Safe to call any number of times; only
    /// the first call does work.
    pub fn dispose(&self) {
        if self
            .inner
            .disposed
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        // Drain under the lock, run outside it: teardown may re-enter
        // (a child disposing grandchildren, a release action closing a gate).
        let drained = {
            let mut guard = self
                .inner
                .teardown
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *guard)
        };

        for entry in drained {
            match entry {
                Teardown::Action(release) => release(),
                Teardown::Child(child) => child.dispose(),
            }
        }
    }

    /// Attaches a child subscription to be disposed together with this one.
    ///
    /// If this subscription is already disposed, the child is disposed
    /// immediately.
    pub fn attach(&self, child: Subscription) {
        let mut guard = self
            .inner
            .teardown
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.inner.disposed.load(Ordering::SeqCst) {
            drop(guard);
            child.dispose();
        } else {
            guard.push(Teardown::Child(child));
        }
    }

    /// Attaches a release action to run on disposal.
    ///
    /// If this subscription is already disposed, the action runs immediately.
    pub fn attach_action(&self, release: impl FnOnce() + Send + 'static) {
        let mut guard = self
            .inner
            .teardown
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.inner.disposed.load(Ordering::SeqCst) {
            drop(guard);
            release();
        } else {
            guard.push(Teardown::Action(Box::new(release)));
        }
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_dispose_runs_release_action_once() {
        let count = Arc::new(AtomicUsize::new(0));
        let sub = {
            let count = count.clone();
            Subscription::from_action(move || {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };

        assert!(!sub.is_disposed());
        sub.dispose();
        sub.dispose();
        sub.dispose();

        assert!(sub.is_disposed());
        assert_eq!(count.load(Ordering::SeqCst), 1, "release must run exactly once");
    }

    #[test]
    fn test_dispose_cascades_to_children() {
        let count = Arc::new(AtomicUsize::new(0));
        let parent = Subscription::new();
        for _ in 0..3 {
            let count = count.clone();
            parent.attach(Subscription::from_action(move || {
                count.fetch_add(1, Ordering::SeqCst);
            }));
        }

        parent.dispose();
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_attach_after_dispose_runs_immediately() {
        let count = Arc::new(AtomicUsize::new(0));
        let sub = Subscription::new();
        sub.dispose();

        {
            let count = count.clone();
            sub.attach_action(move || {
                count.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);

        let child = {
            let count = count.clone();
            Subscription::from_action(move || {
                count.fetch_add(1, Ordering::SeqCst);
            })
        };
        sub.attach(child.clone());
        assert!(child.is_disposed());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_clones_share_disposal_state() {
        let sub = Subscription::new();
        let other = sub.clone();

        other.dispose();
        assert!(sub.is_disposed());
    }

    #[test]
    fn test_self_dispose_during_subscribe_shape() {
        // An operator creates the subscription, a synchronous delivery
        // disposes it, and only then is the upstream attached. The upstream
        // must still be released.
        let released = Arc::new(AtomicBool::new(false));
        let sub = Subscription::new();
        sub.dispose();

        let upstream = {
            let released = released.clone();
            Subscription::from_action(move || {
                released.store(true, Ordering::SeqCst);
            })
        };
        sub.attach(upstream);

        assert!(released.load(Ordering::SeqCst));
    }
}
