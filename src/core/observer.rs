//! # The three-signal sink driven by a subscription.
//!
//! [`Observer`] receives the signals of one activation: zero or more `next`
//! values followed by at most one terminal (`error` or `complete`). It is a
//! concrete record of three callbacks, not a trait: [`Observer::new`] takes
//! the full triple, [`Observer::from_next`] defaults the terminals to no-ops.
//!
//! ## Signal gate
//! Every observer owns a private [`Gate`]. `next` delivers only while the
//! gate is open; `error`/`complete` deliver only on the single open → closed
//! transition. The subscription returned by
//! [`subscribe`](crate::Observable::subscribe) also closes the gate when
//! disposed. Together this enforces the signal-protocol invariant: at most
//! one terminal per activation, and nothing after disposal or a terminal —
//! even if a producer keeps calling.
//!
//! ## Fault boundary
//! Operators invoke user projections/predicates through [`fault_boundary`],
//! which catches panics and renders them as [`StreamError::Fault`] so a
//! throwing callback becomes an `error` signal instead of unwinding through
//! the producer's delivery stack and leaving its resources attached.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::StreamError;

/// Open/closed latch shared between an observer and its subscription.
///
/// Open means signals flow; closed means the activation is over (terminal
/// delivered or subscription disposed). Closing is a one-way transition.
#[derive(Clone)]
pub(crate) struct Gate {
    open: Arc<AtomicBool>,
}

impl Gate {
    pub(crate) fn new() -> Self {
        Self {
            open: Arc::new(AtomicBool::new(true)),
        }
    }

    #[inline]
    pub(crate) fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Closes the gate; returns `true` only for the transition that won.
    #[inline]
    pub(crate) fn close(&self) -> bool {
        self.open
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

type NextFn<T> = Box<dyn Fn(T) + Send + Sync>;
type ErrorFn = Box<dyn Fn(StreamError) + Send + Sync>;
type CompleteFn = Box<dyn Fn() + Send + Sync>;
type ProbeFn = Box<dyn Fn() -> bool + Send + Sync>;

struct ObserverInner<T> {
    gate: Gate,
    /// Downstream openness probe for observers derived by operators.
    ///
    /// A synchronous producer polls [`Observer::is_open`] to stop emitting;
    /// when a downstream operator terminates mid-delivery (e.g. `take`
    /// completing on the nth value, before any subscription object exists),
    /// the only synchronous signal is the downstream gate. Chaining probes
    /// makes `is_open` reflect the whole downstream, not just this link.
    probe: Option<ProbeFn>,
    next: NextFn<T>,
    error: ErrorFn,
    complete: CompleteFn,
}

/// Three-signal sink (`next`/`error`/`complete`) for one activation.
///
/// Cheap to clone; clones share the callbacks and the signal gate.
pub struct Observer<T> {
    inner: Arc<ObserverInner<T>>,
}

impl<T> Clone for Observer<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Observer<T> {
    /// Creates an observer from the full callback triple.
    #[must_use]
    pub fn new(
        next: impl Fn(T) + Send + Sync + 'static,
        error: impl Fn(StreamError) + Send + Sync + 'static,
        complete: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(ObserverInner {
                gate: Gate::new(),
                probe: None,
                next: Box::new(next),
                error: Box::new(error),
                complete: Box::new(complete),
            }),
        }
    }

    /// Creates a derived observer whose openness also consults `probe`.
    ///
    /// Operators pass `move || down.is_open()` so that producers polling
    /// [`is_open`](Self::is_open) observe downstream termination
    /// synchronously, before any subscription bookkeeping catches up.
    #[must_use]
    pub(crate) fn with_probe(
        probe: impl Fn() -> bool + Send + Sync + 'static,
        next: impl Fn(T) + Send + Sync + 'static,
        error: impl Fn(StreamError) + Send + Sync + 'static,
        complete: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(ObserverInner {
                gate: Gate::new(),
                probe: Some(Box::new(probe)),
                next: Box::new(next),
                error: Box::new(error),
                complete: Box::new(complete),
            }),
        }
    }

    /// Creates an observer with only a `next` callback.
    ///
    /// `error` and `complete` default to no-ops, matching the positional
    /// subscribe convention where the terminal callbacks are optional.
    #[must_use]
    pub fn from_next(next: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self::new(next, |_| {}, || {})
    }

    /// Delivers a value. Suppressed once the activation is closed.
    pub fn next(&self, value: T) {
        if self.is_open() {
            (self.inner.next)(value);
        }
    }

    /// Delivers the error terminal. At most one terminal ever fires.
    pub fn error(&self, err: StreamError) {
        if self.inner.gate.close() {
            (self.inner.error)(err);
        }
    }

    /// Delivers the completion terminal. At most one terminal ever fires.
    pub fn complete(&self) {
        if self.inner.gate.close() {
            (self.inner.complete)();
        }
    }

    /// Returns `true` while no terminal has fired, the activation is not
    /// disposed, and (for derived observers) the downstream is still open.
    /// Producers may poll this to stop emitting early.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.inner.gate.is_open() && self.inner.probe.as_ref().map_or(true, |probe| probe())
    }

    /// Shared handle to this observer's gate, for the subscription to close
    /// on disposal.
    #[inline]
    pub(crate) fn gate(&self) -> Gate {
        self.inner.gate.clone()
    }
}

/// Runs a user callback inside a panic-catching boundary.
///
/// On panic, the payload is rendered into [`StreamError::Fault`]; the caller
/// delivers it downstream and tears the activation down.
pub(crate) fn fault_boundary<R>(f: impl FnOnce() -> R) -> Result<R, StreamError> {
    catch_unwind(AssertUnwindSafe(f))
        .map_err(|payload| StreamError::fault(panic_reason(payload.as_ref())))
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "opaque panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    fn counting_observer(
        values: Arc<Mutex<Vec<i32>>>,
        errors: Arc<AtomicUsize>,
        completes: Arc<AtomicUsize>,
    ) -> Observer<i32> {
        Observer::new(
            move |v| values.lock().unwrap().push(v),
            move |_| {
                errors.fetch_add(1, Ordering::SeqCst);
            },
            move || {
                completes.fetch_add(1, Ordering::SeqCst);
            },
        )
    }

    #[test]
    fn test_no_signals_after_complete() {
        let values = Arc::new(Mutex::new(Vec::new()));
        let errors = Arc::new(AtomicUsize::new(0));
        let completes = Arc::new(AtomicUsize::new(0));
        let obs = counting_observer(values.clone(), errors.clone(), completes.clone());

        obs.next(1);
        obs.complete();
        obs.next(2);
        obs.error(StreamError::source("late"));
        obs.complete();

        assert_eq!(*values.lock().unwrap(), vec![1]);
        assert_eq!(errors.load(Ordering::SeqCst), 0);
        assert_eq!(completes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_no_signals_after_error() {
        let values = Arc::new(Mutex::new(Vec::new()));
        let errors = Arc::new(AtomicUsize::new(0));
        let completes = Arc::new(AtomicUsize::new(0));
        let obs = counting_observer(values.clone(), errors.clone(), completes.clone());

        obs.error(StreamError::source("boom"));
        obs.next(1);
        obs.complete();

        assert!(values.lock().unwrap().is_empty());
        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert_eq!(completes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_gate_close_suppresses_next() {
        let values = Arc::new(Mutex::new(Vec::new()));
        let obs = {
            let values = values.clone();
            Observer::from_next(move |v: i32| values.lock().unwrap().push(v))
        };

        obs.next(1);
        assert!(obs.gate().close());
        obs.next(2);

        assert_eq!(*values.lock().unwrap(), vec![1]);
        assert!(!obs.is_open());
    }

    #[test]
    fn test_probe_chains_downstream_openness() {
        let delivered = Arc::new(AtomicUsize::new(0));
        let down = Observer::from_next(|_: i32| {});
        let up = {
            let down_probe = down.clone();
            let delivered = delivered.clone();
            Observer::with_probe(
                move || down_probe.is_open(),
                move |_: i32| {
                    delivered.fetch_add(1, Ordering::SeqCst);
                },
                |_| {},
                || {},
            )
        };

        assert!(up.is_open());
        up.next(1);
        down.complete();
        assert!(!up.is_open(), "downstream terminal must close derived openness");
        up.next(2);

        assert_eq!(delivered.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_from_next_terminals_are_noops() {
        let obs = Observer::from_next(|_: i32| {});
        obs.error(StreamError::source("ignored"));
        let obs = Observer::from_next(|_: i32| {});
        obs.complete();
    }

    #[test]
    fn test_fault_boundary_passes_values_through() {
        assert_eq!(fault_boundary(|| 40 + 2).unwrap(), 42);
    }

    #[test]
    fn test_fault_boundary_converts_panic() {
        let err = fault_boundary(|| -> i32 { panic!("bad projection") }).unwrap_err();
        assert!(err.is_fault());
        assert!(err.to_string().contains("bad projection"));
    }
}
