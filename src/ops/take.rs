//! # `take` — forward the first `count` values, then complete.
//!
//! Keeps a per-activation counter (created inside the subscribe function,
//! never shared across activations). When the counter reaches `count`, the
//! operator delivers `complete` downstream and disposes the upstream
//! subscription — even when the threshold trips synchronously on the very
//! first value, before the subscribe call has returned. That case is handled
//! by creating the [`Subscription`] cell first and attaching the upstream
//! subscription afterwards: a dispose recorded during subscribe is honored
//! the moment the upstream is attached.
//!
//! If the upstream terminates before the threshold, that terminal is
//! forwarded as-is; completion is purely upstream-driven unless the
//! threshold trips.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::core::{Observable, Observer, Subscription};

impl<T: Send + 'static> Observable<T> {
    /// Returns a stream of at most the first `count` upstream values.
    ///
    /// `count == 0` completes on the first upstream emission without ever
    /// forwarding a value.
    pub fn take(&self, count: usize) -> Observable<T> {
        let source = self.clone();

        Observable::new(move |down: Observer<T>| {
            let sub = Subscription::new();
            let seen = Arc::new(AtomicUsize::new(0));

            let up = {
                let probe_down = down.clone();
                let next_down = down.clone();
                let next_sub = sub.clone();
                let error_down = down.clone();
                let complete_down = down.clone();
                Observer::with_probe(
                    move || probe_down.is_open(),
                    move |value| {
                        let n = seen.fetch_add(1, Ordering::SeqCst) + 1;
                        if n <= count {
                            next_down.next(value);
                        }
                        if n >= count {
                            next_down.complete();
                            next_sub.dispose();
                        }
                    },
                    move |err| error_down.error(err),
                    move || complete_down.complete(),
                )
            };
            sub.attach(source.subscribe(up));
            sub
        })
    }
}
