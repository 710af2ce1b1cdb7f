//! # `map` — project each value through a function.
//!
//! Forwards `projection(v)` for every upstream value; `error`/`complete`
//! pass through unchanged. The projection runs inside the fault boundary:
//! a panic becomes a downstream [`StreamError::Fault`](crate::StreamError)
//! and the upstream subscription is disposed, so timers and listeners are
//! not left attached behind a throwing callback.

use std::sync::Arc;

use crate::core::{fault_boundary, Observable, Observer, Subscription};

impl<T: Send + 'static> Observable<T> {
    /// Returns a stream of `projection(v)` for each upstream value.
    ///
    /// ### Composition
    /// `s.map(f).map(g)` is observationally equivalent to
    /// `s.map(move |v| g(f(v)))` for pure `f`, `g`.
    pub fn map<U, F>(&self, projection: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let source = self.clone();
        let projection = Arc::new(projection);

        Observable::new(move |down: Observer<U>| {
            let sub = Subscription::new();
            let up = {
                let projection = Arc::clone(&projection);
                let probe_down = down.clone();
                let next_down = down.clone();
                let next_sub = sub.clone();
                let error_down = down.clone();
                let complete_down = down.clone();
                Observer::with_probe(
                    move || probe_down.is_open(),
                    move |value| match fault_boundary(|| (*projection)(value)) {
                        Ok(mapped) => next_down.next(mapped),
                        Err(fault) => {
                            next_down.error(fault);
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
