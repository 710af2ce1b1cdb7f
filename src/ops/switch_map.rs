//! # `switch_map` — flatten with switch/latest semantics.
//!
//! At most one inner subscription is active at a time. Each outer value
//! first disposes the current inner subscription, then subscribes to the
//! projection of the new value; late signals from the replaced inner are
//! suppressed by its own observer gate, which disposal closes.
//!
//! Inner `complete` is swallowed — it retires the inner without completing
//! the composed stream. Inner `error` forwards downstream as-is. Outer
//! `complete` disposes the active inner (if any) and completes downstream.

use std::sync::{Arc, Mutex, PoisonError};

use crate::core::{fault_boundary, Observable, Observer, Subscription};

impl<T: Send + 'static> Observable<T> {
    /// Returns a stream following the values of the most recent projected
    /// inner observable only.
    pub fn switch_map<U, F>(&self, projection: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Observable<U> + Send + Sync + 'static,
    {
        let source = self.clone();
        let projection = Arc::new(projection);

        Observable::new(move |down: Observer<U>| {
            let sub = Subscription::new();
            let current: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

            {
                let current = current.clone();
                sub.attach_action(move || {
                    let previous = current.lock().unwrap_or_else(PoisonError::into_inner).take();
                    if let Some(inner) = previous {
                        inner.dispose();
                    }
                });
            }

            let on_outer_value = {
                let down = down.clone();
                let sub = sub.clone();
                let current = current.clone();
                let projection = Arc::clone(&projection);

                move |value| {
                    // Latest wins: retire the previous inner before touching
                    // the projection.
                    let previous = current.lock().unwrap_or_else(PoisonError::into_inner).take();
                    if let Some(inner) = previous {
                        inner.dispose();
                    }

                    let inner_source = match fault_boundary(|| (*projection)(value)) {
                        Ok(observable) => observable,
                        Err(fault) => {
                            down.error(fault);
                            sub.dispose();
                            return;
                        }
                    };

                    let inner_obs = {
                        let probe_down = down.clone();
                        let value_down = down.clone();
                        let error_down = down.clone();
                        let error_sub = sub.clone();
                        let current = current.clone();
                        Observer::with_probe(
                            move || probe_down.is_open(),
                            move |inner_value| value_down.next(inner_value),
                            move |err| {
                                error_down.error(err);
                                error_sub.dispose();
                            },
                            // Inner completion is swallowed; just release the
                            // finished subscription.
                            move || {
                                let finished =
                                    current.lock().unwrap_or_else(PoisonError::into_inner).take();
                                if let Some(inner) = finished {
                                    inner.dispose();
                                }
                            },
                        )
                    };
                    let settled_probe = inner_obs.clone();

                    let inner_sub = inner_source.subscribe(inner_obs);
                    if !settled_probe.is_open() || inner_sub.is_disposed() {
                        // Terminated during subscribe; nothing left to track.
                        inner_sub.dispose();
                        return;
                    }
                    let mut guard = current.lock().unwrap_or_else(PoisonError::into_inner);
                    if sub.is_disposed() {
                        drop(guard);
                        inner_sub.dispose();
                    } else {
                        *guard = Some(inner_sub);
                    }
                }
            };

            let up = {
                let probe_down = down.clone();
                let error_down = down.clone();
                let error_sub = sub.clone();
                let complete_down = down.clone();
                let complete_sub = sub.clone();
                let complete_current = current.clone();

                Observer::with_probe(
                    move || probe_down.is_open(),
                    on_outer_value,
                    move |err| {
                        error_down.error(err);
                        error_sub.dispose();
                    },
                    move || {
                        let active = complete_current
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .take();
                        if let Some(inner) = active {
                            inner.dispose();
                        }
                        complete_down.complete();
                        complete_sub.dispose();
                    },
                )
            };
            sub.attach(source.subscribe(up));
            sub
        })
    }
}
