//! # `merge_map` — flatten with merge semantics.
//!
//! Each outer value is projected into an inner observable that is subscribed
//! immediately; all inner `next` values forward downstream, concurrently
//! with every other still-active inner stream. A live inner is never cut
//! short by the operator — only its own terminal, a stream-wide error, or
//! disposing the composed subscription ends it. An inner that completes is
//! disposed on the spot so its release actions run.
//!
//! ## Completion
//! An inner completion alone never completes the composed stream; it only
//! retires that inner. Downstream `complete` fires once the outer source has
//! completed **and** no inner subscription remains active. An inner or outer
//! `error` forwards downstream and terminates everything.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::{fault_boundary, Observable, Observer, Subscription};

impl<T: Send + 'static> Observable<T> {
    /// Returns a stream interleaving the values of every projected inner
    /// observable.
    pub fn merge_map<U, F>(&self, projection: F) -> Observable<U>
    where
        U: Send + 'static,
        F: Fn(T) -> Observable<U> + Send + Sync + 'static,
    {
        let source = self.clone();
        let projection = Arc::new(projection);

        Observable::new(move |down: Observer<U>| {
            let sub = Subscription::new();
            let active: Arc<Mutex<HashMap<u64, Subscription>>> =
                Arc::new(Mutex::new(HashMap::new()));
            let next_key = Arc::new(AtomicU64::new(0));
            let inflight = Arc::new(AtomicUsize::new(0));
            let outer_done = Arc::new(AtomicBool::new(false));

            // Disposing the composed subscription tears down whichever
            // inners are still active at that point.
            {
                let active = active.clone();
                sub.attach_action(move || {
                    let drained: Vec<Subscription> = active
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .drain()
                        .map(|(_, inner)| inner)
                        .collect();
                    for inner in drained {
                        inner.dispose();
                    }
                });
            }

            let on_outer_value = {
                let down = down.clone();
                let sub = sub.clone();
                let active = active.clone();
                let inflight = inflight.clone();
                let outer_done = outer_done.clone();
                let projection = Arc::clone(&projection);

                move |value| {
                    let inner_source = match fault_boundary(|| (*projection)(value)) {
                        Ok(observable) => observable,
                        Err(fault) => {
                            down.error(fault);
                            sub.dispose();
                            return;
                        }
                    };

                    let key = next_key.fetch_add(1, Ordering::Relaxed);
                    inflight.fetch_add(1, Ordering::SeqCst);
                    let retired = Arc::new(AtomicBool::new(false));

                    let inner_obs = {
                        let probe_down = down.clone();
                        let value_down = down.clone();
                        let error_down = down.clone();
                        let error_sub = sub.clone();
                        let complete_down = down.clone();
                        let complete_sub = sub.clone();
                        let active = active.clone();
                        let inflight = inflight.clone();
                        let outer_done = outer_done.clone();
                        let retired = retired.clone();
                        Observer::with_probe(
                            move || probe_down.is_open(),
                            move |inner_value| value_down.next(inner_value),
                            move |err| {
                                error_down.error(err);
                                error_sub.dispose();
                            },
                            move || {
                                retired.store(true, Ordering::SeqCst);
                                let finished = active
                                    .lock()
                                    .unwrap_or_else(PoisonError::into_inner)
                                    .remove(&key);
                                if let Some(inner) = finished {
                                    inner.dispose();
                                }
                                if inflight.fetch_sub(1, Ordering::SeqCst) == 1
                                    && outer_done.load(Ordering::SeqCst)
                                {
                                    complete_down.complete();
                                    complete_sub.dispose();
                                }
                            },
                        )
                    };

                    let inner_sub = inner_source.subscribe(inner_obs);
                    if retired.load(Ordering::SeqCst) || inner_sub.is_disposed() {
                        // Terminated during subscribe; release it instead of
                        // tracking it.
                        inner_sub.dispose();
                        return;
                    }
                    let mut guard = active.lock().unwrap_or_else(PoisonError::into_inner);
                    if sub.is_disposed() {
                        drop(guard);
                        inner_sub.dispose();
                    } else {
                        guard.insert(key, inner_sub);
                    }
                }
            };

            let up = {
                let probe_down = down.clone();
                let error_down = down.clone();
                let error_sub = sub.clone();
                let complete_down = down.clone();
                let complete_sub = sub.clone();
                let complete_inflight = inflight.clone();
                let complete_outer_done = outer_done.clone();

                Observer::with_probe(
                    move || probe_down.is_open(),
                    on_outer_value,
                    move |err| {
                        error_down.error(err);
                        error_sub.dispose();
                    },
                    move || {
                        complete_outer_done.store(true, Ordering::SeqCst);
                        if complete_inflight.load(Ordering::SeqCst) == 0 {
                            complete_down.complete();
                            complete_sub.dispose();
                        }
                    },
                )
            };
            sub.attach(source.subscribe(up));
            sub
        })
    }
}
