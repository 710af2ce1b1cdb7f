//! # `filter` — forward only values matching a predicate.
//!
//! Same shape as [`map`](crate::Observable::map): `next(v)` reaches the
//! downstream observer iff `predicate(&v)` is true; terminal signals pass
//! through unchanged. The predicate runs inside the fault boundary.

use std::sync::Arc;

use crate::core::{fault_boundary, Observable, Observer, Subscription};

impl<T: Send + 'static> Observable<T> {
    /// Returns a stream of the upstream values for which `predicate` holds,
    /// in original order, with no reordering or duplication.
    pub fn filter<P>(&self, predicate: P) -> Observable<T>
    where
        P: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let source = self.clone();
        let predicate = Arc::new(predicate);

        Observable::new(move |down: Observer<T>| {
            let sub = Subscription::new();
            let up = {
                let predicate = Arc::clone(&predicate);
                let probe_down = down.clone();
                let next_down = down.clone();
                let next_sub = sub.clone();
                let error_down = down.clone();
                let complete_down = down.clone();
                Observer::with_probe(
                    move || probe_down.is_open(),
                    move |value| match fault_boundary(|| (*predicate)(&value)) {
                        Ok(true) => next_down.next(value),
                        Ok(false) => {}
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[test]
    fn test_filter_keeps_matching_values_in_order() {
        let values = Arc::new(Mutex::new(Vec::new()));
        {
            let values = values.clone();
            Observable::from_iter(vec![1, 2, 3, 4, 5, 6])
                .filter(|v| v % 2 == 0)
                .for_each(move |v| values.lock().unwrap().push(v));
        }
        assert_eq!(*values.lock().unwrap(), vec![2, 4, 6]);
    }

    #[test]
    fn test_filter_forwards_completion() {
        let completed = Arc::new(AtomicUsize::new(0));
        {
            let completed = completed.clone();
            Observable::from_iter(Vec::<i32>::new())
                .filter(|_| true)
                .subscribe_fns(
                    |_| {},
                    |_| panic!("no error expected"),
                    move || {
                        completed.fetch_add(1, Ordering::SeqCst);
                    },
                );
        }
        assert_eq!(completed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_filter_panic_becomes_fault_and_releases_upstream() {
        let released = Arc::new(AtomicBool::new(false));
        let source = {
            let released = released.clone();
            Observable::new(move |observer: Observer<i32>| {
                observer.next(7);
                let released = released.clone();
                Subscription::from_action(move || released.store(true, Ordering::SeqCst))
            })
        };

        let faulted = Arc::new(AtomicBool::new(false));
        {
            let faulted = faulted.clone();
            source
                .filter(|_| panic!("predicate blew up"))
                .subscribe_fns(
                    |_| panic!("fault must not produce a value"),
                    move |e| {
                        assert!(e.is_fault());
                        faulted.store(true, Ordering::SeqCst);
                    },
                    || panic!("fault must not complete"),
                );
        }

        assert!(faulted.load(Ordering::SeqCst));
        assert!(released.load(Ordering::SeqCst));
    }
}
