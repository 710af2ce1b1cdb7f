//! # Synchronous finite source from a collection.
//!
//! [`Observable::from_iter`] emits every item of a collection on the
//! subscriber's own call stack, then completes. Each activation iterates a
//! fresh clone, so the observable can be subscribed any number of times.
//! Iteration stops as soon as the observer closes — a downstream `take`
//! reaching its threshold ends the loop mid-collection.

use crate::core::{Observable, Observer, Subscription};

impl<T: Send + 'static> Observable<T> {
    /// Stream of the items of `items`, delivered synchronously at subscribe
    /// time, followed by `complete`.
    pub fn from_iter<I>(items: I) -> Observable<T>
    where
        I: IntoIterator<Item = T> + Clone + Send + Sync + 'static,
    {
        Observable::new(move |observer: Observer<T>| {
            for value in items.clone() {
                if !observer.is_open() {
                    break;
                }
                observer.next(value);
            }
            observer.complete();
            Subscription::new()
        })
    }
}
