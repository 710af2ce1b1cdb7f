//! # `take_until` — relay the source until a notifier fires.
//!
//! Runs two subscriptions concurrently: the source, relayed verbatim, and
//! the notifier. The first notifier signal of **any** kind — `next`,
//! `error`, or `complete` — delivers a single `complete` downstream and
//! disposes both subscriptions. A notifier error is a termination trigger,
//! not an error; a caller who wants notifier errors propagated composes that
//! explicitly (e.g. merges the notifier into the source as well).
//!
//! If the source terminates first, its terminal is forwarded as-is and the
//! notifier subscription is disposed on that path too — watching a notifier
//! past the end of the stream would leak its listener.

use crate::core::{Observable, Observer, Subscription};

impl<T: Send + 'static> Observable<T> {
    /// Returns a stream relaying the source until `notifier` emits anything.
    ///
    /// Both underlying subscriptions are disposed exactly once, whichever
    /// side terminates the stream.
    pub fn take_until<U: Send + 'static>(&self, notifier: &Observable<U>) -> Observable<T> {
        let source = self.clone();
        let notifier = notifier.clone();

        Observable::new(move |down: Observer<T>| {
            let sub = Subscription::new();

            let relay = {
                let probe_down = down.clone();
                let next_down = down.clone();
                let error_down = down.clone();
                let error_sub = sub.clone();
                let complete_down = down.clone();
                let complete_sub = sub.clone();
                Observer::with_probe(
                    move || probe_down.is_open(),
                    move |value| next_down.next(value),
                    move |err| {
                        error_down.error(err);
                        error_sub.dispose();
                    },
                    move || {
                        complete_down.complete();
                        complete_sub.dispose();
                    },
                )
            };
            sub.attach(source.subscribe(relay));

            // Source may have terminated synchronously; watching the
            // notifier then would only register a listener to tear down.
            if !sub.is_disposed() {
                let terminate = {
                    let down = down.clone();
                    let sub = sub.clone();
                    move || {
                        down.complete();
                        sub.dispose();
                    }
                };
                let watch = {
                    let probe_down = down.clone();
                    let on_next = terminate.clone();
                    let on_error = terminate.clone();
                    let on_complete = terminate;
                    Observer::with_probe(
                        move || probe_down.is_open(),
                        move |_| on_next(),
                        move |_| on_error(),
                        on_complete,
                    )
                };
                sub.attach(notifier.subscribe(watch));
            }
            sub
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StreamError;
    use crate::sources::EventEmitter;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_notifier_value_completes_stream() {
        let events: Arc<EventEmitter<i32>> = Arc::new(EventEmitter::new());
        let stop: Arc<EventEmitter<()>> = Arc::new(EventEmitter::new());

        let values = Arc::new(Mutex::new(Vec::new()));
        let completions = Arc::new(AtomicUsize::new(0));
        {
            let values = values.clone();
            let completions = completions.clone();
            Observable::from_event(events.clone(), "tick")
                .take_until(&Observable::from_event(stop.clone(), "stop"))
                .subscribe_fns(
                    move |v| values.lock().unwrap().push(v),
                    |_| panic!("no error expected"),
                    move || {
                        completions.fetch_add(1, Ordering::SeqCst);
                    },
                );
        }

        events.emit("tick", 1);
        events.emit("tick", 2);
        stop.emit("stop", ());
        events.emit("tick", 3);

        assert_eq!(*values.lock().unwrap(), vec![1, 2]);
        assert_eq!(completions.load(Ordering::SeqCst), 1);
        assert_eq!(events.listener_count("tick"), 0, "source listener removed");
        assert_eq!(stop.listener_count("stop"), 0, "notifier listener removed");
    }

    #[test]
    fn test_notifier_error_is_termination_not_error() {
        let stop_source = Observable::new(|observer: Observer<()>| {
            observer.error(StreamError::source("notifier broke"));
            Subscription::new()
        });
        let events: Arc<EventEmitter<i32>> = Arc::new(EventEmitter::new());

        let completions = Arc::new(AtomicUsize::new(0));
        {
            let completions = completions.clone();
            Observable::from_event(events.clone(), "tick")
                .take_until(&stop_source)
                .subscribe_fns(
                    |_| panic!("no value expected"),
                    |_| panic!("notifier errors must not propagate"),
                    move || {
                        completions.fetch_add(1, Ordering::SeqCst);
                    },
                );
        }

        assert_eq!(completions.load(Ordering::SeqCst), 1);
        assert_eq!(events.listener_count("tick"), 0);
    }

    #[test]
    fn test_source_error_forwards_and_cleans_up_notifier() {
        let escaped: Arc<Mutex<Option<Observer<i32>>>> = Arc::new(Mutex::new(None));
        let source = {
            let escaped = escaped.clone();
            Observable::new(move |observer: Observer<i32>| {
                *escaped.lock().unwrap() = Some(observer);
                Subscription::new()
            })
        };
        let stop: Arc<EventEmitter<()>> = Arc::new(EventEmitter::new());

        let errors = Arc::new(AtomicUsize::new(0));
        {
            let errors = errors.clone();
            source
                .take_until(&Observable::from_event(stop.clone(), "stop"))
                .subscribe_fns(
                    |_| {},
                    move |e| {
                        assert_eq!(e, StreamError::source("boom"));
                        errors.fetch_add(1, Ordering::SeqCst);
                    },
                    || panic!("error path must not complete"),
                );
        }
        assert_eq!(stop.listener_count("stop"), 1);

        let producer = escaped.lock().unwrap().take().unwrap();
        producer.error(StreamError::source("boom"));

        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert_eq!(stop.listener_count("stop"), 0, "notifier cleanup on source terminal");
    }

    #[test]
    fn test_source_completion_skips_notifier_subscription() {
        let stop: Arc<EventEmitter<()>> = Arc::new(EventEmitter::new());

        let completions = Arc::new(AtomicUsize::new(0));
        {
            let completions = completions.clone();
            Observable::from_iter(vec![1, 2])
                .take_until(&Observable::from_event(stop.clone(), "stop"))
                .subscribe_fns(
                    |_| {},
                    |_| panic!("no error expected"),
                    move || {
                        completions.fetch_add(1, Ordering::SeqCst);
                    },
                );
        }

        assert_eq!(completions.load(Ordering::SeqCst), 1);
        assert_eq!(stop.listener_count("stop"), 0);
    }
}
