//! # Timer adapter: periodic tick stream.
//!
//! [`Observable::from_interval`] wraps the tokio timer facility: subscribing
//! spawns a task that delivers the 0-based tick index every `period`,
//! starting one full period after subscribe; disposing cancels the task via
//! a [`CancellationToken`]. Like the event adapter, the timer never emits
//! `error` or `complete` on its own — compose `take`/`take_until` to end it.
//!
//! Subscribing requires a tokio runtime (the task is spawned on the current
//! one); delivery happens synchronously on the timer task.

use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::core::{Observable, Observer, Subscription};

impl Observable<u64> {
    /// Stream of tick indices `0, 1, 2, …`, one every `period`.
    ///
    /// The period is clamped to a minimum of 1 ms. Each subscription runs
    /// its own independent timer.
    pub fn from_interval(period: Duration) -> Observable<u64> {
        let period = period.max(Duration::from_millis(1));

        Observable::new(move |observer: Observer<u64>| {
            let token = CancellationToken::new();
            let task_token = token.clone();

            tokio::spawn(async move {
                let mut timer = interval_at(Instant::now() + period, period);
                timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
                let mut tick: u64 = 0;
                loop {
                    tokio::select! {
                        _ = task_token.cancelled() => break,
                        _ = timer.tick() => {
                            if !observer.is_open() {
                                break;
                            }
                            observer.next(tick);
                            tick = tick.wrapping_add(1);
                        }
                    }
                }
            });

            Subscription::from_action(move || token.cancel())
        })
    }
}
