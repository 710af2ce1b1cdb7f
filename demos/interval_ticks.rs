//! # Interval Ticks Example
//!
//! Streams timer ticks through `map`/`take` and prints every signal with
//! the built-in [`LogSink`].
//!
//! ## Run
//! ```bash
//! cargo run --example interval_ticks --features logging
//! ```

use std::time::Duration;

use rivulet::{LogSink, Observable};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let sub = Observable::from_interval(Duration::from_millis(250))
        .map(|tick| format!("tick #{tick}"))
        .take(5)
        .subscribe(LogSink::new("ticks").observer());

    // take(5) completes the stream and cancels the timer on its own;
    // wait for the disposal rather than guessing a wall-clock margin.
    while !sub.is_disposed() {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}
