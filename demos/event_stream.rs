//! # Event Stream Example
//!
//! Shows the listener-backed adapter end to end: an [`EventEmitter`] plays
//! the role of a platform event target, a derived stream filters and maps
//! its events, and a second event acts as the stop notifier.
//!
//! ## Run
//! ```bash
//! cargo run --example event_stream
//! ```

use std::sync::Arc;

use rivulet::{EventEmitter, Observable};

fn main() {
    let input: Arc<EventEmitter<u32>> = Arc::new(EventEmitter::new());
    let quit: Arc<EventEmitter<()>> = Arc::new(EventEmitter::new());

    let presses = Observable::from_event(input.clone(), "keypress");
    let stop = Observable::from_event(quit.clone(), "quit");

    let sub = presses
        .filter(|code| *code != 0)
        .map(|code| format!("key #{code}"))
        .take_until(&stop)
        .subscribe_fns(
            |label| println!(" ├─► {label}"),
            |err| eprintln!(" ├─► error: {err}"),
            || println!(" └─► done"),
        );

    println!("Emitting keypresses:");
    input.emit("keypress", 13);
    input.emit("keypress", 0); // filtered out
    input.emit("keypress", 27);

    quit.emit("quit", ());

    // The notifier completed the stream and removed both listeners.
    input.emit("keypress", 99);
    assert_eq!(input.listener_count("keypress"), 0);
    assert_eq!(quit.listener_count("quit"), 0);
    assert!(sub.is_disposed());
}
