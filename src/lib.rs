//! # rivulet
//!
//! **Rivulet** is a minimal push-based reactive-stream core for Rust.
//!
//! It provides a lazy, cold [`Observable`] abstraction — a composable
//! sequence of values delivered over time — with a fixed small set of
//! transformation operators and explicit, deterministic teardown. The crate
//! is designed as a building block: one producer, one or more derived
//! streams, one terminal consumer.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//!  │  from_event │    │from_interval│    │  from_iter  │   producer adapters
//!  └──────┬──────┘    └──────┬──────┘    └──────┬──────┘
//!         └─────────────┬────┴─────────────────┘
//!                       ▼
//!  ┌───────────────────────────────────────────────────┐
//!  │  Observable<T> (lazy, cold stream factory)        │
//!  │  operators: map / filter / take / take_until      │
//!  │             merge_map / switch_map                │
//!  └──────────────────────┬────────────────────────────┘
//!            subscribe    │      signals
//!        (outer ─► inner) │ (producer ─► consumer)
//!                         ▼
//!  ┌─────────────────────────────┐  ┌──────────────────┐
//!  │ Observer<T>                 │  │ Subscription     │
//!  │ next / error / complete     │  │ dispose()        │
//!  │ (one terminal, gated)       │  │ (idempotent,     │
//!  └─────────────────────────────┘  │  transitive)     │
//!                                   └──────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! Observable::new(subscribe_fn)        construction, no side effect
//!   └─► subscribe(observer)            activation: producer starts
//!         ├─► next* (error|complete)?  signals, synchronous delivery
//!         └─► Subscription::dispose()  teardown: listeners removed,
//!                                      timers cancelled, nested
//!                                      subscriptions disposed
//! ```
//!
//! Each `subscribe` call is an independent activation. Signals flow
//! producer → innermost operator → … → consumer; disposal cascades the
//! opposite way through the teardown tree. After a terminal signal or a
//! disposal, nothing further reaches the observer.
//!
//! ## Features
//! | Area          | Description                                             | Key types                         |
//! |---------------|---------------------------------------------------------|-----------------------------------|
//! | **Core**      | Lazy cold streams with a one-terminal signal protocol.  | [`Observable`], [`Observer`]      |
//! | **Teardown**  | Idempotent, transitively-cascading disposal.            | [`Subscription`]                  |
//! | **Operators** | Fixed algebra; faults in user callbacks become errors.  | `map`, `filter`, `take`, …        |
//! | **Adapters**  | Listener- and timer-backed infinite sources.            | [`EventTarget`], [`EventEmitter`] |
//! | **Errors**    | Typed signal errors with stable labels.                 | [`StreamError`]                   |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogSink`] signal printer
//!   _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use rivulet::Observable;
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! {
//!     let seen = seen.clone();
//!     Observable::from_iter(1..=100)
//!         .filter(|n| n % 2 == 0)
//!         .map(|n| n * 10)
//!         .take(3)
//!         .for_each(move |n| seen.lock().unwrap().push(n));
//! }
//! assert_eq!(*seen.lock().unwrap(), vec![20, 40, 60]);
//! ```

mod core;
mod error;
mod ops;
mod sinks;
mod sources;

// ---- Public re-exports ----

pub use crate::core::{Observable, Observer, Subscription};
pub use crate::error::StreamError;
pub use crate::sources::{EventEmitter, EventListener, EventTarget, ListenerId};

// Optional: expose a simple built-in signal printer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use crate::sinks::LogSink;
