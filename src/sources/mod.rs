//! Producer adapters: factories that turn external facilities into streams.
//!
//! Adapters are thin: they register a platform resource at subscribe time,
//! forward its callbacks as `next` signals, and release the resource on
//! disposal. None of them emits a terminal on its own (except
//! [`from_iter`](crate::Observable::from_iter), which is finite by nature).
//!
//! ## Contents
//! - [`from_event`](crate::Observable::from_event) over [`EventTarget`] —
//!   listener registration; [`EventEmitter`] is the in-process reference
//!   target
//! - [`from_interval`](crate::Observable::from_interval) — tokio timer task
//!   cancelled via token on disposal
//! - [`from_iter`](crate::Observable::from_iter) — synchronous finite source

mod event;
mod interval;
mod iter;

pub use event::{EventEmitter, EventListener, EventTarget, ListenerId};
