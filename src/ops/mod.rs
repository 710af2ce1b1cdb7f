//! Transformation operators over [`Observable`](crate::Observable).
//!
//! Every operator follows the same shape: it returns a new observable whose
//! subscribe function subscribes to the upstream with a derived observer and
//! forwards/transforms signals to the downstream one. Operators that invoke
//! user code do so through the fault boundary; operators that create nested
//! subscriptions own them and attach them to their own subscription so
//! disposal cascades.
//!
//! ## Contents
//! - [`map`](crate::Observable::map), [`filter`](crate::Observable::filter)
//!   — stateless per-value forwarding
//! - [`take`](crate::Observable::take) — counted prefix with early teardown
//! - [`take_until`](crate::Observable::take_until) — notifier-triggered
//!   completion
//! - [`merge_map`](crate::Observable::merge_map),
//!   [`switch_map`](crate::Observable::switch_map) — flattening with merge
//!   vs. switch/latest semantics

mod filter;
mod map;
mod merge_map;
mod switch_map;
mod take;
mod take_until;
