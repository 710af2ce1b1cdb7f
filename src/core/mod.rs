//! Core stream protocol: observable, observer, subscription.
//!
//! This module groups the three pieces every operator composes over:
//!
//! - [`Observable`] — lazy, cold stream factory wrapping a subscribe function
//! - [`Observer`] — three-signal sink with a one-terminal signal gate
//! - [`Subscription`] — idempotent, transitively-disposing teardown handle
//!
//! Operators live in [`ops`](crate::ops), producer adapters in
//! [`sources`](crate::sources); both are thin layers over these types.

mod observable;
mod observer;
mod subscription;

pub use observable::Observable;
pub use observer::Observer;
pub use subscription::Subscription;

pub(crate) use observer::fault_boundary;
