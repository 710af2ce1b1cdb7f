//! Built-in terminal consumers.
//!
//! Only one ships today: [`LogSink`], a demo/reference signal printer,
//! behind the `logging` feature.

#[cfg(feature = "logging")]
mod log;

#[cfg(feature = "logging")]
pub use log::LogSink;
