//! Error types delivered through a stream's `error` signal.
//!
//! A single enum, [`StreamError`], covers both failure origins the core
//! distinguishes:
//!
//! - [`StreamError::Fault`] — a user-supplied projection or predicate panicked
//!   inside an operator; the operator's fault boundary converts the panic into
//!   this variant and delivers it downstream instead of unwinding through the
//!   producer's call stack.
//! - [`StreamError::Source`] — an error raised by a producer or injected
//!   manually via [`Observer::error`](crate::Observer::error).
//!
//! The type is `Clone` because operators forward errors by value and tests
//! assert on them after delivery.

use thiserror::Error;

/// # Errors signalled on a stream.
///
/// Exactly one error may ever be delivered per activation; after it, the
/// activation is terminated and no further signals flow.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// A user projection or predicate panicked during synchronous delivery.
    #[error("callback fault: {reason}")]
    Fault {
        /// Panic payload rendered as text.
        reason: String,
    },

    /// An error originating in the producer (or injected by the caller).
    #[error("{reason}")]
    Source {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl StreamError {
    /// Builds a [`StreamError::Source`] from any displayable reason.
    #[inline]
    pub fn source(reason: impl Into<String>) -> Self {
        StreamError::Source {
            reason: reason.into(),
        }
    }

    /// Builds a [`StreamError::Fault`] from a rendered panic payload.
    #[inline]
    pub(crate) fn fault(reason: impl Into<String>) -> Self {
        StreamError::Fault {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use rivulet::StreamError;
    ///
    /// assert_eq!(StreamError::source("boom").as_label(), "stream_source_error");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            StreamError::Fault { .. } => "stream_callback_fault",
            StreamError::Source { .. } => "stream_source_error",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            StreamError::Fault { reason } => format!("fault: {reason}"),
            StreamError::Source { reason } => format!("error: {reason}"),
        }
    }

    /// Indicates whether the error came from a panicking user callback.
    #[inline]
    pub fn is_fault(&self) -> bool {
        matches!(self, StreamError::Fault { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(StreamError::fault("x").as_label(), "stream_callback_fault");
        assert_eq!(StreamError::source("x").as_label(), "stream_source_error");
    }

    #[test]
    fn test_display_and_message() {
        let err = StreamError::source("connection refused");
        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(err.as_message(), "error: connection refused");

        let fault = StreamError::fault("index out of bounds");
        assert!(fault.to_string().contains("index out of bounds"));
        assert!(fault.is_fault());
    }
}
