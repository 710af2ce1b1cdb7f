//! # LogSink — simple signal printer
//!
//! A minimal observer factory that prints incoming signals to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [next] stream="ticks" value=0
//! [next] stream="ticks" value=1
//! [error] stream="clicks" err="error: connection refused"
//! [complete] stream="ticks"
//! ```

use std::fmt::Debug;

use crate::core::Observer;

/// Signal printer sink.
pub struct LogSink {
    stream: String,
}

impl LogSink {
    /// Construct a new [`LogSink`] tagged with a stream name.
    #[must_use]
    pub fn new(stream: impl Into<String>) -> Self {
        Self {
            stream: stream.into(),
        }
    }

    /// Builds an observer that prints every signal it receives.
    #[must_use]
    pub fn observer<T: Debug + Send + 'static>(&self) -> Observer<T> {
        let next_tag = self.stream.clone();
        let error_tag = self.stream.clone();
        let complete_tag = self.stream.clone();
        Observer::new(
            move |value| {
                println!("[next] stream={next_tag:?} value={value:?}");
            },
            move |err| {
                println!("[error] stream={error_tag:?} err={:?}", err.as_message());
            },
            move || {
                println!("[complete] stream={complete_tag:?}");
            },
        )
    }
}
