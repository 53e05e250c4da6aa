//! Exchange-rate feed: quote sources and the shared polling pipeline.
//!
//! - `source`: the `QuoteSource` trait with HTTP and file implementations.
//! - `pipeline`: `PollingPipeline`, which polls a source on a fixed cadence,
//!   drops unchanged results and fans snapshots out to any number of
//!   `Subscription`s sharing one timer.
#![warn(missing_docs)]
pub mod pipeline;
pub mod source;

pub use pipeline::{FeedEvent, PollingPipeline, Subscription};
pub use source::{FileQuoteSource, HttpQuoteSource, QuoteSource, source_from};
