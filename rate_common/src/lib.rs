//!
//! Common types and utilities shared by the rate feed and the dashboard.
//!
//! This crate aggregates:
//! - `error`: unified error type `FeedError` used across the workspace.
//! - `result`: handy `Result<T, FeedError>` alias.
//! - `quote`: the `Quote` record and `QuoteSeries` snapshot decoded from the source.
//! - `theme`: light/dark theme preference.
//! - `defaults`: polling cadence, table sizes and other default settings.
#![warn(missing_docs)]
pub mod error;
pub mod result;
pub mod quote;
pub mod theme;
pub mod defaults;

pub use error::FeedError;
pub use result::Result;
pub use quote::{Quote, QuoteSeries};
pub use theme::Theme;
