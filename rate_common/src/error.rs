//! Error types shared by the feed and the dashboard.
//!
//! The `FeedError` enum unifies I/O, HTTP, JSON decoding, channel communication
//! and configuration failures, so every crate in the workspace can propagate a
//! single error type.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

/// Unified error type shared by the feed and the dashboard.
#[derive(Error, Debug)]
pub enum FeedError {
    /// I/O error originating from files or sockets.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Transport-level failure while talking to the quote source.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The quote source answered with a non-success status code.
    #[error("Quote source responded with status {0}")]
    Status(u16),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Channel send failed (receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Channel receive failed (sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),

    /// A poisoned mutex was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),

    /// Invalid command-line or file configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl<T> From<PoisonError<T>> for FeedError {
    fn from(err: PoisonError<T>) -> Self {
        FeedError::MutexLock(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poison_error_maps_to_mutex_lock() {
        let lock = std::sync::Mutex::new(0u8);
        let _ = std::panic::catch_unwind(|| {
            let _guard = lock.lock().unwrap();
            panic!("poison");
        });
        let err: FeedError = lock.lock().unwrap_err().into();
        assert!(matches!(err, FeedError::MutexLock(_)));
    }

    #[test]
    fn status_error_mentions_code() {
        assert_eq!(
            FeedError::Status(503).to_string(),
            "Quote source responded with status 503"
        );
    }
}
