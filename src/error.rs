//! Error handling for the logic sniffer core
//!
//! This module defines the error type shared by the acquisition model,
//! the cursor model, the demo generators and the settings store, plus a
//! Result alias for use throughout the crate.
//!
//! Builder and cursor violations are raised at the offending call. The zoom
//! controller never returns these errors: it clamps instead.

use thiserror::Error;

/// Main error type for logic sniffer operations
#[derive(Error, Debug)]
pub enum SnifferError {
    /// An argument was outside its permitted range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A sample timestamp went backwards
    #[error("Invalid sequence: timestamp {timestamp} precedes previous timestamp {previous}")]
    InvalidSequence { previous: u64, timestamp: u64 },

    /// A capture was built without any samples
    #[error("Empty capture: at least one sample is required")]
    EmptyCapture,

    /// A value was read from something that has no defined state
    #[error("Undefined state: {0}")]
    UndefinedState(String),

    /// A sample sequence could not be decoded
    #[error("Decode error: {0}")]
    Decode(String),

    /// Errors related to settings loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<SnifferError>,
    },
}

impl SnifferError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        SnifferError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all context layers stripped
    pub fn root(&self) -> &SnifferError {
        match self {
            SnifferError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

impl From<serde_json::Error> for SnifferError {
    fn from(err: serde_json::Error) -> Self {
        SnifferError::Serialization(err.to_string())
    }
}

/// Result type alias for logic sniffer operations
pub type Result<T> = std::result::Result<T, SnifferError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
