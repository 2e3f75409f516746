//! Error types for slotter

use serde::Serialize;
use thiserror::Error;

/// Main error type for slotter
#[derive(Error, Debug)]
pub enum SlotterError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed input row
    #[error("Input error on line {line}: {message}")]
    Input { line: u64, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for slotter operations
pub type SlotterResult<T> = Result<T, SlotterError>;

impl From<serde_json::Error> for SlotterError {
    fn from(err: serde_json::Error) -> Self {
        SlotterError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for SlotterError {
    fn from(err: toml::de::Error) -> Self {
        SlotterError::Config(err.to_string())
    }
}

/// A time block for which greedy first-fit placement could not complete.
///
/// Returned as a value from block scheduling; it never aborts the other
/// blocks. Carries the first pairing that found no mutually free slot.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("no free slot for {mentor} and {fellow} within {slot_count} slots")]
pub struct UnschedulableBlock {
    /// Mentor whose request could not be placed
    pub mentor: String,
    /// Requested fellow
    pub fellow: String,
    /// Slot capacity of the block
    pub slot_count: usize,
}
