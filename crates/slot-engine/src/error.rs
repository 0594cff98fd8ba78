//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    /// A wall-clock time string was rejected by the strict parser.
    #[error("Invalid time '{input}': {reason}")]
    InvalidTime { input: String, reason: String },

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid availability block: {0}")]
    InvalidBlock(String),

    #[error("Invalid slot query: {0}")]
    InvalidQuery(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
