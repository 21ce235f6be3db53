//! Error types for the ISAM simulator
//!
//! Provides a unified error type for all operations.

use std::fmt;

use thiserror::Error;

use crate::storage::Location;

/// Result type alias using IsamError
pub type Result<T> = std::result::Result<T, IsamError>;

/// Unified error type for ISAM operations
#[derive(Debug, Error)]
pub enum IsamError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Insertion Errors
    // -------------------------------------------------------------------------
    #[error("Key {0} already exists")]
    DuplicateKey(i64),

    #[error("Data area exhausted: all {max_blocks} blocks are allocated")]
    AreaExhausted { max_blocks: usize },

    #[error("Overflow block is full ({capacity} records)")]
    OverflowExhausted { capacity: usize },

    #[error("{location} is full ({capacity} records)")]
    BlockFull { location: Location, capacity: usize },

    // -------------------------------------------------------------------------
    // Consistency Errors
    // -------------------------------------------------------------------------
    #[error("Invalid block reference: block {block_id} (used blocks: {used_blocks})")]
    InvalidBlockReference { block_id: usize, used_blocks: usize },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Shell Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Why an `add` was rejected, as reported to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    DuplicateKey,
    AreaExhausted,
    OverflowExhausted,
    InvalidState,
}

impl IsamError {
    /// Map the error onto the reason reported for a rejected insertion
    pub fn reason(&self) -> RejectReason {
        match self {
            IsamError::DuplicateKey(_) => RejectReason::DuplicateKey,
            IsamError::AreaExhausted { .. } => RejectReason::AreaExhausted,
            IsamError::OverflowExhausted { .. } => RejectReason::OverflowExhausted,
            _ => RejectReason::InvalidState,
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::DuplicateKey => "duplicate-key",
            RejectReason::AreaExhausted => "area-exhausted",
            RejectReason::OverflowExhausted => "overflow-exhausted",
            RejectReason::InvalidState => "invalid-state",
        };
        f.write_str(text)
    }
}
