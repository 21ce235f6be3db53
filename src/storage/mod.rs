//! Storage Module
//!
//! The simulated data file: fixed-capacity sorted blocks plus one shared
//! overflow block.
//!
//! ## Responsibilities
//! - Keep every block strictly ascending by key
//! - Allocate main blocks sequentially up to the configured ceiling
//! - Decide where each new record lands (in place, new block, overflow)
//! - Answer exact-key probes for duplicate detection and lookup
//!
//! ## Layout
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │ Data Area                                            │
//! │ ┌────────────┐ ┌────────────┐       ┌────────────┐   │
//! │ │ Block 0    │ │ Block 1    │  ...  │ Block M-1  │   │
//! │ │ k0 < k1 <..│ │ k0 < k1 <..│       │            │   │
//! │ └────────────┘ └────────────┘       └────────────┘   │
//! │ ┌──────────────────────────────────────────────────┐ │
//! │ │ Overflow Block (shared, sorted, own capacity)    │ │
//! │ └──────────────────────────────────────────────────┘ │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Blocks are addressed by their allocation index, which never changes.

mod block;
mod data_area;
mod record;

use std::fmt;

pub use block::Block;
pub use data_area::DataArea;
pub use record::{OverflowMark, Record};

/// Where a record lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Main block with the given id
    Block(usize),

    /// The shared overflow block
    Overflow,
}

impl Location {
    /// Main block id, if this is a main block
    pub fn block_id(&self) -> Option<usize> {
        match self {
            Location::Block(id) => Some(*id),
            Location::Overflow => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Block(id) => write!(f, "Block {}", id),
            Location::Overflow => f.write_str("Overflow Block"),
        }
    }
}
