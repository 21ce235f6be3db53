//! Index Module
//!
//! Sparse primary index over the main blocks.
//!
//! ## Responsibilities
//! - One entry per occupied main block: (anchor key, block id)
//! - Anchor key == smallest key currently in that block
//! - Resolve a key to the block whose range could hold it
//!
//! ## Layout
//! ```text
//! anchor:     1     5     6
//! block:      0     2     1      (sorted by anchor, not by id)
//!
//! key 7 -> last anchor <= 7 is 6 -> block 1
//! key 0 -> no anchor <= 0        -> block 0
//! ```
//!
//! The overflow block has no entry; lookups fall back to scanning it.

mod sparse;

pub use sparse::{IndexEntry, SparseIndex, SENTINEL_KEY};
