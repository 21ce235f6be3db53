//! Sparse index implementation
//!
//! Sorted `Vec` of anchor entries, probed linearly.

/// Anchor of the bootstrap entry for block 0
///
/// Every key compares >= to it, so all keys resolve to block 0 until the
/// first real anchor replaces it.
pub const SENTINEL_KEY: i64 = i64::MIN;

/// One index entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    /// Smallest key in the block
    pub anchor_key: i64,

    /// Block the anchor belongs to
    pub block_id: usize,
}

impl IndexEntry {
    /// Record address of the block's first slot (`block_id * N`)
    pub fn address(&self, block_capacity: usize) -> usize {
        self.block_id * block_capacity
    }
}

/// Sparse index: at most one entry per block id, ascending by anchor key
#[derive(Debug, Clone, Default)]
pub struct SparseIndex {
    entries: Vec<IndexEntry>,

    /// Block 0's entry is still the bootstrap one
    bootstrap: bool,
}

impl SparseIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index holding only the bootstrap entry for block 0
    pub fn with_sentinel() -> Self {
        let mut index = Self::new();
        index.update(0, SENTINEL_KEY);
        index.bootstrap = true;
        index
    }

    /// Block whose key range could contain `key`
    ///
    /// The block of the last entry with `anchor_key <= key`, or block 0 if
    /// there is none. Linear probe in anchor order.
    pub fn resolve(&self, key: i64) -> usize {
        let mut block_id = 0;

        for entry in &self.entries {
            if entry.anchor_key > key {
                break;
            }
            block_id = entry.block_id;
        }

        block_id
    }

    /// Set the anchor of `block_id` to `key`, adding an entry if the block
    /// has none, then restore anchor order
    pub fn update(&mut self, block_id: usize, key: i64) {
        if block_id == 0 {
            self.bootstrap = false;
        }

        match self.entries.iter_mut().find(|e| e.block_id == block_id) {
            Some(entry) => entry.anchor_key = key,
            None => self.entries.push(IndexEntry {
                anchor_key: key,
                block_id,
            }),
        }

        self.entries.sort_by_key(|e| e.anchor_key);
    }

    /// True if `entry` is the bootstrap entry, i.e. block 0 has not been
    /// anchored by a real key yet
    ///
    /// A real key equal to `SENTINEL_KEY` is not a bootstrap entry.
    pub fn is_sentinel(&self, entry: &IndexEntry) -> bool {
        self.bootstrap && entry.block_id == 0
    }

    /// Entries in anchor order
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Current anchor of a block
    pub fn anchor_for(&self, block_id: usize) -> Option<i64> {
        self.entries
            .iter()
            .find(|e| e.block_id == block_id)
            .map(|e| e.anchor_key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
