//! Data Area
//!
//! Owns the main blocks and the overflow block, and decides where each new
//! record is placed.
//!
//! ## Placement Policy
//! For a record headed to block `b` with `size` records, `pos` being its
//! sorted position and "dense" meaning `size >= threshold`:
//!
//! | case | condition          | action                                     |
//! |------|--------------------|--------------------------------------------|
//! | a    | dense, pos == size | open a new block for it, else overflow     |
//! | b    | dense, pos != size | mark record at pos-1, divert to overflow   |
//! | c    | otherwise          | insert in place                            |
//!
//! Existing records never move between blocks.

use crate::config::Config;
use crate::error::{IsamError, Result};

use super::{Block, Location, Record};

/// The simulated data file
#[derive(Debug, Clone)]
pub struct DataArea<V> {
    /// Allocated main blocks; index == block id
    blocks: Vec<Block<V>>,

    /// The single shared overflow block
    overflow: Block<V>,

    /// Records per main block
    block_capacity: usize,

    /// Ceiling on `blocks.len()`
    max_blocks: usize,

    /// Record count from which a main block is dense
    density_threshold: usize,
}

impl<V> DataArea<V> {
    /// Create a data area with block 0 pre-allocated
    ///
    /// The config is trusted: callers run `Config::validate` first.
    pub fn new(config: &Config) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "data area built from an invalid config: {:?}",
            config
        );

        let mut area = Self {
            blocks: Vec::with_capacity(config.max_blocks),
            overflow: Block::new(Location::Overflow, config.overflow_capacity),
            block_capacity: config.block_capacity,
            max_blocks: config.max_blocks,
            density_threshold: config.density_threshold(),
        };
        area.blocks.push(Block::new(Location::Block(0), area.block_capacity));
        area
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of allocated main blocks
    pub fn used_blocks(&self) -> usize {
        self.blocks.len()
    }

    pub fn max_blocks(&self) -> usize {
        self.max_blocks
    }

    pub fn block_capacity(&self) -> usize {
        self.block_capacity
    }

    pub fn density_threshold(&self) -> usize {
        self.density_threshold
    }

    /// Main block by id
    pub fn block(&self, block_id: usize) -> Option<&Block<V>> {
        self.blocks.get(block_id)
    }

    /// All allocated main blocks, in id order
    pub fn blocks(&self) -> &[Block<V>] {
        &self.blocks
    }

    pub fn overflow(&self) -> &Block<V> {
        &self.overflow
    }

    /// Records held in main blocks
    pub fn main_record_count(&self) -> usize {
        self.blocks.iter().map(Block::len).sum()
    }

    /// Records held anywhere, overflow included
    pub fn record_count(&self) -> usize {
        self.main_record_count() + self.overflow.len()
    }

    /// True once no further main block can be allocated
    pub fn is_exhausted(&self) -> bool {
        self.blocks.len() >= self.max_blocks
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// True if any main block or the overflow block holds `key`
    ///
    /// Linear over every record.
    pub fn check_key(&self, key: i64) -> bool {
        self.blocks.iter().any(|b| b.contains_key(key)) || self.overflow.contains_key(key)
    }

    /// Exact-match scan of one main block
    pub fn find_in_block(&self, block_id: usize, key: i64) -> Result<Option<&Record<V>>> {
        let block = self.checked_block(block_id)?;
        Ok(block.find(key))
    }

    /// Exact-match scan of the overflow block
    pub fn find_in_overflow(&self, key: i64) -> Option<&Record<V>> {
        self.overflow.find(key)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Allocate the next main block
    ///
    /// Returns its id, or `AreaExhausted` once `max_blocks` are in use.
    pub fn add_block(&mut self) -> Result<usize> {
        if self.is_exhausted() {
            return Err(IsamError::AreaExhausted {
                max_blocks: self.max_blocks,
            });
        }

        let id = self.blocks.len();
        self.blocks.push(Block::new(Location::Block(id), self.block_capacity));
        tracing::debug!(block_id = id, "allocated main block");
        Ok(id)
    }

    /// Place a record, starting from the candidate block `block_id`
    ///
    /// On error nothing has changed.
    pub fn add_record_to_data(&mut self, block_id: usize, record: Record<V>) -> Result<Location> {
        let block = self.checked_block(block_id)?;

        let size = block.len();
        let pos = block.position_for(record.key());
        let dense = size >= self.density_threshold;

        if dense && pos == size {
            // Case a: new maximum for a dense block, grow the chain
            match self.add_block() {
                Ok(new_id) => {
                    self.blocks[new_id].add_record(record)?;
                    Ok(Location::Block(new_id))
                }
                Err(IsamError::AreaExhausted { max_blocks }) => {
                    tracing::debug!(
                        max_blocks,
                        key = record.key(),
                        "data area exhausted, diverting to overflow"
                    );
                    self.divert_to_overflow(block_id, pos, record)
                }
                Err(e) => Err(e),
            }
        } else if dense {
            // Case b: in-range key for a dense block
            self.divert_to_overflow(block_id, pos, record)
        } else {
            // Case c: room to spare
            self.blocks[block_id].add_record(record)?;
            Ok(Location::Block(block_id))
        }
    }

    /// Insert straight into the overflow block
    pub fn add_overflow(&mut self, record: Record<V>) -> Result<Location> {
        if self.overflow.is_full() {
            return Err(IsamError::OverflowExhausted {
                capacity: self.overflow.capacity(),
            });
        }

        self.overflow.add_record(record)?;
        Ok(Location::Overflow)
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn checked_block(&self, block_id: usize) -> Result<&Block<V>> {
        self.blocks
            .get(block_id)
            .ok_or(IsamError::InvalidBlockReference {
                block_id,
                used_blocks: self.blocks.len(),
            })
    }

    /// Overflow insert, then mark the record that logically precedes it in
    /// the candidate block
    ///
    /// The mark is only applied once the overflow insert succeeded.
    fn divert_to_overflow(&mut self, block_id: usize, pos: usize, record: Record<V>) -> Result<Location> {
        let key = record.key();
        let location = self.add_overflow(record)?;

        if pos > 0 {
            let block = &mut self.blocks[block_id];
            if block.mark_overflow(pos - 1) {
                tracing::debug!(
                    block_id,
                    marked_key = block.records()[pos - 1].key(),
                    overflow_key = key,
                    "set overflow mark"
                );
            }
        }

        Ok(location)
    }
}
