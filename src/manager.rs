//! Manager Module
//!
//! The entry point that coordinates the data area and the sparse index.
//!
//! ## Responsibilities
//! - Reject duplicate keys before placement
//! - Route each key to its candidate block through the index
//! - Keep index anchors in step with block contents
//! - Look keys up in their block, then in the overflow block

use std::fmt;

use crate::config::Config;
use crate::error::{IsamError, Result};
use crate::index::SparseIndex;
use crate::layout::Layout;
use crate::storage::{DataArea, Location, OverflowMark, Record};

/// The ISAM structure
///
/// ## Ownership
/// The manager owns both halves. The index refers to blocks only by id, so
/// the two can never disagree about which block an entry points at, only
/// about its anchor, and `add` updates the anchor in the same call that
/// placed the record.
///
/// All mutation goes through `&mut self`; there is no internal locking.
#[derive(Debug, Clone)]
pub struct Manager<V> {
    /// Parameters the structure was built with
    config: Config,

    /// Blocks and overflow
    data: DataArea<V>,

    /// Anchor key -> block id
    index: SparseIndex,
}

/// A successful lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit<'a, V> {
    /// Where the record was found
    pub location: Location,

    /// The record itself
    pub record: &'a Record<V>,
}

impl<'a, V> Hit<'a, V> {
    pub fn key(&self) -> i64 {
        self.record.key()
    }

    pub fn value(&self) -> &'a V {
        self.record.value()
    }

    pub fn overflow_mark(&self) -> OverflowMark {
        self.record.overflow_mark()
    }
}

/// Occupancy summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub used_blocks: usize,
    pub max_blocks: usize,
    pub block_capacity: usize,
    pub main_records: usize,
    pub overflow_records: usize,
    pub overflow_capacity: usize,
    pub marked_records: usize,
    pub index_entries: usize,
}

impl Stats {
    pub fn total_records(&self) -> usize {
        self.main_records + self.overflow_records
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "blocks:   {}/{} allocated, {} records (capacity {} each)",
            self.used_blocks, self.max_blocks, self.main_records, self.block_capacity
        )?;
        writeln!(
            f,
            "overflow: {}/{} records",
            self.overflow_records, self.overflow_capacity
        )?;
        writeln!(f, "marked:   {} records", self.marked_records)?;
        write!(f, "index:    {} entries", self.index_entries)
    }
}

/// A broken structural invariant found by [`Manager::verify`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Keys not strictly ascending at `position`
    Unsorted { location: Location, position: usize },

    /// More records than slots
    OverCapacity { location: Location, len: usize, capacity: usize },

    /// Same key stored more than once
    DuplicateKey { key: i64 },

    /// Index anchor differs from the block's smallest key
    StaleAnchor { block_id: usize, anchor: Option<i64>, first_key: i64 },

    /// Index entry pointing past the allocated blocks
    DanglingEntry { block_id: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Unsorted { location, position } => {
                write!(f, "{} is out of order at position {}", location, position)
            }
            Violation::OverCapacity { location, len, capacity } => {
                write!(f, "{} holds {} records (capacity {})", location, len, capacity)
            }
            Violation::DuplicateKey { key } => write!(f, "key {} is stored more than once", key),
            Violation::StaleAnchor { block_id, anchor, first_key } => match anchor {
                Some(anchor) => write!(
                    f,
                    "index anchor {} for block {} differs from its first key {}",
                    anchor, block_id, first_key
                ),
                None => write!(f, "block {} holds records but has no index entry", block_id),
            },
            Violation::DanglingEntry { block_id } => {
                write!(f, "index entry points at unallocated block {}", block_id)
            }
        }
    }
}

impl<V> Manager<V> {
    /// Build an empty structure
    ///
    /// Block 0 exists from the start and the index holds its bootstrap entry.
    /// The config is trusted; run [`Config::validate`] first.
    pub fn new(config: Config) -> Self {
        let data = DataArea::new(&config);
        let index = SparseIndex::with_sentinel();

        tracing::debug!(
            block_capacity = config.block_capacity,
            max_blocks = config.max_blocks,
            overflow_capacity = config.overflow_capacity,
            density = %config.density,
            "created ISAM structure"
        );

        Self { config, data, index }
    }

    /// Insert a record
    ///
    /// Steps:
    /// 1. Reject the key if it is already stored anywhere
    /// 2. Resolve the candidate block through the index
    /// 3. Let the data area place the record
    /// 4. Re-anchor the block if the record went into a main block
    ///
    /// On error the structure is unchanged.
    pub fn add(&mut self, key: i64, value: V) -> Result<Location> {
        // Step 1: Global uniqueness
        if self.data.check_key(key) {
            tracing::debug!(key, "rejected duplicate key");
            return Err(IsamError::DuplicateKey(key));
        }

        // Step 2: Candidate block
        let block_id = self.index.resolve(key);

        // Step 3: Placement
        let location = match self.data.add_record_to_data(block_id, Record::new(key, value)) {
            Ok(location) => location,
            Err(e) => {
                tracing::warn!(key, block_id, error = %e, "insert rejected");
                return Err(e);
            }
        };

        // Step 4: Index maintenance (overflow has no entry)
        if let Location::Block(id) = location {
            if let Some(anchor) = self.data.block(id).and_then(|b| b.first_key()) {
                self.index.update(id, anchor);
            }
        }

        tracing::debug!(key, candidate = block_id, %location, "record placed");
        Ok(location)
    }

    /// Look a key up
    ///
    /// Scans the candidate block, then the overflow block. Overflow marks are
    /// not followed.
    pub fn search(&self, key: i64) -> Option<Hit<'_, V>> {
        let block_id = self.index.resolve(key);

        // Step 1: Candidate block
        let in_block = match self.data.find_in_block(block_id, key) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(key, error = %e, "lookup resolved to an invalid block");
                return None;
            }
        };

        if let Some(record) = in_block {
            tracing::trace!(key, block_id, "found in main block");
            return Some(Hit {
                location: Location::Block(block_id),
                record,
            });
        }

        // Step 2: Overflow fallback
        let hit = self.data.find_in_overflow(key).map(|record| Hit {
            location: Location::Overflow,
            record,
        });
        tracing::trace!(key, block_id, found = hit.is_some(), "probed overflow");
        hit
    }

    /// True if `key` is stored anywhere
    pub fn contains_key(&self, key: i64) -> bool {
        self.data.check_key(key)
    }

    /// Check every structural invariant
    ///
    /// Returns the violations found; empty means healthy.
    pub fn verify(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        let mut keys = Vec::with_capacity(self.data.record_count());

        let all_blocks = self
            .data
            .blocks()
            .iter()
            .chain(std::iter::once(self.data.overflow()));

        for block in all_blocks {
            let records = block.records();

            if records.len() > block.capacity() {
                violations.push(Violation::OverCapacity {
                    location: block.location(),
                    len: records.len(),
                    capacity: block.capacity(),
                });
            }

            for (position, pair) in records.windows(2).enumerate() {
                if pair[0].key() >= pair[1].key() {
                    violations.push(Violation::Unsorted {
                        location: block.location(),
                        position: position + 1,
                    });
                }
            }

            keys.extend(records.iter().map(Record::key));
        }

        keys.sort_unstable();
        for pair in keys.windows(2) {
            if pair[0] == pair[1] {
                violations.push(Violation::DuplicateKey { key: pair[0] });
            }
        }

        for (block_id, block) in self.data.blocks().iter().enumerate() {
            if let Some(first_key) = block.first_key() {
                let anchor = self.index.anchor_for(block_id);
                if anchor != Some(first_key) {
                    violations.push(Violation::StaleAnchor {
                        block_id,
                        anchor,
                        first_key,
                    });
                }
            }
        }

        for entry in self.index.entries() {
            if entry.block_id >= self.data.used_blocks() {
                violations.push(Violation::DanglingEntry {
                    block_id: entry.block_id,
                });
            }
        }

        violations
    }

    /// Occupancy summary
    pub fn stats(&self) -> Stats {
        Stats {
            used_blocks: self.data.used_blocks(),
            max_blocks: self.data.max_blocks(),
            block_capacity: self.data.block_capacity(),
            main_records: self.data.main_record_count(),
            overflow_records: self.data.overflow().len(),
            overflow_capacity: self.data.overflow().capacity(),
            marked_records: self
                .data
                .blocks()
                .iter()
                .map(|b| b.marked_count())
                .sum::<usize>()
                + self.data.overflow().marked_count(),
            index_entries: self.index.len(),
        }
    }

    /// Printable view of the index area and data area
    pub fn layout(&self) -> Layout<'_, V> {
        Layout::new(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn data_area(&self) -> &DataArea<V> {
        &self.data
    }

    pub fn index(&self) -> &SparseIndex {
        &self.index
    }

    /// Number of allocated main blocks
    pub fn used_blocks(&self) -> usize {
        self.data.used_blocks()
    }

    /// Records stored anywhere
    pub fn len(&self) -> usize {
        self.data.record_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for Manager<V> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
