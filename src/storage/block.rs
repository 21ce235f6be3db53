//! Block implementation
//!
//! Fixed-capacity, key-sorted run of records.

use crate::error::{IsamError, Result};

use super::{Location, OverflowMark, Record};

/// A fixed-capacity block of records, strictly ascending by key
///
/// Storage is a `Vec` whose length never exceeds `capacity`.
#[derive(Debug, Clone)]
pub struct Block<V> {
    /// Which block this is (main block id or overflow)
    location: Location,

    /// Maximum number of records
    capacity: usize,

    /// Records, sorted by key
    records: Vec<Record<V>>,
}

impl<V> Block<V> {
    /// Create an empty block
    pub fn new(location: Location, capacity: usize) -> Self {
        Self {
            location,
            capacity,
            records: Vec::with_capacity(capacity),
        }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// True iff every slot is taken
    pub fn is_full(&self) -> bool {
        self.records.len() >= self.capacity
    }

    /// Records in key order
    pub fn records(&self) -> &[Record<V>] {
        &self.records
    }

    /// Smallest key in the block
    pub fn first_key(&self) -> Option<i64> {
        self.records.first().map(Record::key)
    }

    /// Largest key in the block
    pub fn last_key(&self) -> Option<i64> {
        self.records.last().map(Record::key)
    }

    /// Where a record with `key` would be inserted: the number of
    /// records with a strictly smaller key
    pub fn position_for(&self, key: i64) -> usize {
        self.records.iter().take_while(|r| r.key() < key).count()
    }

    /// Exact-match linear scan
    pub fn find(&self, key: i64) -> Option<&Record<V>> {
        self.records.iter().find(|r| r.key() == key)
    }

    pub fn contains_key(&self, key: i64) -> bool {
        self.find(key).is_some()
    }

    /// Insert a record in key order, shifting later records right
    ///
    /// Returns the slot the record landed in. The caller guarantees the key
    /// is not already present. Positions taken before this call are stale
    /// afterwards.
    pub fn add_record(&mut self, record: Record<V>) -> Result<usize> {
        if self.is_full() {
            return Err(IsamError::BlockFull {
                location: self.location,
                capacity: self.capacity,
            });
        }

        let pos = self.position_for(record.key());
        self.records.insert(pos, record);
        Ok(pos)
    }

    /// Set the overflow mark of the record at `pos`
    ///
    /// Returns false if there is no record there or it was already marked.
    pub fn mark_overflow(&mut self, pos: usize) -> bool {
        match self.records.get_mut(pos) {
            Some(record) => record.mark_overflow(),
            None => false,
        }
    }

    /// Number of records carrying an overflow mark
    pub fn marked_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.overflow_mark() == OverflowMark::Marked)
            .count()
    }
}
