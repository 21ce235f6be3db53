//! Record definitions
//!
//! A keyed value plus the overflow indicator.

use std::fmt;

/// Overflow indicator carried by every record
///
/// Set on the record logically preceding one that was diverted to the
/// overflow block. Lookups never follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowMark {
    #[default]
    None,
    Marked,
}

impl OverflowMark {
    pub fn is_marked(&self) -> bool {
        matches!(self, OverflowMark::Marked)
    }
}

impl fmt::Display for OverflowMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowMark::None => f.write_str("-"),
            OverflowMark::Marked => f.write_str("overflow"),
        }
    }
}

/// A single record
///
/// Key and value are fixed at construction; only the mark can change, and
/// only from `None` to `Marked`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<V> {
    key: i64,
    value: V,
    overflow_mark: OverflowMark,
}

impl<V> Record<V> {
    /// Create an unmarked record
    pub fn new(key: i64, value: V) -> Self {
        Self {
            key,
            value,
            overflow_mark: OverflowMark::None,
        }
    }

    pub fn key(&self) -> i64 {
        self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn overflow_mark(&self) -> OverflowMark {
        self.overflow_mark
    }

    /// Set the overflow mark
    ///
    /// Returns true if the record was unmarked before.
    pub fn mark_overflow(&mut self) -> bool {
        let was_unmarked = !self.overflow_mark.is_marked();
        self.overflow_mark = OverflowMark::Marked;
        was_unmarked
    }
}
