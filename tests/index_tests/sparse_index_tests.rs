//! Sparse Index Tests
//!
//! Tests for anchor maintenance and block resolution.

use isam::index::{IndexEntry, SparseIndex, SENTINEL_KEY};

// =============================================================================
// Resolution Tests
// =============================================================================

#[test]
fn test_empty_index_resolves_to_block_zero() {
    let index = SparseIndex::new();

    assert!(index.is_empty());
    assert_eq!(index.resolve(42), 0);
    assert_eq!(index.resolve(i64::MIN), 0);
}

#[test]
fn test_sentinel_routes_every_key_to_block_zero() {
    let index = SparseIndex::with_sentinel();

    assert_eq!(index.len(), 1);
    assert!(index.is_sentinel(&index.entries()[0]));
    assert_eq!(index.anchor_for(0), Some(SENTINEL_KEY));
    assert_eq!(index.resolve(i64::MIN), 0);
    assert_eq!(index.resolve(-1), 0);
    assert_eq!(index.resolve(i64::MAX), 0);
}

#[test]
fn test_resolve_picks_last_anchor_not_above_key() {
    let mut index = SparseIndex::new();
    index.update(0, 1);
    index.update(1, 6);
    index.update(2, 5);

    assert_eq!(index.resolve(1), 0);
    assert_eq!(index.resolve(4), 0);
    assert_eq!(index.resolve(5), 2);
    assert_eq!(index.resolve(6), 1);
    assert_eq!(index.resolve(100), 1);
}

#[test]
fn test_resolve_below_every_anchor_falls_back_to_block_zero() {
    let mut index = SparseIndex::new();
    index.update(3, 10);
    index.update(1, 20);

    assert_eq!(index.resolve(-5), 0);
}

// =============================================================================
// Update Tests
// =============================================================================

#[test]
fn test_update_appends_and_sorts() {
    let mut index = SparseIndex::new();
    index.update(0, 30);
    index.update(1, 10);
    index.update(2, 20);

    let anchors: Vec<i64> = index.entries().iter().map(|e| e.anchor_key).collect();
    let blocks: Vec<usize> = index.entries().iter().map(|e| e.block_id).collect();

    assert_eq!(anchors, vec![10, 20, 30]);
    assert_eq!(blocks, vec![1, 2, 0]);
}

#[test]
fn test_update_replaces_existing_entry() {
    let mut index = SparseIndex::with_sentinel();

    index.update(0, 7);
    index.update(0, 3);

    assert_eq!(index.len(), 1);
    assert_eq!(index.anchor_for(0), Some(3));
    assert!(!index.is_sentinel(&index.entries()[0]));
}

#[test]
fn test_real_minimum_key_is_not_the_sentinel() {
    let mut index = SparseIndex::with_sentinel();

    index.update(0, i64::MIN);

    assert_eq!(index.anchor_for(0), Some(SENTINEL_KEY));
    assert!(!index.is_sentinel(&index.entries()[0]));
}

#[test]
fn test_plain_index_has_no_sentinel() {
    let mut index = SparseIndex::new();
    index.update(1, 4);

    assert!(!index.is_sentinel(&index.entries()[0]));
}

#[test]
fn test_update_resorts_after_replacement() {
    let mut index = SparseIndex::new();
    index.update(0, 10);
    index.update(1, 20);

    index.update(1, 5);

    assert_eq!(index.entries()[0], IndexEntry { anchor_key: 5, block_id: 1 });
    assert_eq!(index.entries()[1], IndexEntry { anchor_key: 10, block_id: 0 });
}

#[test]
fn test_anchor_for_unknown_block() {
    let index = SparseIndex::with_sentinel();

    assert_eq!(index.anchor_for(4), None);
}

// =============================================================================
// Display Helper Tests
// =============================================================================

#[test]
fn test_entry_address_is_first_slot_of_block() {
    let entry = IndexEntry { anchor_key: 6, block_id: 2 };

    assert_eq!(entry.address(3), 6);
    assert_eq!(entry.address(10), 20);
}
