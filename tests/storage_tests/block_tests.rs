//! Block Tests
//!
//! Tests verify:
//! - Sorted insertion and returned positions
//! - Capacity enforcement
//! - Insertion-point computation
//! - Exact-match lookup
//! - Overflow marks

use isam::storage::{Block, Location, OverflowMark, Record};
use isam::IsamError;

// =============================================================================
// Helper Functions
// =============================================================================

fn block_with_keys(capacity: usize, keys: &[i64]) -> Block<String> {
    let mut block = Block::new(Location::Block(0), capacity);
    for &key in keys {
        block.add_record(Record::new(key, format!("v{}", key))).unwrap();
    }
    block
}

fn keys_of(block: &Block<String>) -> Vec<i64> {
    block.records().iter().map(|r| r.key()).collect()
}

// =============================================================================
// Basic Operations Tests
// =============================================================================

#[test]
fn test_new_block_is_empty() {
    let block: Block<String> = Block::new(Location::Block(2), 4);

    assert!(block.is_empty());
    assert!(!block.is_full());
    assert_eq!(block.len(), 0);
    assert_eq!(block.capacity(), 4);
    assert_eq!(block.location(), Location::Block(2));
    assert_eq!(block.first_key(), None);
    assert_eq!(block.last_key(), None);
}

#[test]
fn test_add_record_keeps_keys_sorted() {
    let block = block_with_keys(5, &[30, 10, 50, 20, 40]);

    assert_eq!(keys_of(&block), vec![10, 20, 30, 40, 50]);
    assert_eq!(block.first_key(), Some(10));
    assert_eq!(block.last_key(), Some(50));
}

#[test]
fn test_add_record_returns_insert_position() {
    let mut block = block_with_keys(5, &[10, 30]);

    assert_eq!(block.add_record(Record::new(20, "b".to_string())).unwrap(), 1);
    assert_eq!(block.add_record(Record::new(5, "a".to_string())).unwrap(), 0);
    assert_eq!(block.add_record(Record::new(99, "z".to_string())).unwrap(), 4);
}

#[test]
fn test_add_record_shifts_later_records() {
    let mut block = block_with_keys(3, &[1, 3]);

    block.add_record(Record::new(2, "two".to_string())).unwrap();

    assert_eq!(block.records()[1].value(), "two");
    assert_eq!(block.records()[2].key(), 3);
    assert_eq!(block.records()[2].value(), "v3");
}

// =============================================================================
// Capacity Tests
// =============================================================================

#[test]
fn test_block_full_at_capacity() {
    let block = block_with_keys(3, &[1, 2, 3]);

    assert!(block.is_full());
    assert_eq!(block.len(), 3);
}

#[test]
fn test_add_to_full_block_fails() {
    let mut block = block_with_keys(2, &[1, 2]);

    let result = block.add_record(Record::new(3, "x".to_string()));

    match result {
        Err(IsamError::BlockFull { location, capacity }) => {
            assert_eq!(location, Location::Block(0));
            assert_eq!(capacity, 2);
        }
        other => panic!("Expected BlockFull, got {:?}", other),
    }
    assert_eq!(keys_of(&block), vec![1, 2]);
}

#[test]
fn test_overflow_block_full_reports_overflow_location() {
    let mut block = Block::new(Location::Overflow, 1);
    block.add_record(Record::new(1, "a")).unwrap();

    let err = block.add_record(Record::new(2, "b")).unwrap_err();

    assert!(err.to_string().contains("Overflow Block"));
}

// =============================================================================
// Position / Lookup Tests
// =============================================================================

#[test]
fn test_position_for_counts_strictly_smaller_keys() {
    let block = block_with_keys(4, &[10, 20, 30]);

    assert_eq!(block.position_for(5), 0);
    assert_eq!(block.position_for(10), 0);
    assert_eq!(block.position_for(15), 1);
    assert_eq!(block.position_for(30), 2);
    assert_eq!(block.position_for(31), 3);
}

#[test]
fn test_find_exact_match() {
    let block = block_with_keys(4, &[-7, 0, 12]);

    assert_eq!(block.find(-7).map(|r| r.value().as_str()), Some("v-7"));
    assert_eq!(block.find(12).map(|r| r.key()), Some(12));
    assert!(block.find(1).is_none());
    assert!(block.contains_key(0));
    assert!(!block.contains_key(13));
}

// =============================================================================
// Overflow Mark Tests
// =============================================================================

#[test]
fn test_new_records_are_unmarked() {
    let record = Record::new(1, "a");

    assert_eq!(record.overflow_mark(), OverflowMark::None);
    assert!(!record.overflow_mark().is_marked());
}

#[test]
fn test_mark_overflow_sets_once() {
    let mut block = block_with_keys(3, &[1, 2, 3]);

    assert!(block.mark_overflow(1));
    assert!(!block.mark_overflow(1));
    assert_eq!(block.records()[1].overflow_mark(), OverflowMark::Marked);
    assert_eq!(block.records()[0].overflow_mark(), OverflowMark::None);
    assert_eq!(block.marked_count(), 1);
}

#[test]
fn test_mark_overflow_out_of_range() {
    let mut block = block_with_keys(3, &[1]);

    assert!(!block.mark_overflow(5));
    assert_eq!(block.marked_count(), 0);
}

#[test]
fn test_mark_survives_later_shift() {
    let mut block = block_with_keys(4, &[10, 20]);
    block.mark_overflow(0);

    block.add_record(Record::new(5, "v5".to_string())).unwrap();

    assert_eq!(block.find(10).unwrap().overflow_mark(), OverflowMark::Marked);
    assert_eq!(block.find(5).unwrap().overflow_mark(), OverflowMark::None);
}
