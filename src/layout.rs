//! Layout rendering
//!
//! Text dump of the index area and data area.
//!
//! ```text
//! --- Index Area ---
//!   [~] Key: 1 => Block 0 (addr 0)
//!   [~] Key: 6 => Block 1 (addr 3)
//!
//! --- Data Area ---
//!   Block 0 [3/3]
//!     ~ Key: 1 => Value: a => Mark: overflow
//!   ...
//!   Overflow Area [1/3]
//!     ~ Key: 2 => Value: b => Mark: -
//! ```

use std::fmt;

use crate::manager::Manager;
use crate::storage::Block;

/// Borrowed, printable view of a [`Manager`]
pub struct Layout<'a, V> {
    manager: &'a Manager<V>,
}

impl<'a, V> Layout<'a, V> {
    pub fn new(manager: &'a Manager<V>) -> Self {
        Self { manager }
    }
}

impl<V: fmt::Display> fmt::Display for Layout<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.manager.data_area();
        let capacity = data.block_capacity();

        writeln!(f, "--- Index Area ---")?;
        let index = self.manager.index();
        for entry in index.entries() {
            if index.is_sentinel(entry) {
                writeln!(
                    f,
                    "  [~] Key: (start) => Block {} (addr {})",
                    entry.block_id,
                    entry.address(capacity)
                )?;
            } else {
                writeln!(
                    f,
                    "  [~] Key: {} => Block {} (addr {})",
                    entry.anchor_key,
                    entry.block_id,
                    entry.address(capacity)
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "--- Data Area ---")?;
        for block in data.blocks() {
            write_block(f, &block.location().to_string(), block)?;
        }
        for id in data.used_blocks()..data.max_blocks() {
            writeln!(f, "  Block {} [unallocated]", id)?;
        }

        write_block(f, "Overflow Area", data.overflow())
    }
}

fn write_block<V: fmt::Display>(f: &mut fmt::Formatter<'_>, title: &str, block: &Block<V>) -> fmt::Result {
    writeln!(f, "  {} [{}/{}]", title, block.len(), block.capacity())?;
    if block.is_empty() {
        return writeln!(f, "    (empty)");
    }
    for record in block.records() {
        writeln!(
            f,
            "    ~ Key: {} => Value: {} => Mark: {}",
            record.key(),
            record.value(),
            record.overflow_mark()
        )?;
    }
    Ok(())
}
