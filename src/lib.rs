//! # ISAM Simulator
//!
//! An in-memory Indexed Sequential Access Method with:
//! - Fixed-capacity, key-sorted blocks allocated sequentially
//! - A sparse primary index (one anchor key per block)
//! - A shared overflow block for records that cannot go in place
//! - An interactive shell for driving and inspecting the structure
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   Shell Session                              │
//! │              (add / search / show ...)                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Manager                                 │
//! │            (duplicate check, orchestration)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────────┐
//!   │ SparseIndex │          │     DataArea     │
//!   │ anchor→block│          │ blocks + overflow│
//!   └─────────────┘          └──────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use isam::{Config, Location, Manager};
//!
//! let mut manager = Manager::new(Config::default());
//! for key in [1, 3, 4] {
//!     manager.add(key, format!("value {}", key)).unwrap();
//! }
//!
//! // Block 0 is full and 2 falls in its middle: it goes to overflow
//! assert_eq!(manager.add(2, "two".to_string()).unwrap(), Location::Overflow);
//!
//! let hit = manager.search(2).unwrap();
//! assert_eq!(hit.value(), "two");
//! assert!(manager.search(99).is_none());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod storage;
pub mod index;
pub mod manager;
pub mod layout;
pub mod protocol;
pub mod shell;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{IsamError, RejectReason, Result};
pub use config::{Config, DensityPolicy};
pub use manager::{Hit, Manager, Stats, Violation};
pub use storage::{Location, OverflowMark, Record};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the simulator
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
