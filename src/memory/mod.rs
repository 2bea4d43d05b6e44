//! Memory model for the simulator
//!
//! This module provides the three-tier hierarchy:
//! - [`variable`]: Named, sized allocation records
//! - [`page`]: Fixed-capacity pages holding variables
//! - [`table`]: Page tables, first-fit placement for stack and heap
//! - [`cache`]: The bounded cache tier with LRU eviction against disk
//! - [`config`]: Sizes the tiers are built from
//!
//! # Tiers
//!
//! ```text
//! Memory (authoritative)   Cache (bounded)     Disk (backing store)
//!   every page id           a few page ids      every page id, shuffled
//! ```
//!
//! Every page id that is not in the cache has its current content on disk.
//! Pages in the cache match the authoritative table as of their last sync.

pub mod cache;
pub mod config;
pub mod page;
pub mod table;
pub mod variable;

pub use cache::{Admission, CacheStats, CacheTier};
pub use config::MemoryConfig;
pub use page::{Page, PageId};
pub use table::{AllocKind, PageTable, PlacementOrder, TierKind};
pub use variable::Variable;
