//! # Introduction
//!
//! memtier simulates a three-tier memory hierarchy: a stack/heap address space
//! split into fixed-size pages, a small cache with least-recently-used
//! eviction, and a disk that backs every page the cache doesn't hold. Commands
//! typed into a terminal UI built with [ratatui](https://docs.rs/ratatui) drive
//! the simulation, and each tier is drawn side by side after every command.
//!
//! ## Pipeline
//!
//! ```text
//! Input line → Command → Session → Memory / Cache / Disk → Snapshot → TUI
//! ```
//!
//! 1. [`interpreter`] - parses command lines and runs them against a
//!    [`interpreter::engine::Session`].
//! 2. [`memory`] - pages, page tables, first-fit placement and the
//!    [`memory::CacheTier`].
//! 3. [`snapshot`] - frozen read-only views of every tier and the console log.
//! 4. [`ui`] - ratatui-based TUI; not part of the stable library API.
//!
//! ## Commands
//!
//! `stack NAME SIZE`, `heap NAME SIZE`, `get NAME`, `load FILE`.

pub mod interpreter;
pub mod memory;
pub mod snapshot;
pub mod ui;
