//! Command execution
//!
//! This module turns text commands into operations on the memory tiers:
//! - [`command`]: Parses `stack`, `heap`, `get` and `load` lines
//! - [`engine`]: The [`engine::Session`] that owns the three tiers
//! - [`errors`]: Error types shared by the whole crate
//!
//! # Execution Model
//!
//! Commands run one at a time and to completion. A command that fails leaves
//! every tier exactly as it was; the renderer only ever sees the state between
//! commands.

pub mod command;
pub mod constants;
pub mod engine;
pub mod errors;
