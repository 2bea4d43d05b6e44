//! Error types for the memory simulator
//!
//! This module defines [`SimError`], which covers every failure the engine can
//! report, from construction-time configuration problems to rejected commands.
//!
//! Errors fall into two groups:
//! - **Command errors** (`DuplicateVariable`, `OutOfMemory`, `VariableNotFound`, ...)
//!   are reported back to the user and leave every tier untouched.
//! - **Invariant violations** (`PageNotFound`, `IdentityMismatch`) mean the tiers
//!   disagree with each other. See [`SimError::is_fatal`].

use crate::memory::page::PageId;
use std::fmt;

/// Errors that can occur while building or driving the simulator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// Address space, page size and cache size do not line up
    InvalidPageConfiguration { message: String },

    /// A variable with this name already lives somewhere in the address space
    DuplicateVariable { name: String, page: PageId },

    /// No page has enough free space for the request
    OutOfMemory {
        name: String,
        requested: usize,
        largest_free: usize,
    },

    /// No page holds a variable with this name
    VariableNotFound { name: String },

    /// A tier was asked for a page id it does not hold
    PageNotFound { id: PageId },

    /// Content was copied between two pages with different ids
    IdentityMismatch { expected: PageId, found: PageId },

    /// Allocation size was zero or not a number
    InvalidSize { name: String, size: String },

    /// First token of a command line is not a known command
    UnknownCommand { command: String },

    /// Known command with the wrong number of arguments
    InvalidArguments {
        command: String,
        usage: &'static str,
    },

    /// A script passed to `load` could not be read
    LoadFailed { path: String, message: String },

    /// Scripts loading scripts went too deep
    LoadDepthExceeded { path: String, limit: usize },
}

impl SimError {
    /// True for errors that mean the tiers are inconsistent with each other.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SimError::PageNotFound { .. } | SimError::IdentityMismatch { .. }
        )
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        SimError::InvalidPageConfiguration {
            message: message.into(),
        }
    }
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidPageConfiguration { message } => {
                write!(f, "Invalid page configuration: {}", message)
            }
            SimError::DuplicateVariable { name, page } => {
                write!(
                    f,
                    "Variable '{}' already exists (page {})",
                    name, page
                )
            }
            SimError::OutOfMemory {
                name,
                requested,
                largest_free,
            } => {
                write!(
                    f,
                    "Out of memory: '{}' needs {} bytes, largest free space is {}",
                    name, requested, largest_free
                )
            }
            SimError::VariableNotFound { name } => {
                write!(f, "Variable '{}' not found", name)
            }
            SimError::PageNotFound { id } => {
                write!(f, "Page {} not found", id)
            }
            SimError::IdentityMismatch { expected, found } => {
                write!(
                    f,
                    "Cannot sync page {} from page {}: ids differ",
                    expected, found
                )
            }
            SimError::InvalidSize { name, size } => {
                write!(
                    f,
                    "Invalid size '{}' for '{}' (must be a positive integer)",
                    size, name
                )
            }
            SimError::UnknownCommand { command } => {
                write!(
                    f,
                    "Unknown command '{}' (expected stack, heap, get or load)",
                    command
                )
            }
            SimError::InvalidArguments { command, usage } => {
                write!(f, "Invalid arguments for '{}'. Usage: {}", command, usage)
            }
            SimError::LoadFailed { path, message } => {
                write!(f, "Cannot load '{}': {}", path, message)
            }
            SimError::LoadDepthExceeded { path, limit } => {
                write!(
                    f,
                    "Cannot load '{}': scripts nested more than {} levels deep",
                    path, limit
                )
            }
        }
    }
}

impl std::error::Error for SimError {}
