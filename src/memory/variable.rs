//! Variable records stored inside pages
//!
//! A [`Variable`] is just a name and a size. Names are unique across the whole
//! simulated address space; that uniqueness is enforced by the session before
//! anything is placed, not here.

use std::fmt;

/// A named, sized allocation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Variable {
    name: String,
    size: usize,
}

impl Variable {
    pub fn new(name: impl Into<String>, size: usize) -> Self {
        Variable {
            name: name.into(),
            size,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.size
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} bytes)", self.name, self.size)
    }
}
