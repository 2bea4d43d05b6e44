//! Fixed-capacity pages
//!
//! A [`Page`] is the unit every tier works in. The same page id appears in the
//! authoritative table, on disk, and (sometimes) in the cache; content moves
//! between tiers with [`Page::sync_from`] / [`Page::replace_content`], which
//! refuse to copy across different ids.

use super::variable::Variable;
use crate::interpreter::errors::SimError;

/// Logical page identifier, stable across tiers
pub type PageId = usize;

/// A page of the simulated address space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    id: PageId,
    capacity: usize,
    used: usize,
    variables: Vec<Variable>,
    /// Display-only flag, set by `get`
    pub highlighted: bool,
}

impl Page {
    pub fn new(id: PageId, capacity: usize) -> Self {
        Page {
            id,
            capacity,
            used: 0,
            variables: Vec::new(),
            highlighted: false,
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn used(&self) -> usize {
        self.used
    }

    pub fn free(&self) -> usize {
        self.capacity - self.used
    }

    /// Check whether a variable of `size` bytes would fit
    pub fn fits(&self, size: usize) -> bool {
        self.free() >= size
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v.name() == name)
    }

    /// Append a variable.
    ///
    /// Does not check capacity: callers must have confirmed [`Page::fits`] first.
    pub fn add_variable(&mut self, variable: Variable) {
        debug_assert!(self.fits(variable.size()), "page {} overfilled", self.id);
        self.used += variable.size();
        self.variables.push(variable);
    }

    /// Overwrite this page's content with another page's content.
    pub fn sync_from(&mut self, source: &Page) -> Result<(), SimError> {
        self.replace_content(source.id, &source.variables)
    }

    /// Overwrite this page's content with `variables`, which belong to page `source_id`.
    ///
    /// This is a full replacement, not a merge. `used` is recomputed from the
    /// new variable list so it can never drift from the content.
    pub fn replace_content(
        &mut self,
        source_id: PageId,
        variables: &[Variable],
    ) -> Result<(), SimError> {
        if source_id != self.id {
            return Err(SimError::IdentityMismatch {
                expected: self.id,
                found: source_id,
            });
        }

        self.variables = variables.to_vec();
        self.used = self.variables.iter().map(Variable::size).sum();
        Ok(())
    }

    /// Check `used == sum(sizes)` and `used <= capacity`
    pub fn is_consistent(&self) -> bool {
        let total: usize = self.variables.iter().map(Variable::size).sum();
        total == self.used && self.used <= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_variable_tracks_usage() {
        let mut page = Page::new(3, 16);
        page.add_variable(Variable::new("a", 4));
        page.add_variable(Variable::new("b", 8));

        assert_eq!(page.used(), 12);
        assert_eq!(page.free(), 4);
        assert!(page.fits(4));
        assert!(!page.fits(5));
        assert!(page.contains("b"));
        assert!(page.is_consistent());
    }

    #[test]
    fn test_sync_overwrites_content() {
        let mut source = Page::new(2, 16);
        source.add_variable(Variable::new("x", 4));

        let mut target = Page::new(2, 16);
        target.add_variable(Variable::new("stale", 12));

        target.sync_from(&source).unwrap();
        assert_eq!(target.used(), 4);
        assert_eq!(target.variables(), source.variables());
    }

    #[test]
    fn test_sync_rejects_other_id() {
        let source = Page::new(1, 16);
        let mut target = Page::new(2, 16);
        target.add_variable(Variable::new("keep", 4));

        let err = target.sync_from(&source).unwrap_err();
        assert_eq!(
            err,
            SimError::IdentityMismatch {
                expected: 2,
                found: 1
            }
        );
        // Nothing copied
        assert_eq!(target.used(), 4);
        assert!(target.contains("keep"));
    }

    #[test]
    fn test_sync_keeps_highlight() {
        let source = Page::new(0, 8);
        let mut target = Page::new(0, 8);
        target.highlighted = true;

        target.sync_from(&source).unwrap();
        assert!(target.highlighted);
    }
}
