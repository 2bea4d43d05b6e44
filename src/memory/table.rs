//! Page tables: one tier's view of the address space
//!
//! A [`PageTable`] is an ordered list of pages plus the [`TierKind`] it plays.
//! Identity is always the logical page id, never the array position: the
//! authoritative table stores ids in descending order, the disk table stores
//! them shuffled, and the cache holds only a few of them.
//!
//! # Placement
//!
//! The authoritative table doubles as the allocator. [`PageTable::place`] runs a
//! first-fit search whose direction depends on [`AllocKind`]:
//!
//! ```text
//! stack:  id n-1 → n-2 → ... → 0     (high addresses first)
//! heap:   id 0   → 1   → ... → n-1   (low addresses first)
//! ```
//!
//! so the two kinds grow toward each other over the same pages.

use super::page::{Page, PageId};
use super::variable::Variable;
use crate::interpreter::errors::SimError;
use rand::seq::SliceRandom;
use rand::RngCore;

/// Which role a table plays in the hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierKind {
    /// The address space itself (stack and heap)
    Authoritative,
    /// Bounded fast tier
    Cache,
    /// Backing store for everything not cached
    Disk,
}

impl TierKind {
    pub fn label(self) -> &'static str {
        match self {
            TierKind::Authoritative => "Memory",
            TierKind::Cache => "Cache",
            TierKind::Disk => "Disk",
        }
    }
}

/// Direction of a first-fit search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocKind {
    Stack,
    Heap,
}

impl AllocKind {
    pub fn keyword(self) -> &'static str {
        match self {
            AllocKind::Stack => "stack",
            AllocKind::Heap => "heap",
        }
    }
}

/// How page ids are laid out when a table is built
pub enum PlacementOrder<'a> {
    /// `n-1, n-2, ..., 0`
    Descending,
    /// A random permutation drawn once from the given source
    Randomized(&'a mut dyn RngCore),
}

/// One tier's ordered collection of pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTable {
    kind: TierKind,
    page_size: usize,
    pages: Vec<Page>,
}

impl PageTable {
    /// Build a table covering the whole address space.
    pub fn new(
        kind: TierKind,
        address_space_size: usize,
        page_size: usize,
        order: PlacementOrder<'_>,
    ) -> Result<Self, SimError> {
        if page_size == 0 || address_space_size % page_size != 0 {
            return Err(SimError::invalid_config(format!(
                "address space size {} is not a multiple of page size {}",
                address_space_size, page_size
            )));
        }

        let page_count = address_space_size / page_size;
        let mut ids: Vec<PageId> = (0..page_count).rev().collect();
        if let PlacementOrder::Randomized(rng) = order {
            ids.shuffle(rng);
        }

        Ok(PageTable {
            kind,
            page_size,
            pages: ids.into_iter().map(|id| Page::new(id, page_size)).collect(),
        })
    }

    /// Build a table from pages that already exist (used for the cache tier).
    pub fn from_pages(kind: TierKind, page_size: usize, pages: Vec<Page>) -> Self {
        PageTable {
            kind,
            page_size,
            pages,
        }
    }

    pub fn kind(&self) -> TierKind {
        self.kind
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Array position of the page with this id
    pub fn position(&self, id: PageId) -> Option<usize> {
        self.pages.iter().position(|p| p.id() == id)
    }

    pub fn contains_page(&self, id: PageId) -> bool {
        self.position(id).is_some()
    }

    /// Find a page by id
    pub fn lookup(&self, id: PageId) -> Result<&Page, SimError> {
        self.pages
            .iter()
            .find(|p| p.id() == id)
            .ok_or(SimError::PageNotFound { id })
    }

    /// Find a page by id for modification
    pub fn lookup_mut(&mut self, id: PageId) -> Result<&mut Page, SimError> {
        self.pages
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(SimError::PageNotFound { id })
    }

    /// Replace the page at array position `slot` outright
    pub(crate) fn replace_slot(&mut self, slot: usize, page: Page) {
        self.pages[slot] = page;
    }

    /// First page (in table order) holding a variable called `name`
    pub fn find_owning_page(&self, name: &str) -> Result<&Page, SimError> {
        self.pages
            .iter()
            .find(|p| p.contains(name))
            .ok_or_else(|| SimError::VariableNotFound {
                name: name.to_string(),
            })
    }

    /// First-fit placement.
    ///
    /// Returns the id of the page that received the variable. On
    /// `OutOfMemory` the table is left untouched. Name uniqueness is the
    /// caller's job.
    pub fn place(&mut self, variable: Variable, kind: AllocKind) -> Result<PageId, SimError> {
        let size = variable.size();

        // Ids are stored descending, so stack scans forward and heap scans backward
        let slot = match kind {
            AllocKind::Stack => self.pages.iter().position(|p| p.fits(size)),
            AllocKind::Heap => self.pages.iter().rposition(|p| p.fits(size)),
        };

        let Some(slot) = slot else {
            return Err(SimError::OutOfMemory {
                name: variable.name().to_string(),
                requested: size,
                largest_free: self.largest_free(),
            });
        };

        let page = &mut self.pages[slot];
        page.add_variable(variable);
        Ok(page.id())
    }

    /// Overwrite this table's copy of `page` with its content (disk write-back)
    pub fn update(&mut self, page: &Page) -> Result<(), SimError> {
        self.lookup_mut(page.id())?.sync_from(page)
    }

    /// Most free bytes on any single page
    pub fn largest_free(&self) -> usize {
        self.pages.iter().map(Page::free).max().unwrap_or(0)
    }

    pub fn total_used(&self) -> usize {
        self.pages.iter().map(Page::used).sum()
    }

    pub fn clear_highlights(&mut self) {
        for page in &mut self.pages {
            page.highlighted = false;
        }
    }
}
