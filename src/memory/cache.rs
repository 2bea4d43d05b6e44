//! Cache tier with least-recently-used eviction
//!
//! The cache holds a fixed number of page slots. Each resident page mirrors the
//! authoritative page with the same id as of its last sync. An eviction queue
//! orders the resident ids from least to most recently touched:
//!
//! ```text
//! front (next victim) → [ 6, 5, 7 ] ← back (most recently used)
//! ```
//!
//! # Miss handling
//!
//! Every miss runs the same cycle, whether or not the cache "looks" full, since
//! all slots are populated at construction:
//!
//! 1. the queue front is the victim
//! 2. the victim's slot is flushed to disk
//! 3. the slot is replaced by a fresh page for the incoming id, synced from
//!    the authoritative table
//! 4. the incoming id goes to the back of the queue and the victim leaves the front
//!
//! Disk keeps its (now stale) copy of the incoming page until that page is
//! evicted again.

use super::page::{Page, PageId};
use super::table::{PageTable, TierKind};
use crate::interpreter::errors::SimError;
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// What a cache access did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Page was already resident
    Hit,
    /// Page was fetched, pushing `evicted` out to disk
    Fetched { evicted: PageId },
}

/// Running access counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub flushes: u64,
}

impl CacheStats {
    /// Fraction of accesses that hit, `None` before the first access
    pub fn hit_rate(&self) -> Option<f64> {
        let total = self.hits + self.misses;
        (total > 0).then(|| self.hits as f64 / total as f64)
    }
}

/// The bounded cache tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheTier {
    table: PageTable,
    queue: VecDeque<PageId>,
    stats: CacheStats,
}

impl CacheTier {
    /// Build a cache of `slots` pages, initially holding the first `slots`
    /// pages of `memory` in table order.
    pub fn new(memory: &PageTable, slots: usize) -> Result<Self, SimError> {
        if slots == 0 || slots > memory.len() {
            return Err(SimError::invalid_config(format!(
                "cache needs between 1 and {} pages, got {}",
                memory.len(),
                slots
            )));
        }

        let mut pages = Vec::with_capacity(slots);
        for source in memory.pages().iter().take(slots) {
            let mut page = Page::new(source.id(), source.capacity());
            page.sync_from(source)?;
            pages.push(page);
        }

        let queue = pages.iter().map(Page::id).collect();

        Ok(CacheTier {
            table: PageTable::from_pages(TierKind::Cache, memory.page_size(), pages),
            queue,
            stats: CacheStats::default(),
        })
    }

    pub fn table(&self) -> &PageTable {
        &self.table
    }

    /// Resident ids, least recently used first
    pub fn queue(&self) -> &VecDeque<PageId> {
        &self.queue
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    pub fn is_resident(&self, id: PageId) -> bool {
        self.queue.contains(&id)
    }

    /// Every slot is occupied; always true once built, kept for display
    pub fn is_full(&self) -> bool {
        self.queue.len() >= self.capacity()
    }

    pub fn lookup_mut(&mut self, id: PageId) -> Result<&mut Page, SimError> {
        self.table.lookup_mut(id)
    }

    pub fn clear_highlights(&mut self) {
        self.table.clear_highlights();
    }

    /// Make `id` resident after its authoritative content changed.
    ///
    /// A hit re-syncs the cached copy and marks it most recently used.
    pub fn admit(
        &mut self,
        id: PageId,
        memory: &PageTable,
        disk: &mut PageTable,
    ) -> Result<Admission, SimError> {
        if self.is_resident(id) {
            self.table.lookup_mut(id)?.sync_from(memory.lookup(id)?)?;
            self.touch(id);
            self.stats.hits += 1;
            tracing::debug!(page = id, "cache hit, resynced");
            return Ok(Admission::Hit);
        }

        self.fetch(id, memory, disk)
    }

    /// Access `id` without changing its content.
    ///
    /// A hit only moves the page to the back of the queue.
    pub fn lookup_with_touch(
        &mut self,
        id: PageId,
        memory: &PageTable,
        disk: &mut PageTable,
    ) -> Result<Admission, SimError> {
        if self.is_resident(id) {
            self.touch(id);
            self.stats.hits += 1;
            tracing::debug!(page = id, "cache hit");
            return Ok(Admission::Hit);
        }

        self.fetch(id, memory, disk)
    }

    fn touch(&mut self, id: PageId) {
        self.queue.retain(|&queued| queued != id);
        self.queue.push_back(id);
    }

    /// Evict the queue front to disk and load `id` into its slot
    fn fetch(
        &mut self,
        id: PageId,
        memory: &PageTable,
        disk: &mut PageTable,
    ) -> Result<Admission, SimError> {
        let source = memory.lookup(id)?;
        let victim = *self
            .queue
            .front()
            .ok_or(SimError::PageNotFound { id })?;
        // The incoming id is never resident here, so it can't be its own victim
        assert_ne!(victim, id, "page {} selected to evict itself", id);

        let slot = self
            .table
            .position(victim)
            .ok_or(SimError::PageNotFound { id: victim })?;

        disk.update(&self.table.pages()[slot])?;
        self.stats.flushes += 1;

        let mut incoming = Page::new(id, source.capacity());
        incoming.sync_from(source)?;
        self.table.replace_slot(slot, incoming);

        self.queue.retain(|&queued| queued != id);
        self.queue.push_back(id);
        self.queue.pop_front();

        self.stats.misses += 1;
        self.stats.evictions += 1;
        tracing::info!(page = id, evicted = victim, "cache miss, page fetched");

        Ok(Admission::Fetched { evicted: victim })
    }

    /// Check the queue against the slots and the slots against `memory`.
    ///
    /// Returns a description of the first problem found.
    pub fn verify(&self, memory: &PageTable) -> Result<(), String> {
        let mut seen = FxHashSet::default();
        for &id in &self.queue {
            if !seen.insert(id) {
                return Err(format!("page {} queued twice", id));
            }
        }

        let resident: FxHashSet<PageId> = self.table.pages().iter().map(Page::id).collect();
        if resident.len() != self.table.len() {
            return Err("two cache slots hold the same page".to_string());
        }
        if resident != seen {
            return Err(format!(
                "queue {:?} does not match resident pages {:?}",
                self.queue, resident
            ));
        }
        if self.queue.len() > self.capacity() {
            return Err("queue longer than cache capacity".to_string());
        }

        for page in self.table.pages() {
            let source = memory
                .lookup(page.id())
                .map_err(|e| e.to_string())?;
            if page.variables() != source.variables() || page.used() != source.used() {
                return Err(format!("cached page {} is out of date", page.id()));
            }
        }

        Ok(())
    }
}
