// Session: owns the three tiers and runs commands against them

use crate::interpreter::command::Command;
use crate::interpreter::constants::MAX_LOAD_DEPTH;
use crate::interpreter::errors::SimError;
use crate::memory::{
    Admission, AllocKind, CacheStats, CacheTier, MemoryConfig, PageId, PageTable,
    PlacementOrder, TierKind, Variable,
};
use crate::snapshot::{Console, SessionSnapshot, TierView};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::Path;

/// Result of a successful `stack` / `heap` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub name: String,
    pub size: usize,
    pub page: PageId,
    pub admission: Admission,
}

/// Result of a successful `get` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub name: String,
    pub page: PageId,
    pub admission: Admission,
}

/// Result of a `load` command
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Lines that ran a command (blank and comment lines don't count)
    pub executed: usize,
    /// Lines whose command failed
    pub failed: usize,
}

/// What a command did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Placed(Placement),
    Found(Lookup),
    Loaded(LoadSummary),
}

impl Outcome {
    /// One-line description for the console
    pub fn describe(&self) -> String {
        match self {
            Outcome::Placed(p) => format!(
                "placed {} ({} bytes) in page {}{}",
                p.name,
                p.size,
                p.page,
                describe_admission(p.page, p.admission)
            ),
            Outcome::Found(l) => format!(
                "{} is in page {}{}",
                l.name,
                l.page,
                describe_admission(l.page, l.admission)
            ),
            Outcome::Loaded(s) => format!(
                "loaded {} command(s), {} failed",
                s.executed, s.failed
            ),
        }
    }
}

fn describe_admission(page: PageId, admission: Admission) -> String {
    match admission {
        Admission::Hit => ", cache hit".to_string(),
        Admission::Fetched { evicted } => format!(
            ", page {} evicted to disk, page {} fetched",
            evicted, page
        ),
    }
}

/// The simulator: authoritative memory, cache and disk, driven one command at a time
#[derive(Debug, Clone)]
pub struct Session {
    config: MemoryConfig,

    /// Stack and heap address space
    memory: PageTable,

    cache: CacheTier,

    /// Backing store, pages in randomized order
    disk: PageTable,

    /// Transcript of submitted commands
    console: Console,
}

impl Session {
    /// Build a session, seeding the disk layout from `config.seed` or from entropy
    pub fn new(config: MemoryConfig) -> Result<Self, SimError> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, &mut rng)
    }

    /// Build a session drawing the disk layout from `rng`
    pub fn with_rng(config: MemoryConfig, rng: &mut dyn RngCore) -> Result<Self, SimError> {
        config.validate()?;

        let memory = PageTable::new(
            TierKind::Authoritative,
            config.address_space_size,
            config.page_size,
            PlacementOrder::Descending,
        )?;
        let disk = PageTable::new(
            TierKind::Disk,
            config.address_space_size,
            config.page_size,
            PlacementOrder::Randomized(rng),
        )?;
        let cache = CacheTier::new(&memory, config.cache_pages())?;

        tracing::info!(
            pages = config.page_count(),
            page_size = config.page_size,
            cache_pages = config.cache_pages(),
            "session created"
        );

        Ok(Session {
            config,
            memory,
            cache,
            disk,
            console: Console::new(),
        })
    }

    pub fn config(&self) -> &MemoryConfig {
        &self.config
    }

    pub fn memory(&self) -> &PageTable {
        &self.memory
    }

    pub fn cache(&self) -> &CacheTier {
        &self.cache
    }

    pub fn disk(&self) -> &PageTable {
        &self.disk
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Place a new variable with first-fit and make its page resident in the cache.
    ///
    /// Fails without touching any tier if the name is taken, the size is zero,
    /// or nothing fits.
    pub fn allocate(
        &mut self,
        name: &str,
        size: usize,
        kind: AllocKind,
    ) -> Result<Placement, SimError> {
        if size == 0 {
            return Err(SimError::InvalidSize {
                name: name.to_string(),
                size: size.to_string(),
            });
        }
        if let Ok(owner) = self.memory.find_owning_page(name) {
            return Err(SimError::DuplicateVariable {
                name: name.to_string(),
                page: owner.id(),
            });
        }

        let page = self.memory.place(Variable::new(name, size), kind)?;
        self.clear_highlights();
        let admission = self.cache.admit(page, &self.memory, &mut self.disk)?;

        tracing::info!(name, size, page, kind = kind.keyword(), "variable placed");
        Ok(Placement {
            name: name.to_string(),
            size,
            page,
            admission,
        })
    }

    /// Find the page holding `name`, bring it into the cache and highlight it.
    pub fn get(&mut self, name: &str) -> Result<Lookup, SimError> {
        let page = self.memory.find_owning_page(name)?.id();

        self.clear_highlights();
        let admission = self
            .cache
            .lookup_with_touch(page, &self.memory, &mut self.disk)?;
        self.memory.lookup_mut(page)?.highlighted = true;
        self.cache.lookup_mut(page)?.highlighted = true;

        Ok(Lookup {
            name: name.to_string(),
            page,
            admission,
        })
    }

    /// Run every line of a script. Failing lines are logged and skipped.
    pub fn load(&mut self, path: &Path) -> Result<LoadSummary, SimError> {
        self.load_nested(path, 0)
    }

    fn load_nested(&mut self, path: &Path, depth: usize) -> Result<LoadSummary, SimError> {
        if depth >= MAX_LOAD_DEPTH {
            return Err(SimError::LoadDepthExceeded {
                path: path.display().to_string(),
                limit: MAX_LOAD_DEPTH,
            });
        }

        let script = fs::read_to_string(path).map_err(|e| SimError::LoadFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        tracing::info!(path = %path.display(), "loading script");
        let mut summary = LoadSummary::default();
        for (index, line) in script.lines().enumerate() {
            let command = match Command::parse(line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    summary.executed += 1;
                    summary.failed += 1;
                    self.report_script_error(path, index + 1, &e);
                    continue;
                }
            };

            summary.executed += 1;
            match self.execute_at(command, depth + 1) {
                Ok(outcome) => self.console.output(outcome.describe()),
                Err(e) => {
                    summary.failed += 1;
                    self.report_script_error(path, index + 1, &e);
                    if e.is_fatal() {
                        return Err(e);
                    }
                }
            }
        }

        Ok(summary)
    }

    fn report_script_error(&mut self, path: &Path, line: usize, error: &SimError) {
        tracing::warn!(path = %path.display(), line, %error, "script line failed");
        self.console
            .error(format!("{}:{}: {}", path.display(), line, error));
    }

    /// Run a parsed command
    pub fn execute(&mut self, command: Command) -> Result<Outcome, SimError> {
        self.execute_at(command, 0)
    }

    fn execute_at(&mut self, command: Command, depth: usize) -> Result<Outcome, SimError> {
        match command {
            Command::Allocate { kind, name, size } => {
                self.allocate(&name, size, kind).map(Outcome::Placed)
            }
            Command::Get { name } => self.get(&name).map(Outcome::Found),
            Command::Load { path } => self.load_nested(&path, depth).map(Outcome::Loaded),
        }
    }

    /// Parse and run one line. Blank and comment lines give `Ok(None)`.
    pub fn execute_line(&mut self, line: &str) -> Result<Option<Outcome>, SimError> {
        match Command::parse(line)? {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    /// Interactive entry point: run `line` and record the result in the console.
    ///
    /// Returns the message for the status bar.
    pub fn submit(&mut self, line: &str) -> String {
        if line.trim().is_empty() {
            return String::new();
        }
        self.console.input(line.trim());

        match self.execute_line(line) {
            Ok(Some(outcome)) => {
                let message = outcome.describe();
                self.console.output(message.clone());
                message
            }
            Ok(None) => String::new(),
            Err(e) => {
                if e.is_fatal() {
                    tracing::error!(error = %e, "tier invariant violated");
                } else {
                    tracing::warn!(error = %e, "command rejected");
                }
                let message = e.to_string();
                self.console.error(message.clone());
                message
            }
        }
    }

    fn clear_highlights(&mut self) {
        self.memory.clear_highlights();
        self.cache.clear_highlights();
    }

    /// Freeze the current state of every tier
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            memory: TierView::of(&self.memory),
            cache: TierView::of(self.cache.table()).with_queue(self.cache.queue().iter().copied()),
            disk: TierView::of(&self.disk),
            stats: self.cache.stats(),
        }
    }

    /// Check every cross-tier invariant, describing the first one that fails
    pub fn check_invariants(&self) -> Result<(), String> {
        for table in [&self.memory, self.cache.table(), &self.disk] {
            for page in table.pages() {
                if !page.is_consistent() {
                    return Err(format!(
                        "{} page {} uses {} of {} bytes but holds {:?}",
                        table.kind().label(),
                        page.id(),
                        page.used(),
                        page.capacity(),
                        page.variables()
                    ));
                }
            }
        }

        for table in [&self.memory, &self.disk] {
            let mut ids: Vec<PageId> = table.pages().iter().map(|p| p.id()).collect();
            ids.sort_unstable();
            if ids != (0..self.config.page_count()).collect::<Vec<_>>() {
                return Err(format!("{} does not hold every page once", table.kind().label()));
            }
        }

        self.cache.verify(&self.memory)?;

        for page in self.memory.pages() {
            if self.cache.is_resident(page.id()) {
                continue;
            }
            let stored = self.disk.lookup(page.id()).map_err(|e| e.to_string())?;
            if stored.variables() != page.variables() {
                return Err(format!("disk copy of page {} is out of date", page.id()));
            }
        }

        Ok(())
    }
}
