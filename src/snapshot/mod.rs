// Read-only views of the session for rendering, plus the console log

use crate::memory::{CacheStats, Page, PageId, PageTable, TierKind};
use std::fmt;

/// Kind of a console line, used for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Echo of what the user typed
    Input,
    Output,
    Error,
}

/// A line of console output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleLine {
    pub text: String,
    pub kind: LineKind,
}

/// Command transcript shown under the tiers
#[derive(Debug, Clone, Default)]
pub struct Console {
    pub lines: Vec<ConsoleLine>,
}

impl Console {
    pub fn new() -> Self {
        Console { lines: Vec::new() }
    }

    pub fn push(&mut self, kind: LineKind, text: impl Into<String>) {
        self.lines.push(ConsoleLine {
            text: text.into(),
            kind,
        });
    }

    pub fn input(&mut self, text: &str) {
        self.push(LineKind::Input, format!("> {}", text));
    }

    pub fn output(&mut self, text: impl Into<String>) {
        self.push(LineKind::Output, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(LineKind::Error, text);
    }

    /// Number of error lines recorded so far
    pub fn error_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| line.kind == LineKind::Error)
            .count()
    }
}

/// Frozen state of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub id: PageId,
    pub used: usize,
    pub capacity: usize,
    pub variables: Vec<(String, usize)>,
    pub highlighted: bool,
}

impl From<&Page> for PageView {
    fn from(page: &Page) -> Self {
        PageView {
            id: page.id(),
            used: page.used(),
            capacity: page.capacity(),
            variables: page
                .variables()
                .iter()
                .map(|v| (v.name().to_string(), v.size()))
                .collect(),
            highlighted: page.highlighted,
        }
    }
}

/// Frozen state of one tier, pages in table order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierView {
    pub kind: TierKind,
    pub pages: Vec<PageView>,
    /// Eviction order, least recently used first (cache only)
    pub queue: Option<Vec<PageId>>,
}

impl TierView {
    pub fn of(table: &PageTable) -> Self {
        TierView {
            kind: table.kind(),
            pages: table.pages().iter().map(PageView::from).collect(),
            queue: None,
        }
    }

    pub fn with_queue(mut self, queue: impl IntoIterator<Item = PageId>) -> Self {
        self.queue = Some(queue.into_iter().collect());
        self
    }

    pub fn page(&self, id: PageId) -> Option<&PageView> {
        self.pages.iter().find(|p| p.id == id)
    }
}

/// Everything the renderer needs after a command
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub memory: TierView,
    pub cache: TierView,
    pub disk: TierView,
    pub stats: CacheStats,
}

impl SessionSnapshot {
    pub fn tiers(&self) -> [&TierView; 3] {
        [&self.memory, &self.cache, &self.disk]
    }
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for tier in self.tiers() {
            writeln!(f, "== {} ==", tier.kind.label())?;
            if let Some(queue) = &tier.queue {
                let order: Vec<String> = queue.iter().map(|id| id.to_string()).collect();
                writeln!(f, "lru: {}", order.join(" -> "))?;
            }
            for page in &tier.pages {
                let marker = if page.highlighted { "*" } else { " " };
                write!(f, "{}page {:>3} {:>4}/{:<4}", marker, page.id, page.used, page.capacity)?;
                let vars: Vec<String> = page
                    .variables
                    .iter()
                    .map(|(name, size)| format!("{}:{}", name, size))
                    .collect();
                if !vars.is_empty() {
                    write!(f, " {}", vars.join(" "))?;
                }
                writeln!(f)?;
            }
        }
        write!(
            f,
            "hits {} misses {} evictions {} flushes {}",
            self.stats.hits, self.stats.misses, self.stats.evictions, self.stats.flushes
        )
    }
}
