//! Tier pane rendering: one column per page table
//!
//! Each page is drawn as a header line with its id, usage and a fill bar,
//! followed by one line per variable it holds:
//!
//! ```text
//! ▸ page   7  12/32  ███░░░░░
//!     x                     4
//!     buf                   8
//! ```
//!
//! The cache column also shows its eviction order above the pages, and a page
//! found by the last `get` is drawn in the highlight color.

use super::utils::{pane_block, usage_bar, visible_height, visible_window};
use crate::snapshot::{PageView, TierView};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

const BAR_WIDTH: usize = 8;

/// Render a tier column
pub fn render_tier_pane(
    frame: &mut Frame,
    area: Rect,
    tier: &TierView,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let used: usize = tier.pages.iter().map(|p| p.used).sum();
    let capacity: usize = tier.pages.iter().map(|p| p.capacity).sum();
    let block = pane_block(
        format!(" {} {}/{} ", tier.kind.label(), used, capacity),
        is_focused,
    );

    let content_width = area.width.saturating_sub(2) as usize;
    let mut all_items = Vec::new();

    if let Some(queue) = &tier.queue {
        all_items.push(ListItem::new(queue_line(queue)));
    }

    for page in &tier.pages {
        push_page(&mut all_items, page, content_width);
    }

    let visible_items = visible_window(all_items, scroll_offset, visible_height(area));
    frame.render_widget(List::new(visible_items).block(block), area);
}

fn queue_line(queue: &[usize]) -> Line<'static> {
    let mut spans = vec![Span::styled("lru ", Style::default().fg(DEFAULT_THEME.comment))];
    for (i, id) in queue.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" → ", Style::default().fg(DEFAULT_THEME.comment)));
        }
        // Front of the queue is the next victim
        let style = if i == 0 {
            Style::default()
                .fg(DEFAULT_THEME.error)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.page_id)
        };
        spans.push(Span::styled(id.to_string(), style));
    }
    Line::from(spans)
}

fn push_page(items: &mut Vec<ListItem<'static>>, page: &PageView, content_width: usize) {
    let (marker, id_style) = if page.highlighted {
        (
            Span::styled(
                "◆ ",
                Style::default()
                    .fg(DEFAULT_THEME.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Style::default()
                .fg(DEFAULT_THEME.highlight)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            Span::styled("▸ ", Style::default().fg(DEFAULT_THEME.secondary)),
            Style::default().fg(DEFAULT_THEME.page_id),
        )
    };

    let (filled, empty) = usage_bar(page.used, page.capacity, BAR_WIDTH);
    items.push(ListItem::new(Line::from(vec![
        marker,
        Span::styled(format!("page {:>3} ", page.id), id_style),
        Span::styled(
            format!("{:>3}/{:<3} ", page.used, page.capacity),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(filled, Style::default().fg(DEFAULT_THEME.usage_full)),
        Span::styled(empty, Style::default().fg(DEFAULT_THEME.usage_free)),
    ])));

    for (name, size) in &page.variables {
        // "    " + name + padding + size, size right-aligned
        let size_str = size.to_string();
        let padding = content_width.saturating_sub(4 + name.len() + size_str.len()).max(1);
        items.push(ListItem::new(Line::from(vec![
            Span::raw("    "),
            Span::styled(name.clone(), Style::default().fg(DEFAULT_THEME.variable)),
            Span::raw(" ".repeat(padding)),
            Span::styled(size_str, Style::default().fg(DEFAULT_THEME.size)),
        ])));
    }
}
