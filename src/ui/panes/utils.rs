//! Helpers shared by the panes

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, ListItem},
};

/// Bordered block with the focus color applied
pub(crate) fn pane_block(title: String, is_focused: bool) -> Block<'static> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows available inside a bordered pane (at least 1)
pub(crate) fn visible_height(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Clamp `offset` so the window never runs past the last item, then return
/// the visible slice.
pub(crate) fn visible_window<'a>(
    items: Vec<ListItem<'a>>,
    offset: &mut usize,
    height: usize,
) -> Vec<ListItem<'a>> {
    let total = items.len();
    if total > height {
        *offset = (*offset).min(total - height);
    } else {
        *offset = 0;
    }

    items.into_iter().skip(*offset).take(height).collect()
}

/// Text bar like `████░░░░` showing `used` out of `capacity`
pub(crate) fn usage_bar(used: usize, capacity: usize, width: usize) -> (String, String) {
    if capacity == 0 || width == 0 {
        return (String::new(), String::new());
    }
    let filled = (used * width).div_ceil(capacity).min(width);
    ("█".repeat(filled), "░".repeat(width - filled))
}
