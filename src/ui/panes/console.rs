//! Console pane rendering: command transcript and the input line

use super::utils::{pane_block, visible_height, visible_window};
use crate::snapshot::{Console, LineKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the console transcript
pub fn render_console_pane(
    frame: &mut Frame,
    area: Rect,
    console: &Console,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" Console ".to_string(), is_focused);

    if console.lines.is_empty() {
        let paragraph = Paragraph::new("(type a command: stack NAME SIZE | heap NAME SIZE | get NAME | load FILE)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = console
        .lines
        .iter()
        .map(|line| {
            let style = match line.kind {
                LineKind::Input => Style::default().fg(DEFAULT_THEME.primary),
                LineKind::Output => Style::default().fg(DEFAULT_THEME.fg),
                LineKind::Error => Style::default().fg(DEFAULT_THEME.error),
            };
            ListItem::new(line.text.as_str()).style(style)
        })
        .collect();

    let visible_items = visible_window(all_items, scroll_offset, visible_height(area));
    frame.render_widget(List::new(visible_items).block(block), area);
}

/// Render the single-line command input and place the cursor at its end
pub fn render_input_line(frame: &mut Frame, area: Rect, input: &str) {
    let prompt = "memtier> ";
    let line = Line::from(vec![
        Span::styled(
            prompt,
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(input, Style::default().fg(DEFAULT_THEME.fg)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let cursor_x = area
        .x
        .saturating_add((prompt.len() + input.chars().count()) as u16)
        .min(area.right().saturating_sub(1));
    frame.set_cursor_position(Position::new(cursor_x, area.y));
}
