//! Main TUI application state and logic

use crate::interpreter::engine::Session;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Memory,
    Cache,
    Disk,
    Console,
}

impl FocusedPane {
    /// Move focus to the next pane (left to right, then the console)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Memory => FocusedPane::Cache,
            FocusedPane::Cache => FocusedPane::Disk,
            FocusedPane::Disk => FocusedPane::Console,
            FocusedPane::Console => FocusedPane::Memory,
        }
    }

    /// Move focus to the previous pane
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Memory => FocusedPane::Console,
            FocusedPane::Cache => FocusedPane::Memory,
            FocusedPane::Disk => FocusedPane::Cache,
            FocusedPane::Console => FocusedPane::Disk,
        }
    }
}

/// The main application state
pub struct App {
    /// The simulation being driven
    pub session: Session,

    /// Text typed on the input line
    pub input: String,

    /// Submitted lines, oldest first
    pub history: Vec<String>,

    /// Position while browsing history with Up/Down (None = editing a new line)
    pub history_index: Option<usize>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub memory_scroll: usize,
    pub cache_scroll: usize,
    pub disk_scroll: usize,
    pub console_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether the status message reports a failure
    pub status_is_error: bool,
}

impl App {
    /// Create a new app around an existing session
    pub fn new(session: Session) -> Self {
        App {
            session,
            input: String::new(),
            history: Vec::new(),
            history_index: None,
            focused_pane: FocusedPane::Console,
            memory_scroll: 0,
            cache_scroll: 0,
            disk_scroll: 0,
            console_scroll: usize::MAX,
            should_quit: false,
            status_message: String::from("Ready!"),
            status_is_error: false,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let snapshot = self.session.snapshot();
        let size = frame.area();

        // Tiers on top, console + input below, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(65),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(36),
                Constraint::Percentage(28),
                Constraint::Percentage(36),
            ])
            .split(main_chunks[0]);

        super::panes::render_tier_pane(
            frame,
            columns[0],
            &snapshot.memory,
            self.focused_pane == FocusedPane::Memory,
            &mut self.memory_scroll,
        );
        super::panes::render_tier_pane(
            frame,
            columns[1],
            &snapshot.cache,
            self.focused_pane == FocusedPane::Cache,
            &mut self.cache_scroll,
        );
        super::panes::render_tier_pane(
            frame,
            columns[2],
            &snapshot.disk,
            self.focused_pane == FocusedPane::Disk,
            &mut self.disk_scroll,
        );

        super::panes::render_console_pane(
            frame,
            main_chunks[1],
            self.session.console(),
            self.focused_pane == FocusedPane::Console,
            &mut self.console_scroll,
        );

        super::panes::render_input_line(frame, main_chunks[2], &self.input);

        super::panes::render_status_bar(
            frame,
            main_chunks[3],
            &self.status_message,
            self.status_is_error,
            snapshot.stats,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.history_index = None;
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => self.recall_older(),
            KeyCode::Down => self.recall_newer(),
            KeyCode::PageUp => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(5);
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Memory => &mut self.memory_scroll,
            FocusedPane::Cache => &mut self.cache_scroll,
            FocusedPane::Disk => &mut self.disk_scroll,
            FocusedPane::Console => &mut self.console_scroll,
        }
    }

    /// Run the typed line against the session
    fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.history_index = None;
        if line.trim().is_empty() {
            return;
        }

        let errors_before = self.session.console().error_count();
        let message = self.session.submit(&line);
        self.status_is_error = self.session.console().error_count() > errors_before;
        self.status_message = if message.is_empty() {
            "Ready!".to_string()
        } else {
            message
        };

        self.history.push(line);
        // Auto-scroll console to bottom
        self.console_scroll = usize::MAX;
    }

    fn recall_older(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let index = match self.history_index {
            Some(i) => i.saturating_sub(1),
            None => self.history.len() - 1,
        };
        self.history_index = Some(index);
        self.input = self.history[index].clone();
    }

    fn recall_newer(&mut self) {
        match self.history_index {
            Some(i) if i + 1 < self.history.len() => {
                self.history_index = Some(i + 1);
                self.input = self.history[i + 1].clone();
            }
            Some(_) => {
                self.history_index = None;
                self.input.clear();
            }
            None => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryConfig;

    fn app() -> App {
        App::new(Session::new(MemoryConfig::default().with_seed(3)).unwrap())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_line(app: &mut App, line: &str) {
        for c in line.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_enter_runs_command() {
        let mut app = app();
        type_line(&mut app, "stack x 4");

        assert!(app.input.is_empty());
        assert!(app.status_message.starts_with("placed x"));
        assert!(!app.status_is_error);
        assert_eq!(app.history, vec!["stack x 4".to_string()]);
    }

    #[test]
    fn test_error_sets_flag() {
        let mut app = app();
        type_line(&mut app, "get nothing");
        assert!(app.status_is_error);
        assert_eq!(app.status_message, "Variable 'nothing' not found");
    }

    #[test]
    fn test_history_navigation() {
        let mut app = app();
        type_line(&mut app, "stack a 1");
        type_line(&mut app, "stack b 1");

        press(&mut app, KeyCode::Up);
        assert_eq!(app.input, "stack b 1");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.input, "stack a 1");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.input, "stack a 1");
        press(&mut app, KeyCode::Down);
        assert_eq!(app.input, "stack b 1");
        press(&mut app, KeyCode::Down);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_focus_cycle_and_quit() {
        let mut app = app();
        assert_eq!(app.focused_pane, FocusedPane::Console);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Memory);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_pane, FocusedPane::Console);

        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
