//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`tier`]: One column per tier (memory, cache, disk) with pages and variables
//! - [`console`]: Command transcript and the input line
//! - [`status`]: Status bar with cache counters and keybindings
//! - `utils`: Shared block, scrolling and usage-bar helpers
//!
//! Every render function takes read-only snapshot data plus a scroll offset it
//! may clamp; none of them touch the session.

mod utils;

pub mod console;
pub mod status;
pub mod tier;

pub use console::{render_console_pane, render_input_line};
pub use status::render_status_bar;
pub use tier::render_tier_pane;
