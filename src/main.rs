// memtier: stack/heap, cache and disk memory hierarchy simulator

mod interpreter;
mod memory;
mod snapshot;
mod ui;

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use interpreter::constants::{DEFAULT_ADDRESS_SPACE_SIZE, DEFAULT_CACHE_SIZE, DEFAULT_PAGE_SIZE};
use interpreter::engine::Session;
use memory::MemoryConfig;
use ui::App;

/// Simulate a paged address space with a small LRU cache in front of a disk
#[derive(Debug, Parser)]
#[command(name = "memtier", version, about)]
struct Args {
    /// Size of the simulated address space in bytes
    #[arg(long, default_value_t = DEFAULT_ADDRESS_SPACE_SIZE)]
    address_space: usize,

    /// Page size in bytes; must divide the address space and the cache size
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Cache size in bytes
    #[arg(long, default_value_t = DEFAULT_CACHE_SIZE)]
    cache_size: usize,

    /// Seed for the disk layout (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Command script to run before starting
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print the final state instead of starting the TUI
    #[arg(long)]
    headless: bool,

    /// Write log output to this file
    #[arg(long)]
    log: Option<PathBuf>,
}

fn init_logging(args: &Args) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(path) = &args.log {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if args.headless {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    // Otherwise stderr belongs to the TUI and log events are dropped

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(&args)?;

    let mut config = MemoryConfig::new(args.address_space, args.page_size, args.cache_size);
    config.seed = args.seed;

    let mut session = match Session::new(config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(script) = &args.script {
        match session.load(script) {
            Ok(summary) => {
                eprintln!(
                    "Ran {} command(s) from {}, {} failed.",
                    summary.executed,
                    script.display(),
                    summary.failed
                );
            }
            Err(e) if e.is_fatal() => {
                eprintln!("Fatal error: {}", e);
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                if args.headless {
                    std::process::exit(1);
                }
            }
        }
    }

    if args.headless {
        for line in &session.console().lines {
            println!("{}", line.text);
        }
        println!("{}", session.snapshot());
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
