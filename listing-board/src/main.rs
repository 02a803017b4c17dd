//! Listing board TUI
//!
//! # Usage
//!
//! ```sh
//! cargo run -p listing-board
//!
//! # Slow load, generated ids, logs in a file
//! cargo run -p listing-board -- --load-delay-ms 2000 --unique-ids --log-file board.log --debug
//! ```

use std::cell::RefCell;
use std::io;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use listing_core::{Component, DispatchRuntime, EventOutcome, Keybindings};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::info;

use listing_board::components::{Page, PageProps};
use listing_board::config::init_logging;
use listing_board::{Action, Args, Config, ListingStore, keymap};

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    // Validate before entering TUI mode
    let config = match Config::try_from(args).and_then(|config| {
        init_logging(&config)?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    info!(?config, "Starting listing board");

    // ===== Terminal setup =====
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &config).await;

    // ===== Cleanup =====
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &Config,
) -> io::Result<()> {
    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let mut store = ListingStore::new(config, action_tx.clone());
    store.mount();

    let mut runtime = DispatchRuntime::from_parts(store, action_tx, action_rx);
    let keybindings: Keybindings = keymap::default_keybindings();
    let page = RefCell::new(Page::new());

    runtime
        .run(
            terminal,
            |frame, area, state| {
                page.borrow_mut().render(
                    frame,
                    area,
                    PageProps {
                        state,
                        keybindings: &keybindings,
                    },
                );
            },
            |event, state| {
                EventOutcome::from_actions(page.borrow_mut().handle_event(
                    event,
                    PageProps {
                        state,
                        keybindings: &keybindings,
                    },
                ))
            },
            |action| matches!(action, Action::Quit),
        )
        .await?;

    let stats = page.borrow().table.row_stats();
    info!(hits = stats.hits, misses = stats.misses, "Row cache at exit");
    Ok(())
}
