// Window view module: drag, lifecycle and sizing of one floating window
#[path = "windowView/mod.rs"]
pub mod window_view;

// Window registry: open/minimized flags and focus order
pub mod state;

pub mod config;
pub mod content;
pub mod desktop;
pub mod dock;
pub mod error;
pub mod logging;
pub mod reveal;
pub mod ui;

use std::io::{stdout, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use config::DesktopConfig;
use desktop::Desktop;
pub use error::{Error, Result};

/// How long the loop waits for input before advancing timers
const TICK_RATE: Duration = Duration::from_millis(50);

const TARGET: &str = "cypher_desktop";

/// Entry point: `cypher-desktop [CONFIG.json]`
pub fn run() -> Result<()> {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let config = DesktopConfig::resolve(explicit)?;

    let log_path = config
        .log_file
        .clone()
        .unwrap_or_else(logging::default_log_path);
    if let Err(e) = logging::init(&log_path) {
        eprintln!("[LOG] Logging disabled: {e}");
    }

    let mut terminal = ratatui::init();
    // Mouse drag and focus-lost notifications drive the window views
    let setup = execute!(stdout(), EnableMouseCapture, EnableFocusChange);
    let result = match setup {
        Ok(()) => run_loop(&mut terminal, config),
        Err(e) => Err(e.into()),
    };

    if let Err(e) = release_terminal(&mut stdout()) {
        tracing::warn!(target: TARGET, error = %e, "failed to release terminal modes");
    }
    ratatui::restore();

    if let Err(e) = &result {
        tracing::error!(target: TARGET, error = %e, "desktop exited with error");
    }
    result
}

/// Undo the modes enabled for mouse capture and focus reports
fn release_terminal(out: &mut impl Write) -> std::io::Result<()> {
    execute!(out, DisableMouseCapture, DisableFocusChange)
}

fn run_loop(terminal: &mut DefaultTerminal, config: DesktopConfig) -> Result<()> {
    let mut desktop = Desktop::new(config, terminal.get_frame().area());
    let mut last_tick = Instant::now();

    tracing::info!(target: TARGET, "event loop started");

    while !desktop.should_quit() {
        terminal.draw(|frame| ui::draw(frame, &desktop))?;

        let timeout = TICK_RATE.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            desktop.handle_event(&event::read()?);
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= TICK_RATE {
            desktop.tick(elapsed);
            last_tick = Instant::now();
        }
    }

    tracing::info!(target: TARGET, "quit requested");
    Ok(())
}
