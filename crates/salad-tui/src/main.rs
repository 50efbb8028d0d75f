mod app;
mod config;
mod layout;
mod library;
mod render;
mod storage;
mod theme;

use anyhow::Context;
use app::App;
use clap::Parser;
use config::{Args, Config};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use library::Library;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use storage::StoreBackend;
use tracing_subscriber::EnvFilter;

/// Log file inside the data directory
const LOG_FILE: &str = "newsalad.log";

fn main() -> anyhow::Result<()> {
    let config = Config::from_args(Args::parse());
    init_tracing(&config.data_dir);

    let library = Library::new(&config.puzzle_dir);

    if config.list_only {
        let ids = library.ids().context("listing puzzles")?;
        for id in ids {
            println!("{}", id);
        }
        return Ok(());
    }

    let store = StoreBackend::for_environment(config.environment, &config.data_dir);
    let mut app = App::new(library, store, config.namespace.clone(), config.data_dir.clone());
    app.start(&config.start)
        .with_context(|| format!("opening {:?}", config.start))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    // Stop the clock before the process exits
    if let Some(session) = app.session.as_mut() {
        session.end();
    }

    result.context("terminal error")
}

/// The terminal is in raw mode while playing, so logs go to a file. Logging
/// is skipped when the file cannot be opened.
fn init_tracing(data_dir: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file = std::fs::create_dir_all(data_dir).and_then(|_| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join(LOG_FILE))
    });

    if let Ok(file) = file {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(true)
            .try_init();
    }
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, app)?;
        stdout.flush()?;

        // Handle input until the next tick
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Handle Ctrl+C
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }

                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        // Tick message and clock
        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
