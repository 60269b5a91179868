//! diff-explore - a terminal browser for git history.

use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use diff_explore::config::{config_dir, Config};
use diff_explore::core::{GitHistory, HistoryProvider, RepoRoot, RepoWatcher};
use diff_explore::theme::Theme;
use diff_explore::ui::{handle_input, render, App, AppEvent, EventBus, InputPump};

/// Browse git history, changed files and live diffs in the terminal.
#[derive(Parser, Debug)]
#[command(name = "diff-explore", version, about)]
struct Cli {
    /// Repository to open (defaults to the current directory)
    #[arg(value_name = "REPO")]
    repo: Option<PathBuf>,
}

/// RAII guard for terminal state. Restores terminal on drop (including panic).
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
    let _ = disable_raw_mode();
    let _ = io::stdout().flush();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging();
    diff_explore::metrics::init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Log to a file when DIFF_EXPLORE_LOG is set; the terminal belongs to the UI.
fn init_logging() {
    let Ok(filter) = std::env::var("DIFF_EXPLORE_LOG") else {
        return;
    };

    let path = std::env::var_os("DIFF_EXPLORE_LOG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| config_dir().join("diff-explore.log"));
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", path.display(), e);
            return;
        }
    };

    env_logger::Builder::new()
        .parse_filters(&filter)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

/// Run the TUI application.
fn run(cli: Cli) -> Result<()> {
    let start = match cli.repo {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let repo = RepoRoot::discover(&start)
        .with_context(|| format!("cannot open repository at {}", start.display()))?;
    log::info!("opened {}", repo.path().display());

    let config = Config::load();
    let theme = Theme::load(&config.theme, &Config::themes_dir());
    let mut app = App::new(GitHistory::new(repo.clone()), config.diff_options(), theme)?;

    // Set panic hook to ensure terminal cleanup
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));

    // Setup terminal with RAII guard
    let _guard = TerminalGuard::new().context("failed to initialize terminal")?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).context("failed to initialize terminal")?;
    let size = terminal.size()?;
    app.resize(size.width, size.height);

    let bus = EventBus::new();
    let _watcher = match RepoWatcher::new(&repo, config.debounce(), bus.sender().watch_sink()) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            app.watcher_failed(&e.to_string());
            None
        }
    };
    let _input = InputPump::spawn(bus.sender());

    run_loop(&mut terminal, &mut app, &bus)
}

fn run_loop<B: Backend, H: HistoryProvider>(
    terminal: &mut Terminal<B>,
    app: &mut App<H>,
    bus: &EventBus,
) -> Result<()> {
    loop {
        // Only redraw if dirty
        if app.take_dirty() {
            terminal.draw(|frame| render(frame, &*app))?;
        }

        let Some(event) = bus.recv() else {
            return Ok(());
        };
        dispatch(app, event)?;

        // Apply everything already queued before drawing again
        while !app.should_quit {
            let Some(event) = bus.try_recv() else {
                break;
            };
            dispatch(app, event)?;
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn dispatch<H: HistoryProvider>(app: &mut App<H>, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Input(event) => {
            handle_input(app, event);
        }
        AppEvent::Watch(event) => app.handle_watch_event(event),
        AppEvent::InputFailed(message) => {
            return Err(anyhow!("terminal input failed: {}", message));
        }
    }
    Ok(())
}
