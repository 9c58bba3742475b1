mod app;
mod cli;
mod fetcher;
mod render;
mod theme;

use anyhow::Context;
use app::{App, AppAction, AppEvent};
use clap::Parser;
use cli::Cli;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crossword_core::{spawn_timer, PuzzleId};
use fetcher::PuzzleDirectory;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;
use theme::Theme;
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// How long the input thread blocks before checking for shutdown
const INPUT_POLL: Duration = Duration::from_millis(100);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli.log_file())?;
    tracing::info!(puzzle = %cli.puzzle, dir = %cli.puzzle_dir().display(), "starting");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Run the app
    let result = run_app(&mut stdout, &cli).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(ref e) = result {
        tracing::error!(error = ?e, "exiting with error");
    }
    result
}

/// Log to a file; the terminal belongs to the grid
fn init_logging(path: &Path) -> anyhow::Result<WorkerGuard> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))?;

    Ok(guard)
}

async fn run_app(stdout: &mut io::Stdout, cli: &Cli) -> anyhow::Result<()> {
    let (events_tx, mut events) = mpsc::unbounded_channel();
    let (timer, _timer_task) = spawn_timer(events_tx.clone());
    spawn_input_thread(events_tx.clone());

    let theme = if cli.light { Theme::light() } else { Theme::dark() };
    let mut app = App::new(
        PuzzleId::new(cli.puzzle.clone()),
        PuzzleDirectory::new(cli.puzzle_dir()),
        events_tx,
        timer,
        theme,
    );
    app.fetch();

    loop {
        render::render(stdout, &mut app)?;
        stdout.flush()?;

        let Some(event) = events.recv().await else {
            break;
        };
        match app.handle(event) {
            AppAction::Continue => {}
            AppAction::Quit => break,
        }
    }

    Ok(())
}

/// Forward terminal input onto the event queue
///
/// crossterm reads block, so this runs on a plain thread rather than a task.
fn spawn_input_thread(events: UnboundedSender<AppEvent>) {
    std::thread::spawn(move || {
        while !events.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(true) => match event::read() {
                    Ok(input) => {
                        if events.send(AppEvent::Input(input)).is_err() {
                            break;
                        }
                    }
                    Err(err) => {
                        tracing::error!(%err, "failed to read terminal input");
                        break;
                    }
                },
                Ok(false) => {}
                Err(err) => {
                    tracing::error!(%err, "failed to poll terminal input");
                    break;
                }
            }
        }
    });
}
