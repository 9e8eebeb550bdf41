use clap::Parser;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use roskis::config::{DEFAULT_BOXES, DEFAULT_MAX_NUMBER};
use roskis::tui::{app::AppState, controller};
use ratatui::prelude::*;
use std::io::{self, IsTerminal, Stdout};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Roskis: slot random numbers into increasing boxes, trash the ones that fit nowhere.
#[derive(Parser, Debug)]
#[command(name = "roskis", version, about, long_about = None)]
struct Cli {
    /// Number of boxes (5-10)
    #[arg(short, long, default_value_t = DEFAULT_BOXES)]
    boxes: usize,

    /// Largest number that can be drawn (boxes-999)
    #[arg(short, long, default_value_t = DEFAULT_MAX_NUMBER)]
    max: u16,

    /// Seed for reproducible draws
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where to write logs (RUST_LOG controls the level)
    #[arg(long, default_value = "roskis.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> io::Result<()> {
    let log_file = std::fs::File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();
    Ok(())
}

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), crossterm::terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    if !io::stdout().is_terminal() {
        println!(
            "roskis TUI requires a real terminal (TTY).\nRun in Terminal and press q to quit. Version: {}",
            roskis::VERSION
        );
        return Ok(());
    }
    if let Err(err) = init_logging(&cli.log_file) {
        eprintln!("logging disabled: {err}");
    }
    info!(boxes = cli.boxes, max = cli.max, seed = ?cli.seed, "starting roskis");

    let mut terminal = setup_terminal()?;
    let tick_rate = Duration::from_millis(50);
    let mut app = AppState::with_settings(cli.boxes, cli.max, cli.seed);

    let res = controller::run(&mut terminal, &mut app, tick_rate);

    // Always attempt to restore terminal
    restore_terminal(terminal)?;
    res
}
