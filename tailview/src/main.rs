mod app;
mod config;
mod filter;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(
    name = "tailview",
    version,
    about = "Follow a growing log file in the terminal",
    long_about = "tailview tails a log file into a scrollable, filterable view.\n\n\
                  The file may not exist yet; it is picked up when it appears. \
                  Rotation and truncation reset the view to the rewritten content."
)]
struct Cli {
    /// Log file to follow
    path: PathBuf,

    /// Poll timer interval in milliseconds (filesystem notifications fire sooner)
    #[arg(long, default_value_t = 100)]
    interval_ms: u64,

    /// Show only lines containing this text (case-insensitive); overrides the saved setting
    #[arg(long)]
    filter: Option<String>,

    /// Hide lines containing any of these semicolon-separated terms; overrides the saved setting
    #[arg(long)]
    exclude: Option<String>,

    /// Strip this prefix from displayed lines; overrides the saved setting
    #[arg(long)]
    strip_prefix: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let settings_path = config::settings_path();
    let mut settings = config::load(&settings_path);
    if let Some(filter) = cli.filter {
        settings.filter = filter;
    }
    if let Some(exclude) = cli.exclude {
        settings.exclude = exclude;
    }
    if let Some(prefix) = cli.strip_prefix {
        settings.strip_prefix = prefix;
    }

    let interval = Duration::from_millis(cli.interval_ms.max(10));
    let mut app = app::App::new(cli.path, interval, settings, settings_path);
    app.start();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.save_settings();
    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut app::App) -> Result<()> {
    let tick = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                // Ctrl-C always quits, whatever mode we are in.
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }
                if app.handle_key(key) {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= tick {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}
