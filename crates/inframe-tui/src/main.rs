//! Inframe dashboard TUI
//!
//! Terminal interface for browsing and managing the Inframe CMS content

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use inframe_client::DashboardConfig;
use ratatui::prelude::*;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod action;
mod app;
mod config;
mod event;
mod ui;

use app::App;
use event::EventHandler;

/// Inframe dashboard terminal UI
#[derive(Parser, Debug)]
#[command(name = "inframe-tui", version, about)]
struct Args {
    /// Backend URL, overrides the config file
    #[arg(short, long)]
    server: Option<String>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tick rate in milliseconds, overrides the config file
    #[arg(long)]
    tick_rate: Option<u64>,

    /// Enable debug logging to file
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging
    if args.debug {
        let file = std::fs::File::create("inframe-tui.log")?;
        tracing_subscriber::registry()
            .with(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new("inframe_tui=debug,inframe_client=debug")),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(file).with_ansi(false))
            .init();
    }

    let mut config = DashboardConfig::resolve(args.config.as_deref())?;
    if let Some(server) = args.server {
        config.api.base_url = server;
    }
    let tick_rate = Duration::from_millis(args.tick_rate.unwrap_or(config.ui.tick_rate_ms));
    tracing::debug!(base_url = %config.api.base_url, ?tick_rate, "starting");

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let result = run_app(&mut terminal, &mut app, tick_rate).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Run the application main loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> Result<()> {
    let mut events = EventHandler::new(tick_rate);
    events.start();

    // Draw once so the loading state shows while the first screen is fetched
    terminal.draw(|frame| ui::render(frame, app))?;
    app.connect().await;

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        let Some(event) = events.next().await else {
            break;
        };
        let action = match event {
            event::Event::Key(key) => event::key_to_action(key, app.input_mode()),
            event::Event::Resize(_, _) => action::Action::Render,
            event::Event::Tick => action::Action::Tick,
        };
        app.handle_action(action).await;

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
