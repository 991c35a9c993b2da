// ABOUTME: Main entry point for the notify-panel TUI application

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, Terminal};
use std::{
    io,
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};
use tracing::{error, info};

use notify_panel::api::HttpNotificationApi;
use notify_panel::app::{App, EventHandler};
use notify_panel::components::LayoutComponent;
use notify_panel::config::PanelConfig;

#[derive(Debug, Parser)]
#[command(name = "notify-panel", version, about = "Terminal admin panel for managing notifications")]
struct Args {
    /// Base URL of the notifications API, e.g. http://localhost:3000/api
    #[arg(long, env = "NOTIFY_PANEL_API_URL")]
    api_url: Option<String>,

    /// Bearer token sent with every request
    #[arg(long, env = "NOTIFY_PANEL_TOKEN")]
    token: Option<String>,

    /// Path to the config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Before the config load, so writing a default config file is recorded
    setup_logging()?;
    setup_panic_handler();

    let mut config = PanelConfig::load(args.config.as_deref()).context("Failed to load config")?;
    if let Some(api_url) = args.api_url {
        config.api.base_url = api_url;
    }
    if let Some(token) = args.token {
        config.api.token = Some(token);
    }

    info!("Starting notify-panel against {}", config.api.base_url);
    let api = HttpNotificationApi::new(&config.api).context("Failed to build API client")?;

    let mut app = App::new(Arc::new(api), &config);
    app.init();
    let mut layout = LayoutComponent::new();

    run_tui(&mut app, &mut layout)?;

    info!("notify-panel exited");
    Ok(())
}

fn run_tui(app: &mut App, layout: &mut LayoutComponent) -> Result<()> {
    if let Err(e) = crossterm::terminal::is_raw_mode_enabled() {
        eprintln!("Cannot check terminal raw mode: {}", e);
        return Err(anyhow::anyhow!("Terminal not compatible: {}", e));
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            layout.render(frame, &app.state);
        })?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if crossterm::event::poll(timeout)? {
            let app_event = match event::read()? {
                Event::Key(key_event) => EventHandler::handle_key_event(key_event, &mut app.state),
                Event::Mouse(mouse_event) => {
                    let modal = LayoutComponent::dismissable_modal_area(terminal.size()?, &app.state);
                    EventHandler::handle_mouse_event(mouse_event, modal)
                }
                _ => None,
            };
            if let Some(app_event) = app_event {
                EventHandler::process_event(app_event, &mut app.state);
            }
        }

        // Key presses that queue an API call shouldn't wait for the next tick
        if last_tick.elapsed() >= tick_rate || app.state.pending_async_action.is_some() {
            app.tick();
            last_tick = Instant::now();
        }

        if app.state.should_quit {
            break;
        }
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

fn setup_logging() -> Result<()> {
    use std::fs::OpenOptions;
    use tracing_subscriber::prelude::*;

    let log_dir = dirs::data_local_dir()
        .map(|dir| dir.join("notify-panel").join("logs"))
        .unwrap_or_else(|| PathBuf::from(".notify-panel/logs"));

    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let log_file = log_dir.join(format!(
        "notify-panel-{}.log",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    ));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(file)
                .with_ansi(false),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notify_panel=info".into()),
        )
        .init();

    Ok(())
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        // Ensure terminal is restored before logging the panic
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stderr(), LeaveAlternateScreen, DisableMouseCapture);

        error!("Application panicked: {}", panic_info);
        eprintln!("Application panicked: {}", panic_info);
        eprintln!("Please check the logs for more details.");
    }));
}
