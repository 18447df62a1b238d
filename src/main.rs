use anyhow::Result;
use leadpulse::client;
use leadpulse::config::{Config, SourceSettings};
use leadpulse::server::FeedServer;
use leadpulse::source::SourceMode;
use leadpulse::tui::{self, state::DashState};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

#[tokio::main]
async fn main() -> Result<()> {
    // Log to a file; the TUI owns the terminal.
    let log_file = std::fs::File::create("leadpulse.log")?;
    tracing_subscriber::fmt()
        .with_env_filter("leadpulse=info")
        .with_writer(log_file)
        .init();

    let headless = std::env::args().any(|arg| arg == "--headless");

    // Load saved settings from .env (real env vars take precedence)
    Config::load_env_file();
    let config = Arc::new(Config::load(Path::new("config.toml"))?);
    let settings = Arc::new(SourceSettings::from_env());

    tracing::info!(
        mode = ?SourceMode::active(&settings),
        port = config.server.port,
        "starting feed service"
    );

    let handle = tokio::runtime::Handle::current();
    let addr = format!("0.0.0.0:{}", config.server.port);
    let server = FeedServer::bind(&addr, config.clone(), settings, handle)?;
    std::thread::spawn(move || server.serve());

    if headless {
        println!(
            "leadpulse feed on http://127.0.0.1:{}/api/leads (ctrl-c to stop)",
            config.server.port
        );
        tokio::signal::ctrl_c().await?;
        return Ok(());
    }

    let (state_tx, state_rx) = watch::channel(DashState::new());
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let feed_url = format!("http://127.0.0.1:{}/api/leads", config.server.port);
    tokio::spawn(client::poll_loop(feed_url, state_tx, cmd_rx));

    tui::run_tui(state_rx, cmd_tx).await
}
