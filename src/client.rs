use crate::lead::Lead;
use crate::tui::state::DashState;
use crate::tui::TuiCommand;
use anyhow::{Context, Result};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

/// Fixed polling cadence. Not configurable from outside the client.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);

pub async fn fetch_leads(client: &reqwest::Client, url: &str) -> Result<Vec<Lead>> {
    let resp = client.get(url).send().await.context("feed request failed")?;
    let status = resp.status();
    if !status.is_success() {
        anyhow::bail!("feed returned {}", status);
    }
    resp.json().await.context("failed to parse feed response")
}

/// Poll the feed on a fixed interval, publishing each successful snapshot
/// wholesale. A single timer drives sequential, non-overlapping attempts;
/// failures keep the previous snapshot (silent staleness, no retry backoff).
pub async fn poll_loop(
    url: String,
    state_tx: watch::Sender<DashState>,
    mut cmd_rx: mpsc::Receiver<TuiCommand>,
) {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("failed to build HTTP client");

    let mut interval = tokio::time::interval(POLL_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        // First tick fires immediately: one read on mount, then every 10s.
        tokio::select! {
            _ = interval.tick() => {}
            cmd = cmd_rx.recv() => match cmd {
                Some(TuiCommand::Refresh) => interval.reset(),
                Some(TuiCommand::Quit) | None => return,
            }
        }
        poll_once(&client, &url, &state_tx).await;
    }
}

pub async fn poll_once(client: &reqwest::Client, url: &str, state_tx: &watch::Sender<DashState>) {
    match fetch_leads(client, url).await {
        Ok(leads) => {
            state_tx.send_modify(|state| state.replace_snapshot(leads));
        }
        Err(e) => {
            tracing::warn!(error = %format!("{:#}", e), "poll failed, keeping previous snapshot");
            state_tx.send_modify(|state| state.poll_failed(format!("poll failed: {:#}", e)));
        }
    }
}
