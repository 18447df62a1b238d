// Poll-and-replace semantics against a live feed.

use leadpulse::client::poll_once;
use leadpulse::config::{Config, SourceSettings};
use leadpulse::server::FeedServer;
use leadpulse::tui::state::DashState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

#[tokio::test(flavor = "multi_thread")]
async fn failed_poll_keeps_previous_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local_leads.json");
    std::fs::write(&path, r#"[{"lead_id":"L-1","status":"SENT"}]"#).unwrap();

    let mut config = Config::default();
    config.server.local_leads_path = path;
    let server = FeedServer::bind(
        "127.0.0.1:0",
        Arc::new(config),
        Arc::new(SourceSettings::default()),
        tokio::runtime::Handle::current(),
    )
    .unwrap();
    let url = format!("http://{}/api/leads", server.addr().unwrap());
    std::thread::spawn(move || server.serve());

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let (state_tx, state_rx) = watch::channel(DashState::new());

    poll_once(&client, &url, &state_tx).await;
    {
        let state = state_rx.borrow();
        assert_eq!(state.leads.len(), 1);
        assert_eq!(state.poll_failures, 0);
    }

    // Second poll fails (nothing listens there); the snapshot must survive.
    poll_once(&client, "http://127.0.0.1:9/api/leads", &state_tx).await;
    let state = state_rx.borrow();
    assert_eq!(state.leads.len(), 1);
    assert_eq!(state.leads[0].lead_id.as_deref(), Some("L-1"));
    assert_eq!(state.poll_failures, 1);
    assert!(state.is_stale());
}
