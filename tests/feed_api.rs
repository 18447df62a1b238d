// End-to-end tests for the read endpoint over a real listener, local mode.

use leadpulse::config::{Config, SourceSettings};
use leadpulse::server::FeedServer;
use std::path::PathBuf;
use std::sync::Arc;

/// Bind on an ephemeral port, serve on a background thread, return the base URL.
fn spawn_server(local_leads_path: PathBuf) -> String {
    let mut config = Config::default();
    config.server.local_leads_path = local_leads_path;

    let server = FeedServer::bind(
        "127.0.0.1:0",
        Arc::new(config),
        Arc::new(SourceSettings::default()),
        tokio::runtime::Handle::current(),
    )
    .expect("bind feed server");
    let addr = server.addr().expect("listener address");
    std::thread::spawn(move || server.serve());
    format!("http://{}", addr)
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_fallback_file_yields_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_server(dir.path().join("local_leads.json"));

    let resp = reqwest::get(format!("{}/api/leads", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let leads: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert!(leads.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_fallback_file_yields_empty_array_not_500() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local_leads.json");
    std::fs::write(&path, "{ definitely not json").unwrap();
    let base = spawn_server(path);

    let resp = reqwest::get(format!("{}/api/leads", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let leads: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert!(leads.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn populated_fallback_file_is_served_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local_leads.json");
    std::fs::write(
        &path,
        r#"[
            {"lead_id":"L-1","first_name":"Ada","last_name":"Lovelace","status":"SENT","email_subject":"Quick question","email_body":"Hi Ada,"},
            {"lead_id":"L-2","company_name":"Acme"}
        ]"#,
    )
    .unwrap();
    let base = spawn_server(path);

    let resp = reqwest::get(format!("{}/api/leads", base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json"
    );

    let leads: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert_eq!(leads.len(), 2);
    assert_eq!(leads[0]["lead_id"], "L-1");
    assert_eq!(leads[0]["email_subject"], "Quick question");
    assert_eq!(leads[1]["company_name"], "Acme");
    // Local records carry no remote provenance.
    assert!(leads[1].get("row_index").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn cors_header_is_present() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_server(dir.path().join("local_leads.json"));

    let resp = reqwest::get(format!("{}/api/leads", base)).await.unwrap();
    assert_eq!(
        resp.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_path_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let base = spawn_server(dir.path().join("local_leads.json"));

    let resp = reqwest::get(format!("{}/api/unknown", base)).await.unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test(flavor = "multi_thread")]
async fn fallback_file_changes_take_effect_per_request() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local_leads.json");
    let base = spawn_server(path.clone());

    let resp = reqwest::get(format!("{}/api/leads", base)).await.unwrap();
    let leads: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert!(leads.is_empty());

    // No caching layer: the next request sees the file that now exists.
    std::fs::write(&path, r#"[{"lead_id":"L-1"}]"#).unwrap();
    let resp = reqwest::get(format!("{}/api/leads", base)).await.unwrap();
    let leads: Vec<serde_json::Value> = resp.json().await.unwrap();
    assert_eq!(leads.len(), 1);
}
