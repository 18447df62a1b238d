pub mod auth;
pub mod local;
pub mod sheets;

use crate::config::{Config, SourceSettings};
use crate::lead::Lead;
use async_trait::async_trait;
use auth::TokenCache;
use local::LocalSource;
use sheets::SheetsSource;
use std::sync::Arc;
use thiserror::Error;

/// Local fallback file problems. The feed service collapses all of these to
/// an empty result, but the variants let it log "absent" and "malformed"
/// distinctly instead of conflating them.
#[derive(Debug, Error)]
pub enum LocalReadError {
    #[error("local leads file not found")]
    Missing,
    #[error("failed to read local leads file: {0}")]
    Unreadable(#[from] std::io::Error),
    #[error("local leads file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Remote authentication or range-fetch failure. Surfaced to the API caller
/// as a generic 500; the detail stays in the server log.
#[derive(Debug, Error)]
pub enum SourceFetchError {
    #[error("failed to load service credentials: {0}")]
    Credentials(String),
    #[error("token exchange failed: {0}")]
    Auth(String),
    #[error("range fetch failed ({status}): {body}")]
    Fetch { status: u16, body: String },
    #[error("remote request failed: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Local(#[from] LocalReadError),
    #[error(transparent)]
    Remote(#[from] SourceFetchError),
}

/// An interchangeable origin for the normalized lead list.
#[async_trait]
pub trait LeadSource: Send + Sync {
    async fn fetch_leads(&self) -> Result<Vec<Lead>, SourceError>;
    fn mode(&self) -> SourceMode;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Local,
    Remote,
}

impl SourceMode {
    /// Remote if and only if both the collection identifier and the
    /// credential path are present and non-empty.
    pub fn active(settings: &SourceSettings) -> Self {
        let set = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        if set(&settings.spreadsheet_id) && set(&settings.credentials_path) {
            SourceMode::Remote
        } else {
            SourceMode::Local
        }
    }
}

/// Pick the active source for one request. Re-evaluated on every call so a
/// settings change (e.g. credentials dropped in mid-run) takes effect
/// without a restart.
pub fn resolve(
    config: &Config,
    settings: &SourceSettings,
    client: &reqwest::Client,
    tokens: &Arc<TokenCache>,
) -> Box<dyn LeadSource> {
    match SourceMode::active(settings) {
        SourceMode::Remote => Box::new(SheetsSource::new(
            client.clone(),
            settings.spreadsheet_id.clone().unwrap_or_default(),
            settings.resolved_credentials_path().unwrap_or_default(),
            config.source.clone(),
            tokens.clone(),
        )),
        SourceMode::Local => Box::new(LocalSource::new(config.server.local_leads_path.clone())),
    }
}
