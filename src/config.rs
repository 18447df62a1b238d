use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const ENV_FILE: &str = ".env";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Fallback file read when the remote source is not configured.
    #[serde(default = "default_local_leads_path")]
    pub local_leads_path: PathBuf,
}

fn default_port() -> u16 { 3001 }
fn default_local_leads_path() -> PathBuf { PathBuf::from("local_leads.json") }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            local_leads_path: default_local_leads_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_api_base() -> String { "https://sheets.googleapis.com".to_string() }
fn default_sheet_name() -> String { "Sheet1".to_string() }
fn default_request_timeout() -> u64 { 10_000 }

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            sheet_name: default_sheet_name(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

impl Config {
    /// Load config.toml. A missing file is fine (all values have defaults);
    /// a present-but-broken file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config file: {}", path.display()));
            }
        };
        let config: Config = toml::from_str(&content)
            .with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }

    /// Load .env file into process environment. Real env vars take precedence.
    pub fn load_env_file() {
        let path = Path::new(ENV_FILE);
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return,
        };
        // Strip BOM if present (common on Windows-created files)
        let content = content.strip_prefix('\u{feff}').unwrap_or(&content);
        for line in content.lines() {
            let line = line.trim().trim_matches('\r');
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                let value = value.trim().trim_matches('"').trim_matches('\'');
                if std::env::var(key).is_err() {
                    std::env::set_var(key, value);
                }
            }
        }
    }
}

/// Remote-source selection inputs, captured once at startup. Presence of
/// both values is what flips the resolver to remote mode; the check itself
/// happens per request against these fields, never against the environment.
#[derive(Debug, Clone, Default)]
pub struct SourceSettings {
    pub spreadsheet_id: Option<String>,
    pub credentials_path: Option<String>,
}

impl SourceSettings {
    pub fn from_env() -> Self {
        Self {
            spreadsheet_id: env_nonempty("SPREADSHEET_ID"),
            credentials_path: env_nonempty("SHEETS_CREDENTIALS_PATH"),
        }
    }

    /// Credential file path, resolved against the service root (the process
    /// working directory) when given relatively.
    pub fn resolved_credentials_path(&self) -> Option<PathBuf> {
        let raw = self.credentials_path.as_deref()?;
        let path = Path::new(raw);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(std::env::current_dir().unwrap_or_default().join(path))
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) => {
            let v = sanitize(&v);
            if v.is_empty() { None } else { Some(v) }
        }
        Err(_) => None,
    }
}

/// Strip carriage returns, BOM, and other invisible chars from a value.
fn sanitize(raw: &str) -> String {
    raw.replace(['\r', '\u{feff}', '\u{200b}'], "")
        .trim()
        .to_string()
}
