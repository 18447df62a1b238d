use super::{LeadSource, LocalReadError, SourceError, SourceMode};
use crate::lead::Lead;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Fallback source: a JSON array of lead-shaped objects at a fixed relative
/// path. Entries pass through unchanged; the file format is expected to
/// already match the record shape, so no per-field validation happens here.
pub struct LocalSource {
    path: PathBuf,
}

impl LocalSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

pub fn read_local_leads(path: &Path) -> Result<Vec<Lead>, LocalReadError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(LocalReadError::Missing),
        Err(e) => return Err(LocalReadError::Unreadable(e)),
    };
    let leads = serde_json::from_str(&raw)?;
    Ok(leads)
}

#[async_trait]
impl LeadSource for LocalSource {
    async fn fetch_leads(&self) -> Result<Vec<Lead>, SourceError> {
        Ok(read_local_leads(&self.path)?)
    }

    fn mode(&self) -> SourceMode {
        SourceMode::Local
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_distinct_from_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_leads.json");
        assert!(matches!(read_local_leads(&path), Err(LocalReadError::Missing)));
    }

    #[test]
    fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_leads.json");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"{ not json").unwrap();
        assert!(matches!(read_local_leads(&path), Err(LocalReadError::Malformed(_))));
    }

    #[test]
    fn test_valid_file_passes_entries_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_leads.json");
        std::fs::write(
            &path,
            r#"[
                {"lead_id":"L-1","first_name":"Ada","status":"SENT","email_subject":"Hi"},
                {"lead_id":"L-2","company_name":"Acme"}
            ]"#,
        )
        .unwrap();

        let leads = read_local_leads(&path).unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].lead_id.as_deref(), Some("L-1"));
        assert!(leads[0].has_draft());
        assert_eq!(leads[1].company_name.as_deref(), Some("Acme"));
        assert!(leads[1].row_index.is_none());
    }

    #[tokio::test]
    async fn test_source_trait_wraps_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local_leads.json");
        std::fs::write(&path, "[]").unwrap();

        let source = LocalSource::new(path);
        assert_eq!(source.mode(), SourceMode::Local);
        let leads = source.fetch_leads().await.unwrap();
        assert!(leads.is_empty());
    }
}
