use super::auth::{TokenCache, SHEETS_READONLY_SCOPE};
use super::{LeadSource, SourceError, SourceFetchError, SourceMode};
use crate::config::SourceConfig;
use crate::lead::Lead;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

/// Remote tabular source: one named sheet, all columns from the second row
/// onward (the header row is excluded by convention).
pub struct SheetsSource {
    client: Client,
    spreadsheet_id: String,
    credentials_path: PathBuf,
    config: SourceConfig,
    tokens: Arc<TokenCache>,
}

/// `values.get` response. A sheet with no data rows omits `values` entirely.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl SheetsSource {
    pub fn new(
        client: Client,
        spreadsheet_id: String,
        credentials_path: PathBuf,
        config: SourceConfig,
        tokens: Arc<TokenCache>,
    ) -> Self {
        Self {
            client,
            spreadsheet_id,
            credentials_path,
            config,
            tokens,
        }
    }

    /// Fetch the raw cell matrix for the configured range.
    async fn fetch_rows(&self) -> Result<Vec<Vec<String>>, SourceFetchError> {
        let bearer = self
            .tokens
            .bearer(&self.client, &self.credentials_path, SHEETS_READONLY_SCOPE)
            .await?;

        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}!A2:Z",
            self.config.api_base.trim_end_matches('/'),
            self.spreadsheet_id,
            self.config.sheet_name,
        );

        let resp = self.client.get(&url).bearer_auth(&bearer).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceFetchError::Fetch {
                status: status.as_u16(),
                body,
            });
        }

        let range: ValueRange = resp.json().await?;
        Ok(range.values)
    }
}

pub fn rows_to_leads(rows: Vec<Vec<String>>) -> Vec<Lead> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| Lead::from_row(row, i))
        .collect()
}

#[async_trait]
impl LeadSource for SheetsSource {
    async fn fetch_leads(&self) -> Result<Vec<Lead>, SourceError> {
        let rows = self.fetch_rows().await?;
        Ok(rows_to_leads(rows))
    }

    fn mode(&self) -> SourceMode {
        SourceMode::Remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range_parses() {
        let json = r#"{
            "range": "Sheet1!A2:Z40",
            "majorDimension": "ROWS",
            "values": [
                ["L-1", "Ada", "Lovelace"],
                ["L-2"]
            ]
        }"#;
        let range: ValueRange = serde_json::from_str(json).unwrap();
        assert_eq!(range.values.len(), 2);
        assert_eq!(range.values[0][1], "Ada");
    }

    #[test]
    fn test_empty_sheet_omits_values_key() {
        let range: ValueRange = serde_json::from_str(r#"{"range":"Sheet1!A2:Z"}"#).unwrap();
        assert!(range.values.is_empty());
    }

    #[test]
    fn test_rows_to_leads_numbers_from_sheet_row_two() {
        let rows = vec![
            vec!["L-1".to_string(), "Ada".to_string()],
            vec!["L-2".to_string()],
            vec!["L-3".to_string()],
        ];
        let leads = rows_to_leads(rows);
        assert_eq!(leads.len(), 3);
        assert_eq!(leads[0].row_index, Some(2));
        assert_eq!(leads[1].row_index, Some(3));
        assert_eq!(leads[2].row_index, Some(4));
        assert_eq!(leads[0].first_name.as_deref(), Some("Ada"));
        assert!(leads[1].first_name.is_none());
    }
}
