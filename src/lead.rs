use serde::{Deserialize, Serialize};

/// Normalized lead record (source-agnostic).
///
/// Every field is optional: the schema is purely positional, not semantic.
/// Rows shorter than 22 columns simply yield missing trailing fields, and
/// blank cells normalize to `None` so presence checks mean the same thing
/// for remote rows and local fallback objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lead {
    /// 1-based sheet row, remote-source provenance only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_processed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_action_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_hook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_sent_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_post: Option<String>,
}

/// Number of positionally-mapped columns (A through V).
pub const LEAD_COLUMNS: usize = 22;

/// Offset from 0-based fetched-range row to 1-based sheet row.
/// The fetch starts at row 2 (header row excluded by convention).
pub const HEADER_ROW_OFFSET: u32 = 2;

fn cell(cells: &[String], idx: usize) -> Option<String> {
    cells.get(idx).filter(|s| !s.is_empty()).cloned()
}

impl Lead {
    /// Map a raw sheet row to a lead. `i` is the 0-based position of the row
    /// within the fetched range; the stored `row_index` is the 1-based sheet
    /// row, so `i + 2`.
    pub fn from_row(cells: &[String], i: usize) -> Self {
        Lead {
            row_index: Some(i as u32 + HEADER_ROW_OFFSET),
            lead_id: cell(cells, 0),
            first_name: cell(cells, 1),
            last_name: cell(cells, 2),
            email: cell(cells, 3),
            linkedin_url: cell(cells, 4),
            company_name: cell(cells, 5),
            company_website: cell(cells, 6),
            role: cell(cells, 7),
            intent_score: cell(cells, 8),
            status: cell(cells, 9),
            status_note: cell(cells, 10),
            last_processed_at: cell(cells, 11),
            next_action_at: cell(cells, 12),
            company_summary: cell(cells, 13),
            personal_hook: cell(cells, 14),
            angle: cell(cells, 15),
            cta: cell(cells, 16),
            email_subject: cell(cells, 17),
            email_body: cell(cells, 18),
            email_sent_at: cell(cells, 19),
            email_message_id: cell(cells, 20),
            linkedin_post: cell(cells, 21),
        }
    }

    /// A populated outreach subject is the sole signal that a draft exists
    /// and the detail view may open.
    pub fn has_draft(&self) -> bool {
        self.email_subject.as_deref().is_some_and(|s| !s.is_empty())
    }

    /// Status for display. Missing status defaults to NEW at presentation
    /// time only; storage keeps the absence.
    pub fn display_status(&self) -> &str {
        self.status.as_deref().unwrap_or("NEW")
    }

    pub fn full_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(f), Some(l)) => format!("{} {}", f, l),
            (Some(f), None) => f.to_string(),
            (None, Some(l)) => l.to_string(),
            (None, None) => "—".to_string(),
        }
    }
}

/// Aggregate counters over a snapshot. Always recomputed from the full
/// snapshot, never incrementally maintained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub sent: usize,
    pub researching: usize,
    pub pending: usize,
}

impl Stats {
    pub fn derive(leads: &[Lead]) -> Self {
        let mut stats = Stats {
            total: leads.len(),
            ..Default::default()
        };
        for lead in leads {
            match lead.status.as_deref() {
                Some("SENT") => stats.sent += 1,
                Some("RESEARCHING") => stats.researching += 1,
                Some("NEW") | None => stats.pending += 1,
                Some(_) => {}
            }
        }
        stats
    }
}
