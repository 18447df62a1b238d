use crate::lead::{Lead, Stats};
use std::collections::VecDeque;
use std::time::Instant;

const LOG_CAPACITY: usize = 200;

/// Shared snapshot of the most recent successful poll, published over a
/// watch channel. The lead list is replaced wholesale on every successful
/// poll, never merged or diffed; a failed poll leaves it untouched.
#[derive(Debug, Clone)]
pub struct DashState {
    pub leads: Vec<Lead>,
    pub last_updated: Option<chrono::DateTime<chrono::Local>>,
    /// Consecutive failed polls since the last success.
    pub poll_failures: u32,
    pub start_time: Instant,
    pub logs: VecDeque<LogEntry>,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub message: String,
}

impl DashState {
    pub fn new() -> Self {
        Self {
            leads: Vec::new(),
            last_updated: None,
            poll_failures: 0,
            start_time: Instant::now(),
            logs: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }

    pub fn replace_snapshot(&mut self, leads: Vec<Lead>) {
        let count = leads.len();
        self.leads = leads;
        self.last_updated = Some(chrono::Local::now());
        self.poll_failures = 0;
        self.push_log("INFO", format!("snapshot refreshed ({} leads)", count));
    }

    pub fn poll_failed(&mut self, message: String) {
        self.poll_failures += 1;
        self.push_log("WARN", message);
    }

    /// Counters are always derived from the current snapshot, on demand.
    pub fn stats(&self) -> Stats {
        Stats::derive(&self.leads)
    }

    pub fn is_stale(&self) -> bool {
        self.poll_failures > 0 || self.last_updated.is_none()
    }

    pub fn push_log(&mut self, level: &str, message: String) {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        if self.logs.len() >= LOG_CAPACITY {
            self.logs.pop_front();
        }
        self.logs.push_back(LogEntry {
            time,
            level: level.to_string(),
            message,
        });
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        format!("{}h {:02}m", h, m)
    }
}

impl Default for DashState {
    fn default() -> Self {
        Self::new()
    }
}

/// Cursor and detail-view state. Lives in the TUI loop, not in the shared
/// snapshot. The open detail holds a clone of the selected record so a
/// snapshot swap cannot invalidate it mid-view.
#[derive(Debug, Default)]
pub struct ViewState {
    pub cursor: usize,
    pub detail: Option<Lead>,
}

impl ViewState {
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, len: usize) {
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    /// Open the detail view for the record under the cursor. Only records
    /// with a populated outreach subject have anything to show; opening a
    /// new detail replaces any already-open one.
    pub fn open_detail(&mut self, leads: &[Lead]) {
        if let Some(lead) = leads.get(self.cursor).filter(|l| l.has_draft()) {
            self.detail = Some(lead.clone());
        }
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }
}
