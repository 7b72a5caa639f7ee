/// Session log: every operation in the current session, in order.
///
/// Each entry carries a sequence number, a timestamp, the operation name
/// and a short description. The log can be exported as text or JSON.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// A single logged operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Sequential operation number (1-based)
    pub sequence: usize,
    pub timestamp: DateTime<Local>,
    pub operation: String,
    pub description: String,
}

impl LogEntry {
    pub fn to_text(&self) -> String {
        format!(
            "[{:03}] {} | {} | {}",
            self.sequence,
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.operation,
            self.description,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionLog {
    pub session_id: String,
    pub session_start: DateTime<Local>,
    /// Image currently loaded, empty while awaiting upload
    pub source_file: String,
    pub software_version: String,
    pub entries: Vec<LogEntry>,
}

impl SessionLog {
    pub fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            session_start: Local::now(),
            source_file: String::new(),
            software_version: env!("CARGO_PKG_VERSION").to_string(),
            entries: Vec::new(),
        }
    }

    pub fn set_source(&mut self, source: &str) {
        self.source_file = source.to_string();
    }

    pub fn add_entry(&mut self, operation: &str, description: &str) {
        let seq = self.entries.len() + 1;
        self.entries.push(LogEntry {
            sequence: seq,
            timestamp: Local::now(),
            operation: operation.to_string(),
            description: description.to_string(),
        });
        log::info!("[LOG {:03}] {} — {}", seq, operation, description);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out.push_str("  Red Channel Inspector Session Log\n");
        out.push_str("═══════════════════════════════════════════════════════════════\n");
        out.push_str(&format!("  Session ID:  {}\n", self.session_id));
        out.push_str(&format!(
            "  Started:     {}\n",
            self.session_start.format("%Y-%m-%d %H:%M:%S")
        ));
        out.push_str(&format!("  Source:      {}\n", self.source_file));
        out.push_str(&format!("  Software:    red_inspector v{}\n", self.software_version));
        out.push_str(&format!("  Operations:  {}\n", self.entries.len()));
        out.push_str("───────────────────────────────────────────────────────────────\n\n");

        for entry in &self.entries {
            out.push_str(&entry.to_text());
            out.push('\n');
        }
        out
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }

    pub fn save_text(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.to_text())
    }

    pub fn save_json(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.to_json())
    }

    /// Save as JSON for a `.json` path, plain text otherwise.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let is_json = path
            .extension()
            .map(|e| e.to_string_lossy().eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json {
            self.save_json(path)
        } else {
            self.save_text(path)
        }
    }
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_creation_and_entries() {
        let mut log = SessionLog::new();
        assert!(log.is_empty());

        log.add_entry("Open", "photo.png (640 × 480 px)");
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries[0].sequence, 1);
        assert_eq!(log.entries[0].operation, "Open");

        log.add_entry("Threshold", "25 (exclude)");
        assert_eq!(log.entries[1].sequence, 2);
    }

    #[test]
    fn test_text_export() {
        let mut log = SessionLog::new();
        log.set_source("photo.png");
        log.add_entry("Export CSV", "4 rows");
        let text = log.to_text();
        assert!(text.contains("photo.png"));
        assert!(text.contains("Export CSV | 4 rows"));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut log = SessionLog::new();
        log.add_entry("Open", "a.png");
        let parsed: SessionLog = serde_json::from_str(&log.to_json()).unwrap();
        assert_eq!(parsed.entries.len(), 1);
        assert_eq!(parsed.session_id, log.session_id);
    }

    #[test]
    fn test_save_picks_format_from_extension() {
        let mut log = SessionLog::new();
        log.add_entry("Open", "a.png");
        let dir = std::env::temp_dir();
        let json_path = dir.join(format!("{}.json", log.session_id));
        let txt_path = dir.join(format!("{}.txt", log.session_id));
        log.save(&json_path).unwrap();
        log.save(&txt_path).unwrap();
        assert!(std::fs::read_to_string(&json_path).unwrap().starts_with('{'));
        assert!(std::fs::read_to_string(&txt_path).unwrap().contains("Session Log"));
        let _ = std::fs::remove_file(json_path);
        let _ = std::fs::remove_file(txt_path);
    }
}
