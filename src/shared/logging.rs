use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Appends structured JSON lines to the application log. A log without a
/// path swallows every entry.
#[derive(Debug, Clone, Default)]
pub struct AppLog {
    path: Option<PathBuf>,
}

impl AppLog {
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn disabled() -> Self {
        Self { path: None }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&self, event: &str, message: &str) {
        self.append("info", event, message);
    }

    pub fn warn(&self, event: &str, message: &str) {
        self.append("warn", event, message);
    }

    pub fn error(&self, event: &str, message: &str) {
        self.append("error", event, message);
    }

    fn append(&self, level: &str, event: &str, message: &str) {
        let Some(path) = self.path.as_ref() else {
            return;
        };
        let _ = append_log_line(path, level, event, message);
    }
}

pub fn append_log_line(path: &Path, level: &str, event: &str, message: &str) -> std::io::Result<()> {
    let payload = serde_json::json!({
        "timestamp": now_secs(),
        "level": level,
        "event": event,
        "message": message,
    });
    let line = serde_json::to_string(&payload).map_err(std::io::Error::other)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    writeln!(file, "{line}")
}

fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn app_log_appends_json_lines_with_level_and_event() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("logs/app.log");
        let log = AppLog::to_file(&path);

        log.info("setup.submitted", "tenant=default");
        log.error("setup.persist_failed", "disk full");

        let raw = fs::read_to_string(&path).expect("read log");
        let lines: Vec<serde_json::Value> = raw
            .lines()
            .map(|line| serde_json::from_str(line).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["level"], "info");
        assert_eq!(lines[0]["event"], "setup.submitted");
        assert_eq!(lines[1]["level"], "error");
        assert_eq!(lines[1]["message"], "disk full");
    }

    #[test]
    fn disabled_log_writes_nothing() {
        let log = AppLog::disabled();
        log.warn("ignored", "nothing");
        assert!(log.path().is_none());
    }
}
