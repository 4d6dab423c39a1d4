//! Append-only audit log of registry mutations
//!
//! One line per event, `[YYYY-MM-DD HH:MM:SS] <actor> <action>`. The file
//! is never rotated or truncated. Reading it back is gated to the admin
//! identity at the command layer.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;

pub const AUDIT_FILE: &str = "audit.log";

pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(AUDIT_FILE),
        }
    }

    /// Append one audit line. The mutation this records has already
    /// happened, so a write failure is logged and swallowed rather than
    /// failed back to the user.
    pub fn append(&self, actor: &str, action: &str) {
        if let Err(e) = self.try_append(actor, action) {
            log::error!("Audit: failed to append to {}: {}", self.path.display(), e);
        }
    }

    fn try_append(&self, actor: &str, action: &str) -> io::Result<()> {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "[{}] {} {}", timestamp, actor, action)
    }

    /// The last `n` lines of the log, fewer if the log is shorter, empty
    /// if the log does not exist yet.
    pub fn tail(&self, n: usize) -> Vec<String> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                log::warn!("Audit: failed to read {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };
        let lines: Vec<&str> = text.lines().collect();
        let start = lines.len().saturating_sub(n);
        lines[start..].iter().map(|line| line.to_string()).collect()
    }
}
