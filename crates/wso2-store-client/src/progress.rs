//! Append-only progress log for debug runs.
//!
//! When the portal config enables debug mode, each workflow stage
//! appends a human-readable line describing the action about to be
//! attempted. Write failures are logged and swallowed: the log is an
//! aid, never a reason to fail a provisioning run.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::warn;

/// Default log file name, placed next to the running binary.
pub const DEFAULT_LOG_NAME: &str = "wso2-provision.log";

/// Appends timestamped progress lines to a log file.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    /// Create a log writing to `path`, or to [`DEFAULT_LOG_NAME`]
    /// next to the running binary when no override is given.
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self {
            path: path.unwrap_or_else(default_path),
        }
    }

    /// The file this log appends to.
    #[must_use]
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Append one progress line.
    pub fn note(&self, line: &str) {
        let stamped = format!(
            "{} {line}\n",
            chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ")
        );
        if let Err(e) = self.append(&stamped) {
            warn!("failed to write progress log {}: {e}", self.path.display());
        }
    }

    /// Append a separator marking the start of a run.
    pub fn run_separator(&self) {
        if let Err(e) = self.append(
            "\n______________________________________________________________________________\n\n",
        ) {
            warn!("failed to write progress log {}: {e}", self.path.display());
        }
    }

    fn append(&self, text: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(text.as_bytes())
    }
}

fn default_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_LOG_NAME)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_NAME))
}
