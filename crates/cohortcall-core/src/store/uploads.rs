use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::session::UploadSession;

/// Upload log file name in cache directory
const UPLOADS_FILE: &str = "uploads.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRecord {
    pub file_name: String,
    /// Learner records kept after projection.
    pub row_count: usize,
    /// Size of the raw text in bytes.
    pub file_size: usize,
    pub uploaded_at: DateTime<Utc>,
}

impl UploadRecord {
    pub fn for_session(session: &UploadSession) -> Self {
        Self {
            file_name: session.file_name().to_string(),
            row_count: session.records().len(),
            file_size: session.raw_text().len(),
            uploaded_at: Utc::now(),
        }
    }
}

pub struct UploadLog {
    cache_dir: PathBuf,
}

impl UploadLog {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// All logged uploads, oldest first.
    pub fn entries(&self) -> Result<Vec<UploadRecord>> {
        let path = self.log_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&path)
            .context("Failed to read upload log")?;
        serde_json::from_str(&contents).context("Failed to parse upload log")
    }

    /// Log `session` if it produced any records. Returns whether it was logged.
    pub fn record(&self, session: &UploadSession) -> Result<bool> {
        if session.records().is_empty() {
            return Ok(false);
        }
        let mut entries = self.entries()?;
        entries.push(UploadRecord::for_session(session));
        std::fs::create_dir_all(&self.cache_dir)?;
        let contents = serde_json::to_string_pretty(&entries)?;
        std::fs::write(self.log_path(), contents)
            .context("Failed to write upload log")?;
        debug!(file = %session.file_name(), total = entries.len(), "Logged upload");
        Ok(true)
    }

    fn log_path(&self) -> PathBuf {
        self.cache_dir.join(UPLOADS_FILE)
    }
}
