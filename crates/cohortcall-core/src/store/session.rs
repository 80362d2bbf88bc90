use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::mapping::ColumnMapping;
use crate::models::RemarkBook;
use crate::session::UploadSession;

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// What is needed to rebuild an `UploadSession`.
///
/// Records are not stored; they are re-projected from `raw_text` on load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub file_name: String,
    pub raw_text: String,
    pub mapping: ColumnMapping,
    #[serde(default)]
    pub selected: Vec<String>,
    #[serde(default)]
    pub remarks: RemarkBook,
    pub saved_at: DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn capture(session: &UploadSession) -> Self {
        Self {
            file_name: session.file_name().to_string(),
            raw_text: session.raw_text().to_string(),
            mapping: *session.mapping(),
            selected: session.selected().to_vec(),
            remarks: session.remarks().clone(),
            saved_at: Utc::now(),
        }
    }

    pub fn restore(&self) -> UploadSession {
        let mut session = UploadSession::open(&self.file_name, &self.raw_text, self.mapping);
        session.select_cohorts(&self.selected);
        session.restore_remarks(self.remarks.clone());
        session
    }

    pub fn age_display(&self) -> String {
        super::age_display(self.saved_at)
    }
}

pub struct SessionStore {
    cache_dir: PathBuf,
}

impl SessionStore {
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }

    /// Load the saved snapshot, if any.
    pub fn load(&self) -> Result<Option<SessionSnapshot>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)
            .context("Failed to read session file")?;
        let snapshot: SessionSnapshot = serde_json::from_str(&contents)
            .context("Failed to parse session file")?;
        debug!(file = %snapshot.file_name, saved = %snapshot.age_display(), "Loaded session");
        Ok(Some(snapshot))
    }

    pub fn save(&self, session: &UploadSession) -> Result<()> {
        std::fs::create_dir_all(&self.cache_dir)?;
        let snapshot = SessionSnapshot::capture(session);
        let contents = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(self.session_path(), contents)
            .context("Failed to write session file")?;
        info!(
            file = %snapshot.file_name,
            selected = snapshot.selected.len(),
            remarks = snapshot.remarks.len(),
            "Saved session"
        );
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingField;

    const CSV: &str = "Cohort,Email,Status,Type,Name\n\
        A,a@x.com,Not Submitted,Local,Q1\n\
        B,b@x.com,Not Submitted,Local,Q1\n";

    fn compact() -> ColumnMapping {
        ColumnMapping {
            cohort: 0,
            email: 1,
            submission_status: 2,
            learner_type: 3,
            submission_name: 4,
        }
    }

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_restore() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("cache"));

        let mut session = UploadSession::open("learners.csv", CSV, compact());
        session.select_cohorts(["B", "A"]);
        let learner = session.find_learner("a@x.com", "A", "Q1").cloned().unwrap();
        session.set_remark(&learner, "no answer");
        store.save(&session).unwrap();

        let snapshot = store.load().unwrap().unwrap();
        assert_eq!(snapshot.age_display(), "just now");
        let restored = snapshot.restore();
        assert_eq!(restored.file_name(), "learners.csv");
        assert_eq!(restored.selected(), session.selected());
        assert_eq!(restored.records(), session.records());
        assert_eq!(restored.remarks().get_for(&learner), "no answer");
    }

    #[test]
    fn test_restore_keeps_remapped_columns() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());
        let mut session = UploadSession::open("learners.csv", CSV, compact());
        session.remap(MappingField::LearnerType, "E").unwrap();
        store.save(&session).unwrap();

        let restored = store.load().unwrap().unwrap().restore();
        assert_eq!(restored.mapping().learner_type, 4);
        assert_eq!(restored.records()[0].learner_type, "Q1");
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().to_path_buf());
        store.save(&UploadSession::open("f.csv", CSV, compact())).unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }
}
