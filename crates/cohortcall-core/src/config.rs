//! Application configuration management.
//!
//! Holds the spreadsheet column letters for the five learner fields and the
//! last report recipient. Stored at `~/.config/cohortcall/config.json`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::mapping::{column_letter_to_index, index_to_column_letter, ColumnMapping, MappingField};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "cohortcall";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Column letters as the user typed them, one per logical field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ColumnLetters {
    pub cohort: String,
    pub email: String,
    pub submission_status: String,
    pub learner_type: String,
    pub submission_name: String,
}

impl Default for ColumnLetters {
    fn default() -> Self {
        Self::from_mapping(&ColumnMapping::default())
    }
}

impl ColumnLetters {
    pub fn from_mapping(mapping: &ColumnMapping) -> Self {
        Self {
            cohort: index_to_column_letter(mapping.cohort),
            email: index_to_column_letter(mapping.email),
            submission_status: index_to_column_letter(mapping.submission_status),
            learner_type: index_to_column_letter(mapping.learner_type),
            submission_name: index_to_column_letter(mapping.submission_name),
        }
    }

    pub fn get(&self, field: MappingField) -> &str {
        match field {
            MappingField::Cohort => &self.cohort,
            MappingField::Email => &self.email,
            MappingField::SubmissionStatus => &self.submission_status,
            MappingField::LearnerType => &self.learner_type,
            MappingField::SubmissionName => &self.submission_name,
        }
    }

    fn slot_mut(&mut self, field: MappingField) -> &mut String {
        match field {
            MappingField::Cohort => &mut self.cohort,
            MappingField::Email => &mut self.email,
            MappingField::SubmissionStatus => &mut self.submission_status,
            MappingField::LearnerType => &mut self.learner_type,
            MappingField::SubmissionName => &mut self.submission_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub columns: ColumnLetters,
    pub last_recipient: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            debug!(path = %path.display(), "Loaded config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Convert the stored letters into a mapping, naming the field on failure.
    pub fn column_mapping(&self) -> Result<ColumnMapping> {
        let mut mapping = ColumnMapping::default();
        for field in MappingField::ALL {
            mapping
                .set_letter(field, self.columns.get(field))
                .with_context(|| format!("Invalid column for {}", field))?;
        }
        Ok(mapping)
    }

    /// Validate and store a new letter for `field`. Other slots are left as
    /// stored, so a bad letter elsewhere can still be corrected one at a time.
    pub fn set_column(&mut self, field: MappingField, letter: &str) -> Result<usize> {
        let index = column_letter_to_index(letter)
            .with_context(|| format!("Invalid column for {}", field))?;
        *self.columns.slot_mut(field) = index_to_column_letter(index);
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_columns() {
        let config = Config::default();
        assert_eq!(config.columns.get(MappingField::SubmissionStatus), "AM");
        assert_eq!(config.column_mapping().unwrap(), ColumnMapping::default());
    }

    #[test]
    fn test_set_column_normalizes_letter() {
        let mut config = Config::default();
        config.set_column(MappingField::Email, " j ").unwrap();
        assert_eq!(config.columns.email, "J");
        assert_eq!(config.column_mapping().unwrap().email, 9);
    }

    #[test]
    fn test_set_column_rejects_invalid() {
        let mut config = Config::default();
        assert!(config.set_column(MappingField::Email, "9").is_err());
        assert_eq!(config.columns.email, "I");
    }

    #[test]
    fn test_invalid_stored_letter_names_field() {
        let mut config = Config::default();
        config.columns.learner_type = "A?".to_string();
        let err = config.column_mapping().unwrap_err();
        assert!(err.to_string().contains("Learner Type"));
    }

    #[test]
    fn test_set_column_repairs_broken_slot() {
        let mut config = Config::default();
        config.columns.cohort = "B2".to_string();
        config.columns.email = "??".to_string();

        assert_eq!(config.set_column(MappingField::Cohort, "c").unwrap(), 2);
        assert_eq!(config.columns.cohort, "C");
        // Only the named slot is touched
        assert_eq!(config.columns.email, "??");
        assert!(config.column_mapping().is_err());

        config.set_column(MappingField::Email, "I").unwrap();
        assert_eq!(config.column_mapping().unwrap().cohort, 2);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let mut config = Config::default();
        config.set_column(MappingField::Cohort, "C").unwrap();
        config.last_recipient = Some("lead@x.com".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.columns.cohort, "C");
        assert_eq!(loaded.last_recipient.as_deref(), Some("lead@x.com"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(loaded.columns, ColumnLetters::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = serde_json::from_str(r#"{"last_recipient": null}"#).unwrap();
        assert_eq!(config.columns, ColumnLetters::default());
    }
}
