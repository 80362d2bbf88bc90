//! Command handlers.
//!
//! `App` owns configuration and the on-disk stores; each handler opens the
//! requested file as an `UploadSession`, resuming the saved one when it is
//! the same file under the same mapping.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use cohortcall_core::report::{default_report_file_name, to_csv, EmailReportRequest};
use cohortcall_core::store::{SessionStore, UploadLog};
use cohortcall_core::{ColumnMapping, Config, MappingField, UploadSession};

use crate::cli::{ColumnArgs, SelectionArgs, SessionAction};
use crate::output;

pub struct App {
    config: Config,
    config_path: PathBuf,
    columns: ColumnArgs,
    store: SessionStore,
    uploads: UploadLog,
}

impl App {
    pub fn new(columns: &ColumnArgs) -> Result<Self> {
        let config_path = Config::config_path()?;
        let config = Config::load_from(&config_path)?;
        let cache_dir = config.cache_dir()?;
        Ok(Self::with_dirs(config, config_path, cache_dir, columns))
    }

    /// Build an app over explicit config and cache locations.
    ///
    /// Column letters are not validated here, so `map` and `session` still
    /// work when the stored config holds a bad letter.
    pub fn with_dirs(config: Config, config_path: PathBuf, cache_dir: PathBuf, columns: &ColumnArgs) -> Self {
        Self {
            config,
            config_path,
            columns: columns.clone(),
            store: SessionStore::new(cache_dir.clone()),
            uploads: UploadLog::new(cache_dir),
        }
    }

    /// Configured mapping with this run's overrides applied.
    fn mapping(&self) -> Result<ColumnMapping> {
        apply_overrides(self.config.column_mapping()?, &self.columns)
    }

    fn save_config(&self) -> Result<()> {
        self.config.save_to(&self.config_path)
    }

    /// Open `file`, resuming the saved session when it matches.
    fn open(&self, file: &Path) -> Result<UploadSession> {
        let mapping = self.mapping()?;
        let text = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file.display().to_string());

        if let Some(snapshot) = self.store.load()? {
            if snapshot.file_name == file_name && snapshot.raw_text == text && snapshot.mapping == mapping {
                debug!(file = %file_name, "Resuming saved session");
                return Ok(snapshot.restore());
            }
        }

        let session = UploadSession::open(file_name, text, mapping);
        if self.uploads.record(&session)? {
            info!(file = %session.file_name(), records = session.records().len(), "New upload");
        }
        Ok(session)
    }

    fn open_valid(&self, file: &Path) -> Result<UploadSession> {
        let session = self.open(file)?;
        if let Some(error) = session.error() {
            anyhow::bail!("{}", error);
        }
        Ok(session)
    }

    fn recipient(&self, given: Option<String>) -> Result<String> {
        given
            .or_else(|| self.config.last_recipient.clone())
            .ok_or_else(|| anyhow::anyhow!("No recipient given and none used before"))
    }

    // ===== Commands =====

    pub fn inspect(&self, file: &Path) -> Result<()> {
        let session = self.open(file)?;
        output::print_inspect(&session);
        self.store.save(&session)
    }

    pub fn summary(&self, file: &Path, selection: &SelectionArgs) -> Result<()> {
        let session = self.open_valid(file)?;
        let selected = with_selection(&session, selection)?;
        output::print_summary(selected.selected(), &selected.view());
        self.store.save(&session)
    }

    pub fn report(
        &mut self,
        file: &Path,
        selection: &SelectionArgs,
        out: Option<PathBuf>,
        json: Option<Option<String>>,
    ) -> Result<()> {
        let session = self.open_valid(file)?;
        let selected = with_selection(&session, selection)?;
        let rows = selected.report()?;

        if let Some(given) = json {
            let recipient = self.recipient(given)?;
            let request = EmailReportRequest::new(&recipient, selected.selected(), rows);
            println!("{}", serde_json::to_string_pretty(&request)?);
            self.config.last_recipient = Some(recipient);
            self.save_config()?;
        } else {
            let path = out.unwrap_or_else(|| PathBuf::from(default_report_file_name()));
            std::fs::write(&path, to_csv(&rows))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {} learner(s) to {}", rows.len(), path.display());
        }
        self.store.save(&session)
    }

    pub fn remark(&self, file: &Path, email: &str, cohort: &str, submission: &str, text: &str) -> Result<()> {
        let mut session = self.open(file)?;
        let learner = session
            .find_learner(email, cohort, submission)
            .cloned()
            .ok_or_else(|| {
                anyhow::anyhow!("No learner {} in cohort {} for {}", email, cohort, submission)
            })?;

        // Remarks only live inside the selection.
        if !session.selected().contains(&learner.cohort) {
            session.toggle_cohort(&learner.cohort);
        }
        session.set_remark(&learner, text);
        self.store.save(&session)?;
        println!("Remark saved for {}", learner.email);
        Ok(())
    }

    pub fn map(&mut self, field: Option<String>, letter: Option<String>) -> Result<()> {
        if let (Some(field), Some(letter)) = (field, letter) {
            let field: MappingField = field.parse()?;
            let index = self.config.set_column(field, &letter)?;
            self.save_config()?;
            println!("{} -> {} ({})", field, self.config.columns.get(field), index);
            return Ok(());
        }
        let configured = self.config.column_mapping()?;
        output::print_mapping(&configured);
        let mapping = self.mapping()?;
        if mapping != configured {
            println!();
            println!("Overridden for this run:");
            output::print_mapping(&mapping);
        }
        Ok(())
    }

    pub fn session(&self, action: SessionAction) -> Result<()> {
        match action {
            SessionAction::Show => match self.store.load()? {
                Some(snapshot) => {
                    let session = snapshot.restore();
                    output::print_session(&session, &snapshot.age_display());
                }
                None => println!("No saved session"),
            },
            SessionAction::Clear => {
                self.store.clear()?;
                println!("Session cleared");
            }
        }
        Ok(())
    }

    pub fn uploads(&self) -> Result<()> {
        output::print_uploads(&self.uploads.entries()?);
        Ok(())
    }
}

/// Apply a command-line selection to a copy of `session`.
///
/// Narrowing the copy prunes its remarks; the session that gets saved keeps
/// its own selection and every remark.
fn with_selection(session: &UploadSession, selection: &SelectionArgs) -> Result<UploadSession> {
    let mut selected = session.clone();
    if selection.all {
        selected.select_all();
    } else if !selection.cohorts.is_empty() {
        let unknown: Vec<&String> = selection
            .cohorts
            .iter()
            .filter(|c| !session.cohorts().contains(c))
            .collect();
        if !unknown.is_empty() {
            anyhow::bail!(
                "Unknown cohort(s): {}. Available: {}",
                output::join(unknown),
                output::join(session.cohorts())
            );
        }
        selected.select_cohorts(&selection.cohorts);
    } else if selected.selected().is_empty() {
        selected.select_all();
    }
    Ok(selected)
}

/// Replace configured letters with any given on the command line.
fn apply_overrides(mut mapping: ColumnMapping, columns: &ColumnArgs) -> Result<ColumnMapping> {
    let overrides = [
        (MappingField::Cohort, &columns.cohort_col),
        (MappingField::Email, &columns.email_col),
        (MappingField::SubmissionStatus, &columns.status_col),
        (MappingField::LearnerType, &columns.type_col),
        (MappingField::SubmissionName, &columns.name_col),
    ];
    for (field, letter) in overrides {
        if let Some(letter) = letter {
            mapping
                .set_letter(field, letter)
                .with_context(|| format!("Invalid column for {}", field))?;
        }
    }
    Ok(mapping)
}
