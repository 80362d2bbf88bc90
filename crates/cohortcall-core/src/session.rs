//! One uploaded file and the choices made against it.
//!
//! The session keeps the tokenized rows so a remap only re-projects. The
//! caller owns the session and passes it around explicitly; there is no
//! global "current mapping".

use std::collections::HashSet;

use tracing::{debug, info};

use crate::csv::{parse_csv, RawRow};
use crate::error::{MappingError, ProjectionError, ReportError};
use crate::headers::{check_headers, HeaderCheck};
use crate::mapping::{ColumnMapping, MappingField};
use crate::models::{LearnerRecord, RemarkBook};
use crate::projection::{project, Projection};
use crate::report::{build_report, ReportRow};
use crate::summary::{unique_cohorts, CohortView};

#[derive(Debug, Clone)]
pub struct UploadSession {
    file_name: String,
    raw_text: String,
    rows: Vec<RawRow>,
    mapping: ColumnMapping,
    projection: Projection,
    cohorts: Vec<String>,
    selected: Vec<String>,
    remarks: RemarkBook,
}

impl UploadSession {
    /// Tokenize `text` once and project it with `mapping`.
    pub fn open(file_name: impl Into<String>, text: impl Into<String>, mapping: ColumnMapping) -> Self {
        let file_name = file_name.into();
        let raw_text = text.into();
        let rows = parse_csv(&raw_text);
        info!(file = %file_name, rows = rows.len(), "Opened upload");

        let mut session = Self {
            file_name,
            raw_text,
            rows,
            mapping,
            projection: Projection::default(),
            cohorts: Vec::new(),
            selected: Vec::new(),
            remarks: RemarkBook::new(),
        };
        session.reproject();
        session
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn header(&self) -> Option<&RawRow> {
        self.rows.first()
    }

    pub fn header_check(&self) -> HeaderCheck {
        check_headers(self.header().map(Vec::as_slice).unwrap_or_default())
    }

    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn records(&self) -> &[LearnerRecord] {
        &self.projection.records
    }

    pub fn error(&self) -> Option<&ProjectionError> {
        self.projection.error.as_ref()
    }

    /// Distinct cohorts across every record, not just the selected ones.
    pub fn cohorts(&self) -> &[String] {
        &self.cohorts
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn remarks(&self) -> &RemarkBook {
        &self.remarks
    }

    // ===== Mapping =====

    /// Point `field` at the column `letter` and re-project the held rows.
    ///
    /// An invalid letter leaves the session untouched.
    pub fn remap(&mut self, field: MappingField, letter: &str) -> Result<usize, MappingError> {
        let mapping = self.mapping.with_letter(field, letter)?;
        let index = mapping.index(field);
        info!(field = %field, letter = %letter.trim().to_uppercase(), index, "Remapped column");
        self.apply_mapping(mapping);
        Ok(index)
    }

    /// Replace the whole mapping and re-project.
    pub fn apply_mapping(&mut self, mapping: ColumnMapping) {
        self.mapping = mapping;
        self.reproject();
    }

    /// A fresh projection starts with no selection and no remarks.
    fn reproject(&mut self) {
        self.projection = project(&self.rows, &self.mapping);
        self.cohorts = unique_cohorts(&self.projection.records);
        self.selected.clear();
        self.remarks.clear();
        debug!(
            records = self.projection.records.len(),
            cohorts = self.cohorts.len(),
            error = ?self.projection.error,
            "Re-projected session"
        );
    }

    // ===== Cohort Selection =====

    /// Flip `cohort` in the selection. Returns whether it is now selected.
    ///
    /// Unknown cohorts are ignored.
    pub fn toggle_cohort(&mut self, cohort: &str) -> bool {
        if !self.cohorts.iter().any(|c| c == cohort) {
            debug!(cohort, "Ignoring toggle of unknown cohort");
            return false;
        }
        let now_selected = match self.selected.iter().position(|c| c == cohort) {
            Some(pos) => {
                self.selected.remove(pos);
                false
            }
            None => {
                self.selected.push(cohort.to_string());
                true
            }
        };
        self.prune_remarks();
        now_selected
    }

    /// Replace the selection, keeping only known cohorts in the given order.
    pub fn select_cohorts<I, S>(&mut self, cohorts: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selected.clear();
        for cohort in cohorts {
            let cohort = cohort.as_ref();
            if self.cohorts.iter().any(|c| c == cohort) && !self.selected.iter().any(|c| c == cohort) {
                self.selected.push(cohort.to_string());
            }
        }
        self.prune_remarks();
    }

    pub fn select_all(&mut self) {
        self.selected = self.cohorts.clone();
    }

    /// Remarks only survive for learners inside the selection.
    fn prune_remarks(&mut self) {
        let keys: HashSet<String> = self
            .projection
            .records
            .iter()
            .filter(|r| self.selected.contains(&r.cohort))
            .map(LearnerRecord::remark_key)
            .collect();
        self.remarks.retain_keys(&keys);
    }

    // ===== Derived Views =====

    pub fn view(&self) -> CohortView<'_> {
        CohortView::new(&self.projection.records, &self.selected)
    }

    pub fn report(&self) -> Result<Vec<ReportRow>, ReportError> {
        build_report(&self.view(), &self.remarks)
    }

    // ===== Remarks =====

    pub fn find_learner(&self, email: &str, cohort: &str, submission_name: &str) -> Option<&LearnerRecord> {
        self.projection.records.iter().find(|r| {
            r.email.eq_ignore_ascii_case(email.trim())
                && r.cohort == cohort.trim()
                && r.submission_name == submission_name.trim()
        })
    }

    pub fn set_remark(&mut self, learner: &LearnerRecord, remark: impl Into<String>) {
        self.remarks.set_for(learner, remark);
    }

    /// Restore previously saved remarks, dropping any outside the selection.
    pub fn restore_remarks(&mut self, remarks: RemarkBook) {
        self.remarks = remarks;
        self.prune_remarks();
    }
}
