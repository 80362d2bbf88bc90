//! Row projection: tokenized rows plus a column mapping into learner records.

use tracing::{debug, warn};

use crate::csv::RawRow;
use crate::error::ProjectionError;
use crate::mapping::ColumnMapping;
use crate::models::{LearnerRecord, DEFAULT_COHORT};

/// Result of projecting one tokenized file.
///
/// `error` is set exactly when `records` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    pub records: Vec<LearnerRecord>,
    pub error: Option<ProjectionError>,
    /// Data rows seen, header excluded.
    pub data_rows: usize,
    /// Data rows dropped for lacking an `@` in the mapped email column.
    pub rejected: usize,
}

impl Projection {
    fn failed(error: ProjectionError, data_rows: usize) -> Self {
        Self {
            records: Vec::new(),
            error: Some(error),
            data_rows,
            rejected: data_rows,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_result(self) -> Result<Vec<LearnerRecord>, ProjectionError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.records),
        }
    }
}

/// Build learner records from `rows`, whose first element is the header.
///
/// The header is only skipped, never read. Missing cells project to empty
/// strings; a blank cohort becomes `"N/A"`. Rows whose email lacks `@` are
/// dropped.
pub fn project(rows: &[RawRow], mapping: &ColumnMapping) -> Projection {
    let data = rows.get(1..).unwrap_or_default();
    if data.is_empty() {
        debug!("No data rows after header");
        return Projection::failed(ProjectionError::NoDataRows, 0);
    }

    let records: Vec<LearnerRecord> = data
        .iter()
        .map(|row| project_row(row, mapping))
        .filter(LearnerRecord::has_valid_email)
        .collect();

    let rejected = data.len() - records.len();
    if records.is_empty() {
        warn!(data_rows = data.len(), email_column = mapping.email, "No row had a valid email");
        return Projection::failed(ProjectionError::NoValidLearners, data.len());
    }

    debug!(
        data_rows = data.len(),
        records = records.len(),
        rejected,
        "Projected learner records"
    );
    Projection {
        records,
        error: None,
        data_rows: data.len(),
        rejected,
    }
}

fn project_row(row: &RawRow, mapping: &ColumnMapping) -> LearnerRecord {
    let cell = |index: usize| -> String {
        row.get(index)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    };

    let cohort = cell(mapping.cohort);
    LearnerRecord {
        cohort: if cohort.is_empty() {
            DEFAULT_COHORT.to_string()
        } else {
            cohort
        },
        email: cell(mapping.email),
        submission_status: cell(mapping.submission_status),
        learner_type: cell(mapping.learner_type),
        submission_name: cell(mapping.submission_name),
    }
}
