//! Spreadsheet column letters and the five-slot column mapping.
//!
//! Column letters are bijective base-26 numerals (`A`=1 .. `Z`=26), shifted
//! to zero-based indices: `A`=0, `Z`=25, `AA`=26, `AM`=38.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MappingError;

/// Default column for the cohort name (`B`).
pub const DEFAULT_COHORT_INDEX: usize = 1;
/// Default column for the learner email (`I`).
pub const DEFAULT_EMAIL_INDEX: usize = 8;
/// Default column for the submission status (`AM`).
pub const DEFAULT_SUBMISSION_STATUS_INDEX: usize = 38;
/// Default column for the learner type (`AN`).
pub const DEFAULT_LEARNER_TYPE_INDEX: usize = 39;
/// Default column for the submission name (`AO`).
pub const DEFAULT_SUBMISSION_NAME_INDEX: usize = 40;

/// Convert a column letter such as `"AM"` to a zero-based index.
///
/// Case-insensitive, surrounding whitespace ignored. Empty input or any
/// character outside `A-Z` is rejected rather than producing a bogus index.
pub fn column_letter_to_index(letter: &str) -> Result<usize, MappingError> {
    let trimmed = letter.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(MappingError::InvalidColumnLetter(letter.to_string()));
    }

    let mut index: usize = 0;
    for ch in trimmed.chars() {
        let digit = (ch.to_ascii_uppercase() as u8 - b'A' + 1) as usize;
        index = index
            .checked_mul(26)
            .and_then(|i| i.checked_add(digit))
            .ok_or_else(|| MappingError::ColumnOutOfRange(trimmed.to_string()))?;
    }
    Ok(index - 1)
}

/// Convert a zero-based index back to its column letter (`38` -> `"AM"`).
pub fn index_to_column_letter(index: usize) -> String {
    let mut letters = Vec::new();
    let mut remaining = index;
    loop {
        letters.push((b'A' + (remaining % 26) as u8) as char);
        if remaining < 26 {
            break;
        }
        remaining = remaining / 26 - 1;
    }
    letters.iter().rev().collect()
}

// ============================================================================
// Fields
// ============================================================================

/// The logical columns a learner record is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingField {
    Cohort,
    Email,
    SubmissionStatus,
    LearnerType,
    SubmissionName,
}

impl MappingField {
    pub const ALL: [MappingField; 5] = [
        MappingField::Cohort,
        MappingField::Email,
        MappingField::SubmissionStatus,
        MappingField::LearnerType,
        MappingField::SubmissionName,
    ];

    /// Slot name as stored in configuration (`SUBMISSION_STATUS`).
    pub fn slot_name(&self) -> &'static str {
        match self {
            MappingField::Cohort => "COHORT",
            MappingField::Email => "EMAIL",
            MappingField::SubmissionStatus => "SUBMISSION_STATUS",
            MappingField::LearnerType => "LEARNER_TYPE",
            MappingField::SubmissionName => "SUBMISSION_NAME",
        }
    }

    /// Column heading used in reports and tables.
    pub fn label(&self) -> &'static str {
        match self {
            MappingField::Cohort => "Cohort",
            MappingField::Email => "Email",
            MappingField::SubmissionStatus => "Submission Status",
            MappingField::LearnerType => "Learner Type",
            MappingField::SubmissionName => "Submission Name",
        }
    }
}

impl fmt::Display for MappingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for MappingField {
    type Err = MappingError;

    /// Accepts slot names or labels in any case, with `-`, `_` or spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_uppercase() })
            .collect();
        MappingField::ALL
            .into_iter()
            .find(|field| field.slot_name() == normalized)
            .ok_or_else(|| MappingError::UnknownField(s.to_string()))
    }
}

// ============================================================================
// Mapping
// ============================================================================

/// Zero-based column index for each logical field.
///
/// Indices may repeat across slots; nothing forbids two fields reading the
/// same column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct ColumnMapping {
    pub cohort: usize,
    pub email: usize,
    pub submission_status: usize,
    pub learner_type: usize,
    pub submission_name: usize,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            cohort: DEFAULT_COHORT_INDEX,
            email: DEFAULT_EMAIL_INDEX,
            submission_status: DEFAULT_SUBMISSION_STATUS_INDEX,
            learner_type: DEFAULT_LEARNER_TYPE_INDEX,
            submission_name: DEFAULT_SUBMISSION_NAME_INDEX,
        }
    }
}

impl ColumnMapping {
    pub fn index(&self, field: MappingField) -> usize {
        match field {
            MappingField::Cohort => self.cohort,
            MappingField::Email => self.email,
            MappingField::SubmissionStatus => self.submission_status,
            MappingField::LearnerType => self.learner_type,
            MappingField::SubmissionName => self.submission_name,
        }
    }

    pub fn letter(&self, field: MappingField) -> String {
        index_to_column_letter(self.index(field))
    }

    pub fn set_index(&mut self, field: MappingField, index: usize) {
        let slot = match field {
            MappingField::Cohort => &mut self.cohort,
            MappingField::Email => &mut self.email,
            MappingField::SubmissionStatus => &mut self.submission_status,
            MappingField::LearnerType => &mut self.learner_type,
            MappingField::SubmissionName => &mut self.submission_name,
        };
        *slot = index;
    }

    /// Point `field` at the column named by `letter`.
    ///
    /// On error the mapping is left unchanged.
    pub fn set_letter(&mut self, field: MappingField, letter: &str) -> Result<usize, MappingError> {
        let index = column_letter_to_index(letter)?;
        self.set_index(field, index);
        Ok(index)
    }

    /// Return a copy with `field` remapped, leaving `self` untouched.
    pub fn with_letter(&self, field: MappingField, letter: &str) -> Result<Self, MappingError> {
        let mut mapping = *self;
        mapping.set_letter(field, letter)?;
        Ok(mapping)
    }

    /// `(field, letter, index)` for every slot, in field order.
    pub fn entries(&self) -> Vec<(MappingField, String, usize)> {
        MappingField::ALL
            .into_iter()
            .map(|field| (field, self.letter(field), self.index(field)))
            .collect()
    }
}
