use serde::{Deserialize, Serialize};

/// Cohort name used when the mapped cohort cell is blank or missing.
pub const DEFAULT_COHORT: &str = "N/A";

/// Exact status text counted as submitted.
pub const STATUS_SUBMITTED: &str = "Submitted";

/// Exact status text that puts a learner on the call report.
pub const STATUS_NOT_SUBMITTED: &str = "Not Submitted";

/// A normalized learner row. All fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LearnerRecord {
    #[serde(rename = "Cohort")]
    pub cohort: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Submission Status")]
    pub submission_status: String,
    #[serde(rename = "Learner Type")]
    pub learner_type: String,
    #[serde(rename = "Submission Name")]
    pub submission_name: String,
}

impl LearnerRecord {
    /// Key used to attach remarks: `email|cohort|submission name`.
    pub fn remark_key(&self) -> String {
        format!("{}|{}|{}", self.email, self.cohort, self.submission_name)
    }

    pub fn is_submitted(&self) -> bool {
        self.submission_status == STATUS_SUBMITTED
    }

    /// Strictly `"Not Submitted"`; other non-submitted statuses such as
    /// `"Pending"` do not match.
    pub fn is_not_submitted(&self) -> bool {
        self.submission_status == STATUS_NOT_SUBMITTED
    }

    /// Minimal email check: non-empty and contains `@`.
    pub fn has_valid_email(&self) -> bool {
        !self.email.is_empty() && self.email.contains('@')
    }
}
