//! The "not submitted" call report and its email payload.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::csv::write_rows;
use crate::error::ReportError;
use crate::models::{LearnerRecord, RemarkBook};
use crate::summary::CohortView;

/// Report columns, in output order.
pub const REPORT_HEADERS: [&str; 6] = [
    "Email",
    "Cohort",
    "Submission Status",
    "Learner Type",
    "Submission Name",
    "Remarks",
];

pub const REPORT_TYPE_WITH_REMARKS: &str = "Calling Report with Remarks";
pub const REPORT_TYPE_NO_SUBMISSION: &str = "No Submission Report";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ReportRow {
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Cohort")]
    pub cohort: String,
    #[serde(rename = "Submission Status")]
    pub submission_status: String,
    #[serde(rename = "Learner Type")]
    pub learner_type: String,
    #[serde(rename = "Submission Name")]
    pub submission_name: String,
    #[serde(rename = "Remarks")]
    pub remarks: String,
}

impl ReportRow {
    pub fn new(learner: &LearnerRecord, remarks: &RemarkBook) -> Self {
        Self {
            email: learner.email.clone(),
            cohort: learner.cohort.clone(),
            submission_status: learner.submission_status.clone(),
            learner_type: learner.learner_type.clone(),
            submission_name: learner.submission_name.clone(),
            remarks: remarks.get_for(learner).to_string(),
        }
    }

    fn fields(&self) -> [&str; 6] {
        [
            self.email.as_str(),
            self.cohort.as_str(),
            self.submission_status.as_str(),
            self.learner_type.as_str(),
            self.submission_name.as_str(),
            self.remarks.as_str(),
        ]
    }
}

/// One row per strictly not-submitted learner in the view, with its remark.
pub fn build_report(view: &CohortView<'_>, remarks: &RemarkBook) -> Result<Vec<ReportRow>, ReportError> {
    if view.not_submitted.is_empty() {
        return Err(ReportError::NoLearners);
    }
    Ok(view
        .not_submitted
        .iter()
        .map(|learner| ReportRow::new(learner, remarks))
        .collect())
}

/// Render report rows as CSV text, header first, no trailing newline.
pub fn to_csv(rows: &[ReportRow]) -> String {
    write_rows(&REPORT_HEADERS, rows.iter().map(|row| row.fields()))
}

/// `cohort_report_<YYYY-MM-DD>.csv` for the given day.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("cohort_report_{}.csv", date.format("%Y-%m-%d"))
}

/// Report file name for today's UTC date.
pub fn default_report_file_name() -> String {
    report_file_name(Utc::now().date_naive())
}

/// Payload handed to the external mail service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct EmailReportRequest {
    pub recipient_email: String,
    pub cohort_details: String,
    pub report_type: String,
    pub has_remarks: bool,
    pub report_data: Vec<ReportRow>,
}

impl EmailReportRequest {
    pub fn new<S: AsRef<str>>(recipient_email: &str, selected_cohorts: &[S], rows: Vec<ReportRow>) -> Self {
        let has_remarks = rows.iter().any(|row| !row.remarks.is_empty());
        let cohort_details = selected_cohorts
            .iter()
            .map(|c| c.as_ref())
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            recipient_email: recipient_email.trim().to_string(),
            cohort_details,
            report_type: if has_remarks {
                REPORT_TYPE_WITH_REMARKS
            } else {
                REPORT_TYPE_NO_SUBMISSION
            }
            .to_string(),
            has_remarks,
            report_data: rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learner(email: &str, status: &str, submission: &str) -> LearnerRecord {
        LearnerRecord {
            cohort: "Cohort A".to_string(),
            email: email.to_string(),
            submission_status: status.to_string(),
            learner_type: "Local".to_string(),
            submission_name: submission.to_string(),
        }
    }

    #[test]
    fn test_build_report_uses_strict_not_submitted() {
        let records = vec![
            learner("a@x.com", "Not Submitted", "Quiz1"),
            learner("b@x.com", "Pending", "Quiz1"),
            learner("c@x.com", "Submitted", "Quiz1"),
        ];
        let view = CohortView::new(&records, &["Cohort A"]);
        let rows = build_report(&view, &RemarkBook::new()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].email, "a@x.com");
        assert_eq!(rows[0].remarks, "");
    }

    #[test]
    fn test_build_report_empty_is_error() {
        let records = vec![learner("a@x.com", "Submitted", "Quiz1")];
        let view = CohortView::new(&records, &["Cohort A"]);
        assert_eq!(build_report(&view, &RemarkBook::new()), Err(ReportError::NoLearners));
    }

    #[test]
    fn test_to_csv_header_and_quoting() {
        let records = vec![learner("a@x.com", "Not Submitted", "Quiz 1, part \"b\"")];
        let view = CohortView::new(&records, &["Cohort A"]);
        let mut remarks = RemarkBook::new();
        remarks.set_for(&records[0], "No answer");
        let rows = build_report(&view, &remarks).unwrap();

        let csv = to_csv(&rows);
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines[0], "Email,Cohort,Submission Status,Learner Type,Submission Name,Remarks");
        assert_eq!(
            lines[1],
            "a@x.com,Cohort A,Not Submitted,Local,\"Quiz 1, part \"\"b\"\"\",No answer"
        );
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_report_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(report_file_name(date), "cohort_report_2026-03-07.csv");
    }

    #[test]
    fn test_email_request_report_type() {
        let plain = ReportRow::new(&learner("a@x.com", "Not Submitted", "Q"), &RemarkBook::new());
        let request = EmailReportRequest::new(" lead@x.com ", &["Cohort A", "Cohort B"], vec![plain.clone()]);
        assert_eq!(request.recipient_email, "lead@x.com");
        assert_eq!(request.cohort_details, "Cohort A, Cohort B");
        assert_eq!(request.report_type, REPORT_TYPE_NO_SUBMISSION);
        assert!(!request.has_remarks);

        let mut remarked = plain;
        remarked.remarks = "Called twice".to_string();
        let request = EmailReportRequest::new("lead@x.com", &["Cohort A"], vec![remarked]);
        assert_eq!(request.report_type, REPORT_TYPE_WITH_REMARKS);
        assert!(request.has_remarks);
    }

    #[test]
    fn test_email_request_json_keys() {
        let request = EmailReportRequest::new::<&str>("lead@x.com", &[], Vec::new());
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("recipientEmail").is_some());
        assert!(json.get("reportData").unwrap().as_array().unwrap().is_empty());
    }
}
