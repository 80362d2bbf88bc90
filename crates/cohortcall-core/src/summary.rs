//! Cohort filtering and the derived counts shown on the dashboard.
//!
//! Two different "not submitted" predicates live here on purpose:
//! `SubmissionSummary::not_submitted` counts everything that is not exactly
//! `"Submitted"`, while `CohortView::not_submitted` (the call report) only
//! holds rows whose status is exactly `"Not Submitted"`. A `"Pending"` row
//! counts toward the first and never appears in the second.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::{LearnerRecord, STATUS_NOT_SUBMITTED, STATUS_SUBMITTED};

/// Distinct cohorts across all records, in order of first appearance.
pub fn unique_cohorts(records: &[LearnerRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| !r.cohort.is_empty())
        .filter(|r| seen.insert(r.cohort.as_str()))
        .map(|r| r.cohort.clone())
        .collect()
}

/// `(cohort, learner count)` in order of first appearance.
pub fn cohort_counts(records: &[LearnerRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records.iter().filter(|r| !r.cohort.is_empty()) {
        match counts.iter_mut().find(|(cohort, _)| *cohort == record.cohort) {
            Some((_, count)) => *count += 1,
            None => counts.push((record.cohort.clone(), 1)),
        }
    }
    counts
}

/// Records whose cohort is one of `selected`.
pub fn filter_by_cohorts<'a, S: AsRef<str>>(
    records: &'a [LearnerRecord],
    selected: &[S],
) -> Vec<&'a LearnerRecord> {
    let selected: HashSet<&str> = selected.iter().map(|s| s.as_ref()).collect();
    records
        .iter()
        .filter(|r| selected.contains(r.cohort.as_str()))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct SubmissionSummary {
    pub submitted: usize,
    /// Everything in the selection that is not exactly `"Submitted"`.
    pub not_submitted: usize,
}

impl SubmissionSummary {
    pub fn from_records(records: &[&LearnerRecord]) -> Self {
        let submitted = records.iter().filter(|r| r.is_submitted()).count();
        Self {
            submitted,
            not_submitted: records.len() - submitted,
        }
    }

    pub fn total(&self) -> usize {
        self.submitted + self.not_submitted
    }

    /// Share of `count` in the total, as a percentage; 0 for an empty selection.
    pub fn percent(&self, count: usize) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            count as f64 / self.total() as f64 * 100.0
        }
    }

    /// Chart buckets, submitted first.
    pub fn buckets(&self) -> [(&'static str, usize); 2] {
        [
            (STATUS_SUBMITTED, self.submitted),
            (STATUS_NOT_SUBMITTED, self.not_submitted),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct LearnerTypeCount {
    pub learner_type: String,
    pub count: usize,
}

/// Count trimmed, non-empty learner types, in order of first appearance.
pub fn learner_type_summary(records: &[&LearnerRecord]) -> Vec<LearnerTypeCount> {
    let mut counts: Vec<LearnerTypeCount> = Vec::new();
    for record in records {
        let learner_type = record.learner_type.trim();
        if learner_type.is_empty() {
            continue;
        }
        match counts.iter_mut().find(|c| c.learner_type == learner_type) {
            Some(entry) => entry.count += 1,
            None => counts.push(LearnerTypeCount {
                learner_type: learner_type.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

/// Everything derived from one record set and one cohort selection.
#[derive(Debug, Clone)]
pub struct CohortView<'a> {
    pub filtered: Vec<&'a LearnerRecord>,
    pub summary: SubmissionSummary,
    /// Exactly `"Not Submitted"`; feeds the report.
    pub not_submitted: Vec<&'a LearnerRecord>,
    /// Learner types among `not_submitted` only.
    pub learner_types: Vec<LearnerTypeCount>,
}

impl<'a> CohortView<'a> {
    pub fn new<S: AsRef<str>>(records: &'a [LearnerRecord], selected: &[S]) -> Self {
        let filtered = filter_by_cohorts(records, selected);
        let summary = SubmissionSummary::from_records(&filtered);
        let not_submitted: Vec<&LearnerRecord> = filtered
            .iter()
            .copied()
            .filter(|r| r.is_not_submitted())
            .collect();
        let learner_types = learner_type_summary(&not_submitted);
        Self {
            filtered,
            summary,
            not_submitted,
            learner_types,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn learner(cohort: &str, email: &str, status: &str, learner_type: &str) -> LearnerRecord {
        LearnerRecord {
            cohort: cohort.to_string(),
            email: email.to_string(),
            submission_status: status.to_string(),
            learner_type: learner_type.to_string(),
            submission_name: "Quiz1".to_string(),
        }
    }

    fn sample() -> Vec<LearnerRecord> {
        vec![
            learner("B", "1@x.com", "Submitted", "Local"),
            learner("A", "2@x.com", "Not Submitted", "International"),
            learner("B", "3@x.com", "Pending", "Local"),
            learner("A", "4@x.com", "Not Submitted", " International "),
            learner("C", "5@x.com", "Not Submitted", ""),
        ]
    }

    #[test]
    fn test_unique_cohorts_first_appearance() {
        assert_eq!(unique_cohorts(&sample()), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_cohort_counts() {
        assert_eq!(
            cohort_counts(&sample()),
            vec![("B".to_string(), 2), ("A".to_string(), 2), ("C".to_string(), 1)]
        );
    }

    #[test]
    fn test_filter_by_cohorts() {
        let records = sample();
        let filtered = filter_by_cohorts(&records, &["A"]);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.cohort == "A"));
        assert!(filter_by_cohorts::<&str>(&records, &[]).is_empty());
    }

    #[test]
    fn test_summary_counts_pending_as_not_submitted() {
        let records = sample();
        let view = CohortView::new(&records, &["B"]);
        assert_eq!(view.summary, SubmissionSummary { submitted: 1, not_submitted: 1 });
        // Pending is not on the report.
        assert!(view.not_submitted.is_empty());
    }

    #[test]
    fn test_learner_types_over_not_submitted_only() {
        let records = sample();
        let view = CohortView::new(&records, &["A", "B", "C"]);
        assert_eq!(view.not_submitted.len(), 3);
        assert_eq!(
            view.learner_types,
            vec![LearnerTypeCount {
                learner_type: "International".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn test_percent() {
        let summary = SubmissionSummary { submitted: 1, not_submitted: 3 };
        assert_eq!(summary.percent(summary.submitted), 25.0);
        assert_eq!(SubmissionSummary::default().percent(0), 0.0);
    }

    #[test]
    fn test_buckets_order() {
        let summary = SubmissionSummary { submitted: 2, not_submitted: 5 };
        assert_eq!(summary.buckets(), [("Submitted", 2), ("Not Submitted", 5)]);
    }
}
