//! Plain-text rendering for terminal output.

use cohortcall_core::store::UploadRecord;
use cohortcall_core::summary::cohort_counts;
use cohortcall_core::{CohortView, ColumnMapping, UploadSession};

/// Width of the label column in aligned listings
const LABEL_WIDTH: usize = 20;

/// Longest cohort or type name shown before truncation
const MAX_NAME_LENGTH: usize = 40;

pub fn join<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// `count (pct%)` with one decimal place
pub fn format_count(count: usize, percent: f64) -> String {
    format!("{} ({:.1}%)", count, percent)
}

pub fn print_mapping(mapping: &ColumnMapping) {
    for (field, letter, index) in mapping.entries() {
        println!("  {:<width$} {:<4} ({})", field.label(), letter, index, width = LABEL_WIDTH);
    }
}

pub fn print_inspect(session: &UploadSession) {
    println!(
        "File: {} ({} rows including header)",
        session.file_name(),
        session.rows().len()
    );

    let check = session.header_check();
    match check.message() {
        Some(message) => println!("Header check: {}", message),
        None => println!("Header check: all required columns present"),
    }

    println!("Column mapping:");
    print_mapping(session.mapping());

    if let Some(error) = session.error() {
        println!("Error: {}", error);
        return;
    }

    let projection = session.projection();
    println!(
        "Learners: {} kept, {} rejected (no valid email)",
        projection.records.len(),
        projection.rejected
    );
    println!("Cohorts:");
    for (cohort, count) in cohort_counts(session.records()) {
        println!("  {:<width$} {}", truncate(&cohort, MAX_NAME_LENGTH), count, width = LABEL_WIDTH);
    }
}

pub fn print_summary(selected: &[String], view: &CohortView<'_>) {
    println!("Selected cohorts: {}", join(selected));
    if view.is_empty() {
        println!("No learners in the selected cohorts.");
        return;
    }

    let summary = &view.summary;
    println!("Total learners selected: {}", summary.total());
    for (name, count) in summary.buckets() {
        println!(
            "  {:<width$} {}",
            name,
            format_count(count, summary.percent(count)),
            width = LABEL_WIDTH
        );
    }

    println!("Not submitted by learner type:");
    if view.learner_types.is_empty() {
        println!("  (none)");
    }
    for entry in &view.learner_types {
        println!(
            "  {:<width$} {}",
            truncate(&entry.learner_type, MAX_NAME_LENGTH),
            entry.count,
            width = LABEL_WIDTH
        );
    }
}

pub fn print_session(session: &UploadSession, age: &str) {
    println!("File: {} (saved {})", session.file_name(), age);
    match session.error() {
        Some(error) => println!("Error: {}", error),
        None => println!("Learners: {}", session.records().len()),
    }
    if session.selected().is_empty() {
        println!("Selected cohorts: (none)");
    } else {
        println!("Selected cohorts: {}", join(session.selected()));
    }
    println!("Remarks: {}", session.remarks().len());
}

pub fn print_uploads(entries: &[UploadRecord]) {
    if entries.is_empty() {
        println!("No uploads recorded");
        return;
    }
    for entry in entries {
        println!(
            "{}  {:<width$} {} learner(s), {} bytes",
            entry.uploaded_at.format("%Y-%m-%d %H:%M"),
            truncate(&entry.file_name, MAX_NAME_LENGTH),
            entry.row_count,
            entry.file_size,
            width = LABEL_WIDTH
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World", 8), "Hello...");
        assert_eq!(truncate("Hi", 2), "Hi");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, 33.333), "1 (33.3%)");
        assert_eq!(format_count(0, 0.0), "0 (0.0%)");
    }

    #[test]
    fn test_join() {
        assert_eq!(join(["A", "B"]), "A, B");
        assert_eq!(join(Vec::<String>::new()), "");
    }
}
