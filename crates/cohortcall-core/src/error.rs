use thiserror::Error;

/// Failures converting a spreadsheet column letter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("Invalid column letter: {0:?} (expected letters A-Z only)")]
    InvalidColumnLetter(String),

    #[error("Column letter out of range: {0}")]
    ColumnOutOfRange(String),

    #[error("Unknown column field: {0}")]
    UnknownField(String),
}

/// Outcomes of projecting tokenized rows that leave no usable records.
///
/// The display strings are shown to the user verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("CSV file contains no data rows.")]
    NoDataRows,

    #[error("Could not find any valid learner data in the file. Please check if the file format and columns are correct.")]
    NoValidLearners,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("There are no learners with 'Not Submitted' status in the selected cohorts.")]
    NoLearners,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_messages_are_user_facing() {
        assert_eq!(
            ProjectionError::NoDataRows.to_string(),
            "CSV file contains no data rows."
        );
        assert!(ProjectionError::NoValidLearners
            .to_string()
            .starts_with("Could not find any valid learner data"));
    }

    #[test]
    fn test_mapping_error_names_input() {
        let err = MappingError::InvalidColumnLetter("A1".to_string());
        assert!(err.to_string().contains("\"A1\""));
    }
}
