//! Advisory check of the header row.
//!
//! The export is expected to carry a handful of named columns. A missing name
//! is reported to the user but never blocks projection, which works purely
//! on column positions.

use serde::Serialize;

/// Header names an export should contain, matched case-insensitively.
pub const REQUIRED_HEADERS: [&str; 4] = ["Learner Type", "Submission Status", "AO Date", "Email"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCheck {
    pub missing: Vec<String>,
}

impl HeaderCheck {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }

    /// User-facing description of what is missing, if anything.
    pub fn message(&self) -> Option<String> {
        if self.is_valid() {
            return None;
        }
        let names: Vec<String> = self.missing.iter().map(|m| format!("'{}'", m)).collect();
        Some(format!(
            "The CSV file is missing the following required columns: {}.",
            names.join(", ")
        ))
    }
}

/// Compare `header` with [`REQUIRED_HEADERS`], ignoring case and surrounding space.
pub fn check_headers<S: AsRef<str>>(header: &[S]) -> HeaderCheck {
    let present: Vec<String> = header
        .iter()
        .map(|h| h.as_ref().trim().to_lowercase())
        .collect();
    let missing = REQUIRED_HEADERS
        .iter()
        .filter(|required| !present.contains(&required.to_lowercase()))
        .map(|required| required.to_string())
        .collect();
    HeaderCheck { missing }
}
