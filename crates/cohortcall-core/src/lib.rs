//! Core library for cohortcall.
//!
//! Turns a learner-tracking spreadsheet export into cohort summaries and
//! "not submitted" call reports:
//!
//! - `csv`: tokenizer for permissive RFC4180-style text, plus report quoting
//! - `mapping`: spreadsheet column letters and the five-slot `ColumnMapping`
//! - `projection`: mapped rows into `LearnerRecord`s
//! - `summary`: cohort filtering and submission/learner-type counts
//! - `report`: not-submitted report rows, CSV output, email payload
//! - `session`: one uploaded file with its mapping, selection and remarks
//! - `store`: on-disk session snapshot and upload log
//! - `config`: persisted column letters and defaults

pub mod config;
pub mod csv;
pub mod error;
pub mod headers;
pub mod mapping;
pub mod models;
pub mod projection;
pub mod report;
pub mod session;
pub mod store;
pub mod summary;

pub use config::Config;
pub use error::{MappingError, ProjectionError, ReportError};
pub use mapping::{column_letter_to_index, index_to_column_letter, ColumnMapping, MappingField};
pub use models::{LearnerRecord, RemarkBook, RemarkEntry};
pub use projection::{project, Projection};
pub use session::UploadSession;
pub use summary::{CohortView, LearnerTypeCount, SubmissionSummary};
