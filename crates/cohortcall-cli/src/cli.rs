use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cohortcall", version)]
#[command(about = "Summarize learner submissions by cohort and build call reports from CSV exports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Also write logs to cohortcall.log in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(flatten)]
    pub columns: ColumnArgs,
}

/// Per-invocation overrides of the configured column letters.
#[derive(Args, Debug, Clone, Default)]
pub struct ColumnArgs {
    /// Column letter holding the cohort
    #[arg(long, global = true, value_name = "LETTER")]
    pub cohort_col: Option<String>,

    /// Column letter holding the learner email
    #[arg(long, global = true, value_name = "LETTER")]
    pub email_col: Option<String>,

    /// Column letter holding the submission status
    #[arg(long, global = true, value_name = "LETTER")]
    pub status_col: Option<String>,

    /// Column letter holding the learner type
    #[arg(long, global = true, value_name = "LETTER")]
    pub type_col: Option<String>,

    /// Column letter holding the submission name
    #[arg(long, global = true, value_name = "LETTER")]
    pub name_col: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct SelectionArgs {
    /// Cohort to include (repeatable)
    #[arg(short, long = "cohort", value_name = "COHORT")]
    pub cohorts: Vec<String>,

    /// Include every cohort in the file
    #[arg(long, conflicts_with = "cohorts")]
    pub all: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show rows, header check, column mapping and cohorts for a file
    Inspect {
        file: PathBuf,
    },

    /// Submission counts and learner types for the selected cohorts
    Summary {
        file: PathBuf,
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Write the "Not Submitted" call report
    Report {
        file: PathBuf,
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output path (default: cohort_report_<date>.csv)
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Print the email report payload instead of writing CSV.
        /// Without RECIPIENT the last one used is taken.
        #[arg(long, value_name = "RECIPIENT", num_args = 0..=1)]
        json: Option<Option<String>>,
    },

    /// Record a remark for one learner
    Remark {
        file: PathBuf,
        #[arg(long)]
        email: String,
        #[arg(long)]
        cohort: String,
        #[arg(long)]
        submission: String,
        /// Remark text
        text: String,
    },

    /// Show the configured column mapping, or change one column
    Map {
        /// Field to change (cohort, email, submission_status, learner_type, submission_name)
        #[arg(requires = "letter")]
        field: Option<String>,
        /// New column letter, e.g. AM
        letter: Option<String>,
    },

    /// Inspect or discard the saved session
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// List previously processed uploads
    Uploads,
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// Summarize the saved session
    Show,
    /// Delete the saved session
    Clear,
}
