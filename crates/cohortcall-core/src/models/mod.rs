//! Data models shared between the pipeline and its front ends.
//!
//! - `LearnerRecord`: one projected learner row
//! - `RemarkEntry`, `RemarkBook`: caller-entered remarks keyed per learner

pub mod learner;
pub mod remark;

pub use learner::{LearnerRecord, DEFAULT_COHORT, STATUS_NOT_SUBMITTED, STATUS_SUBMITTED};
pub use remark::{RemarkBook, RemarkEntry};
