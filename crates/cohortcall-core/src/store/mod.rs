//! Local storage for resuming work on an upload.
//!
//! Data is kept as JSON files in the cache directory:
//! - `session.json`: the last upload, its mapping, selection and remarks
//! - `uploads.json`: a log of successfully processed files

pub mod session;
pub mod uploads;

pub use session::{SessionSnapshot, SessionStore};
pub use uploads::{UploadLog, UploadRecord};

use chrono::{DateTime, Utc};

/// Human-readable age of a timestamp ("just now", "5m ago", "2h ago", "3d ago").
pub fn age_display(at: DateTime<Utc>) -> String {
    let minutes = (Utc::now() - at).num_minutes();
    if minutes < 1 {
        // Also covers clock skew
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        if minutes % 60 >= 30 {
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        if (minutes % 1440) / 60 >= 12 {
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_age_display() {
        let now = Utc::now();
        assert_eq!(age_display(now), "just now");
        assert_eq!(age_display(now + Duration::minutes(5)), "just now");
        assert_eq!(age_display(now - Duration::minutes(5)), "5m ago");
        assert_eq!(age_display(now - Duration::minutes(95)), "2h ago");
        assert_eq!(age_display(now - Duration::minutes(65)), "1h ago");
        assert_eq!(age_display(now - Duration::days(3)), "3d ago");
    }
}
