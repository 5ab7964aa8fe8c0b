//! Formatting utilities for human-readable output.
//!
//! This module provides consistent formatting for record timestamps and
//! other display values across the UI.

use chrono::{DateTime, Utc};

/// Format an ISO-8601 timestamp to human-readable relative time.
///
/// # Arguments
///
/// * `created_at` - RFC 3339 timestamp string as stored on records
///
/// # Returns
///
/// A human-readable string like "Just now", "5 mins ago", "2 hours ago", etc.
/// Unparsable input renders as "Unknown".
///
/// # Examples
///
/// ```ignore
/// use nichescout::utils::formatting::format_created_at;
///
/// assert_eq!(format_created_at("not a timestamp"), "Unknown");
/// ```
pub fn format_created_at(created_at: &str) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(created_at) else {
        return "Unknown".to_string();
    };

    let elapsed = Utc::now().signed_duration_since(parsed.with_timezone(&Utc));
    format_elapsed(elapsed.num_seconds().max(0) as u64)
}

/// Format elapsed seconds to a human-readable string.
///
/// # Examples
///
/// ```ignore
/// use nichescout::utils::formatting::format_elapsed;
///
/// assert_eq!(format_elapsed(30), "Just now");
/// assert_eq!(format_elapsed(120), "2 mins ago");
/// assert_eq!(format_elapsed(7200), "2 hours ago");
/// ```
pub fn format_elapsed(seconds: u64) -> String {
    match seconds {
        0..=59 => "Just now".to_string(),
        60..=3599 => {
            let mins = seconds / 60;
            if mins == 1 {
                "1 min ago".to_string()
            } else {
                format!("{} mins ago", mins)
            }
        }
        3600..=86399 => {
            let hours = seconds / 3600;
            if hours == 1 {
                "1 hour ago".to_string()
            } else {
                format!("{} hours ago", hours)
            }
        }
        _ => {
            let days = seconds / 86400;
            if days == 1 {
                "1 day ago".to_string()
            } else {
                format!("{} days ago", days)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed_just_now() {
        assert_eq!(format_elapsed(0), "Just now");
        assert_eq!(format_elapsed(59), "Just now");
    }

    #[test]
    fn test_format_elapsed_minutes() {
        assert_eq!(format_elapsed(60), "1 min ago");
        assert_eq!(format_elapsed(120), "2 mins ago");
        assert_eq!(format_elapsed(3599), "59 mins ago");
    }

    #[test]
    fn test_format_elapsed_hours() {
        assert_eq!(format_elapsed(3600), "1 hour ago");
        assert_eq!(format_elapsed(86399), "23 hours ago");
    }

    #[test]
    fn test_format_elapsed_days() {
        assert_eq!(format_elapsed(86400), "1 day ago");
        assert_eq!(format_elapsed(31536000), "365 days ago");
    }

    #[test]
    fn test_format_created_at_invalid() {
        assert_eq!(format_created_at(""), "Unknown");
        assert_eq!(format_created_at("yesterday"), "Unknown");
    }

    #[test]
    fn test_format_created_at_recent() {
        let recent = Utc::now().to_rfc3339();
        assert_eq!(format_created_at(&recent), "Just now");
    }

    #[test]
    fn test_format_created_at_future_clamps_to_now() {
        let future = (Utc::now() + chrono::Duration::hours(2)).to_rfc3339();
        assert_eq!(format_created_at(&future), "Just now");
    }
}
