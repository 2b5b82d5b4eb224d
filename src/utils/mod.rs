//! Utility functions.
//!
//! Collection of helper functions used across the bot.

use teloxide::types::User;

/// Format a user for display.
///
/// Prefers @username, falls back to the first name, then to the raw id.
pub fn display_name(user: &User) -> String {
    match user.username.as_deref() {
        Some(u) if !u.is_empty() => format!("@{}", u),
        _ if !user.first_name.is_empty() => user.first_name.clone(),
        _ => user.id.0.to_string(),
    }
}

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Format a duration with more detail (hours + minutes).
pub fn format_duration_full(secs: u64) -> String {
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86400 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins > 0 {
            format!("{}h {}m", hours, mins)
        } else {
            format!("{}h", hours)
        }
    } else {
        let days = secs / 86400;
        let hours = (secs % 86400) / 3600;
        if hours > 0 {
            format!("{}d {}h", days, hours)
        } else {
            format!("{}d", days)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_full() {
        assert_eq!(format_duration_full(45), "45s");
        assert_eq!(format_duration_full(300), "5m");
        assert_eq!(format_duration_full(3600), "1h");
        assert_eq!(format_duration_full(9000), "2h 30m");
        assert_eq!(format_duration_full(90000), "1d 1h");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a<b>&c"), "a&lt;b&gt;&amp;c");
    }
}
