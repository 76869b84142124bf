//! Format - Formatting Utilities

use chrono::{DateTime, Local};

/// Format a local datetime for display
pub fn format_local_datetime(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format just the time portion
pub fn format_time(dt: &DateTime<Local>) -> String {
    dt.format("%H:%M:%S").to_string()
}

/// Truncate a string to max length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}

/// Empty display values render as a dash
pub fn dash_if_empty(s: &str) -> String {
    if s.trim().is_empty() {
        "-".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long label", 10), "a very ...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_dash_if_empty() {
        assert_eq!(dash_if_empty(""), "-");
        assert_eq!(dash_if_empty("  "), "-");
        assert_eq!(dash_if_empty("x"), "x");
    }
}
