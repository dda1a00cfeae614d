//! Formatting helpers for table cells

use chrono::{Local, TimeZone};

/// Format a TestRail timestamp (Unix seconds) as local date/time.
///
/// Returns "N/A" when the timestamp is missing or out of range.
pub fn format_timestamp(timestamp: Option<i64>) -> String {
    let Some(secs) = timestamp.filter(|s| *s > 0) else {
        return "N/A".to_string();
    };

    match Local.timestamp_opt(secs, 0) {
        chrono::LocalResult::Single(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        _ => "N/A".to_string(),
    }
}

/// Cell text for an optional value, `-` when absent or blank
pub fn or_dash(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}

/// Shorten long text to `max` characters, marking the cut with `...`
pub fn truncate(text: &str, max: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() <= max && !text.contains('\n') {
        return first_line.to_string();
    }
    let cut: String = first_line.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_valid() {
        let result = format_timestamp(Some(1_736_942_400));
        assert!(result.starts_with("2025-01-1"));
    }

    #[test]
    fn test_format_timestamp_missing() {
        assert_eq!(format_timestamp(None), "N/A");
        assert_eq!(format_timestamp(Some(0)), "N/A");
    }

    #[test]
    fn test_or_dash() {
        assert_eq!(or_dash(Some("REF-1")), "REF-1");
        assert_eq!(or_dash(Some("  ")), "-");
        assert_eq!(or_dash(None), "-");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a much longer message", 10), "a much ...");
        assert_eq!(truncate("line one\nline two", 40), "line one...");
    }
}
