//! Small formatting helpers shared by page handlers.

use chrono::{DateTime, NaiveDateTime};

const DISPLAY_FORMAT: &str = "%b %-d, %-I:%M %p";

/// Formats a server timestamp as `Jan 10, 7:57 PM`.
///
/// Empty input yields `N/A`; input that is not a timestamp is returned as-is.
pub fn format_date_time(raw: Option<&str>) -> String {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return "N/A".to_string();
    };

    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return stamp.format(DISPLAY_FORMAT).to_string();
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|stamp| stamp.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_naive_server_timestamps() {
        assert_eq!(
            format_date_time(Some("2026-01-10T19:57:22.770570")),
            "Jan 10, 7:57 PM"
        );
        assert_eq!(format_date_time(Some("2026-03-04 08:05:00")), "Mar 4, 8:05 AM");
    }

    #[test]
    fn formats_offset_timestamps_in_their_own_zone() {
        assert_eq!(
            format_date_time(Some("2026-01-10T00:15:00+05:30")),
            "Jan 10, 12:15 AM"
        );
    }

    #[test]
    fn empty_and_garbage_inputs() {
        assert_eq!(format_date_time(None), "N/A");
        assert_eq!(format_date_time(Some("")), "N/A");
        assert_eq!(format_date_time(Some("tomorrow")), "tomorrow");
    }
}
