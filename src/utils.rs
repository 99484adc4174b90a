//! Utility functions

use std::time::Duration;

/// Format a duration as `m:ss` (minutes unpadded, whole seconds floored)
pub fn format_time(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(Duration::ZERO), "0:00");
        assert_eq!(format_time(Duration::from_secs(59)), "0:59");
        assert_eq!(format_time(Duration::from_secs(60)), "1:00");
        assert_eq!(format_time(Duration::from_secs(125)), "2:05");
        assert_eq!(format_time(Duration::from_secs(3661)), "61:01");
    }

    #[test]
    fn test_format_time_floors_fractions() {
        assert_eq!(format_time(Duration::from_millis(59_999)), "0:59");
    }
}
