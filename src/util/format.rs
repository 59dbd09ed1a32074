const BYTES_PER_MB: f64 = 1_000_000.0;

/// Format a byte count as megabytes with two decimals, e.g. "69.00MB"
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2}MB", bytes as f64 / BYTES_PER_MB)
}

/// Format a signed byte delta as megabytes, e.g. "-9.00MB"
pub fn format_delta_mb(delta: i128) -> String {
    format!("{:.2}MB", delta as f64 / BYTES_PER_MB)
}

/// Format a Unix timestamp as YYYY-MM-DD string
pub fn format_timestamp(timestamp: i64) -> String {
    use time::OffsetDateTime;
    use time::macros::format_description;

    if timestamp == 0 {
        return "unknown".to_string();
    }

    OffsetDateTime::from_unix_timestamp(timestamp)
        .ok()
        .and_then(|dt| {
            let format = format_description!("[year]-[month]-[day]");
            dt.format(&format).ok()
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Current Unix time in seconds
pub fn now_unix() -> i64 {
    time::OffsetDateTime::now_utc().unix_timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mb() {
        assert_eq!(format_mb(69_000_000), "69.00MB");
        assert_eq!(format_mb(139_000_000), "139.00MB");
        assert_eq!(format_mb(43_008), "0.04MB");
        assert_eq!(format_mb(0), "0.00MB");
    }

    #[test]
    fn test_format_delta_mb() {
        assert_eq!(format_delta_mb(1_000_000), "1.00MB");
        assert_eq!(format_delta_mb(-9_000_000), "-9.00MB");
        assert_eq!(format_delta_mb(71_000_000), "71.00MB");
    }

    #[test]
    fn test_format_timestamp() {
        let ts = 1700000000; // Nov 14, 2023 approximately
        let formatted = format_timestamp(ts);
        assert!(formatted.starts_with("2023-"));

        assert_eq!(format_timestamp(0), "unknown");
    }
}
