/// Header of the pull request size report table
pub const REPORT_HEADER: &str = "|package|diff|status|size|ancestor|threshold|\n|--|--|--|--|--|--|";

/// Render report rows under the table header
pub fn render_report(rows: &[String]) -> String {
    let mut out = String::from(REPORT_HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_report() {
        let rows = vec![
            "|datadog-agent-aarch64-suse|1.00MB|⚠️|69.00MB|68.00MB|70.00MB|".to_string(),
            "|datadog-iot-agent-x86_64-rpm|-9.00MB|✅|69.00MB|78.00MB|70.00MB|".to_string(),
        ];
        let report = render_report(&rows);
        let lines: Vec<_> = report.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "|package|diff|status|size|ancestor|threshold|");
        assert_eq!(lines[3], rows[1]);
    }

    #[test]
    fn test_render_empty_report() {
        assert_eq!(render_report(&[]).lines().count(), 2);
    }
}
