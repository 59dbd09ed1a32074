use serde::{Deserialize, Serialize};

/// A single sample in a time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub timestamp: i64,
    pub value: f64,
}

/// A gauge series in the shape the monitoring backend's series API expects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub metric: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub points: Vec<MetricPoint>,
    pub tags: Vec<String>,
}

impl MetricSeries {
    pub fn gauge(metric: &str, timestamp: i64, value: f64, tags: Vec<String>) -> Self {
        Self {
            metric: metric.to_string(),
            kind: "gauge".to_string(),
            points: vec![MetricPoint { timestamp, value }],
            tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gauge_serialization() {
        let series = MetricSeries::gauge("datadog.agent.package.size", 10, 250.0, vec!["os:debian".into()]);
        let json = serde_json::to_value(&series).unwrap();

        assert_eq!(json["metric"], "datadog.agent.package.size");
        assert_eq!(json["type"], "gauge");
        assert_eq!(json["points"][0]["value"], 250.0);
        assert_eq!(json["tags"][0], "os:debian");
    }
}
