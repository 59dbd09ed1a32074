use serde_json::{Map, Value};

use crate::model::TIMESTAMP_KEY;

/// One leaf of a nested size tree: the keys leading to it and its value
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEntry {
    pub keys: Vec<String>,
    pub value: Value,
}

impl FlatEntry {
    /// Number of columns when rendered as a row (keys plus value)
    pub fn width(&self) -> usize {
        self.keys.len() + 1
    }
}

/// Flatten a nested mapping into one entry per leaf, in key order
///
/// Keys equal to the reserved timestamp key are skipped at every level.
pub fn flatten(tree: &Map<String, Value>) -> Vec<FlatEntry> {
    let mut entries = Vec::new();
    let mut keys = Vec::new();
    flatten_into(tree, &mut keys, &mut entries);
    entries
}

fn flatten_into(tree: &Map<String, Value>, keys: &mut Vec<String>, entries: &mut Vec<FlatEntry>) {
    for (key, value) in tree {
        if key == TIMESTAMP_KEY {
            continue;
        }
        keys.push(key.clone());
        match value {
            Value::Object(child) => flatten_into(child, keys, entries),
            leaf => entries.push(FlatEntry {
                keys: keys.clone(),
                value: leaf.clone(),
            }),
        }
        keys.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn row(keys: &[&str], value: Value) -> FlatEntry {
        FlatEntry {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            value,
        }
    }

    #[test]
    fn test_no_package() {
        assert_eq!(flatten(&Map::new()), vec![]);
    }

    #[test]
    fn test_single_package() {
        let t = tree(json!({"key": "value"}));
        assert_eq!(flatten(&t), vec![row(&["key"], json!("value"))]);
    }

    #[test]
    fn test_multiple_levels() {
        let t = tree(json!({"key": {"key2": 42}}));
        assert_eq!(flatten(&t), vec![row(&["key", "key2"], json!(42))]);
    }

    #[test]
    fn test_ignore_timestamp_root() {
        let t = tree(json!({"key": {"key2": 42}, "timestamp": 1234567890}));
        assert_eq!(flatten(&t), vec![row(&["key", "key2"], json!(42))]);
    }

    #[test]
    fn test_ignore_timestamp_nested() {
        let t = tree(json!({"key": {"key2": 42, "timestamp": 1234567890}}));
        assert_eq!(flatten(&t), vec![row(&["key", "key2"], json!(42))]);
    }

    #[test]
    fn test_timestamp_subtree_skipped_siblings_kept() {
        let t = tree(json!({
            "a": {"timestamp": {"hidden": 1}, "b": {"c": 2}},
            "d": 3
        }));
        assert_eq!(
            flatten(&t),
            vec![row(&["a", "b", "c"], json!(2)), row(&["d"], json!(3))]
        );
    }

    #[test]
    fn test_row_width_is_depth_plus_one() {
        let t = tree(json!({
            "c1": {"amd64": {"datadog-agent": {"deb": 1, "rpm": 2}}},
            "c2": {"arm64": {"datadog-iot-agent": {"deb": 3}}}
        }));
        let entries = flatten(&t);

        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.width() == 5));
    }

    #[test]
    fn test_insertion_order_is_kept() {
        let t = tree(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<_> = flatten(&t).into_iter().map(|e| e.keys[0].clone()).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }
}
