use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::LookupPath;

/// Reserved key holding a generation timestamp at any nesting level
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Historical package sizes: `{commit: {arch: {flavor: {os: bytes}}}}`
///
/// The root map is the commit index. Key order is insertion order, which keeps
/// flattening deterministic. The store is loaded and saved by the caller; this
/// type only mutates the in-memory tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SizeStore {
    root: Map<String, Value>,
}

impl SizeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.commits().next().is_none()
    }

    /// Commit hashes with a record, skipping the reserved key
    pub fn commits(&self) -> impl Iterator<Item = &str> {
        self.root
            .keys()
            .filter(|k| k.as_str() != TIMESTAMP_KEY)
            .map(String::as_str)
    }

    /// Recorded size of one package at one commit, without any ancestry walk
    pub fn get(&self, commit: &str, path: &LookupPath) -> Option<u64> {
        if commit == TIMESTAMP_KEY {
            return None;
        }
        self.root
            .get(commit)?
            .get(&path.arch)?
            .get(path.flavor.package_name())?
            .get(path.format.as_str())?
            .as_u64()
    }

    /// Write a size at `store[commit][arch][flavor][os]`
    ///
    /// A commit record created here is stamped with `now`.
    pub fn record(&mut self, commit: &str, path: &LookupPath, size: u64, now: i64) {
        if !self.root.contains_key(commit) {
            let mut record = Map::new();
            record.insert(TIMESTAMP_KEY.to_string(), Value::from(now));
            self.root.insert(commit.to_string(), Value::Object(record));
        }
        let commit_record = child_object(&mut self.root, commit);
        let arch = child_object(commit_record, &path.arch);
        let flavor = child_object(arch, path.flavor.package_name());
        flavor.insert(path.format.as_str().to_string(), Value::from(size));
    }

    /// Generation timestamp of a commit record
    pub fn commit_timestamp(&self, commit: &str) -> Option<i64> {
        self.root.get(commit)?.get(TIMESTAMP_KEY)?.as_i64()
    }

    /// Generation timestamp of the whole store
    pub fn generated_at(&self) -> Option<i64> {
        self.root.get(TIMESTAMP_KEY)?.as_i64()
    }

    pub fn touch(&mut self, now: i64) {
        self.root.insert(TIMESTAMP_KEY.to_string(), Value::from(now));
    }

    /// Drop commit records stamped before `cutoff`, returning how many went
    ///
    /// Records without a timestamp are kept.
    pub fn prune_older_than(&mut self, cutoff: i64) -> usize {
        let before = self.root.len();
        self.root.retain(|key, value| {
            if key == TIMESTAMP_KEY {
                return true;
            }
            match value.get(TIMESTAMP_KEY).and_then(Value::as_i64) {
                Some(ts) => ts >= cutoff,
                None => true,
            }
        });
        before - self.root.len()
    }
}

impl From<Map<String, Value>> for SizeStore {
    fn from(root: Map<String, Value>) -> Self {
        Self { root }
    }
}

/// Child map under `key`, replacing a missing or non-object value
fn child_object<'a>(map: &'a mut Map<String, Value>, key: &str) -> &'a mut Map<String, Value> {
    let slot = map
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(child) => child,
        _ => unreachable!("slot holds an object"),
    }
}
