use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A versioned, prefixed byte-level key/value store. Implementations must
/// iterate in lexicographic key order (determinism across nodes depends
/// on it) and must never panic on a malformed value - decode failures
/// are reported to the caller as `Option`/`Result`, never unwound.
pub trait KVStore {
    fn get_raw(&self, key: &str) -> Option<Vec<u8>>;
    fn set_raw(&mut self, key: &str, value: Vec<u8>);
    fn delete_raw(&mut self, key: &str);

    /// All keys (and values) starting with `prefix`, in ascending
    /// lexicographic order. Prefixes are expected to end in `/` so that a
    /// prefix can never be a prefix of a sibling prefix.
    fn iterate_prefix(&self, prefix: &str) -> Vec<(String, Vec<u8>)>;
}

/// A deterministic, in-process implementation backed by a `BTreeMap`,
/// which already iterates in lexicographic key order. This is the only
/// store implementation the core needs: persistence/replication across
/// nodes is the job of the BFT consensus engine this core runs inside,
/// not of this crate.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemStore {
    data: BTreeMap<String, Vec<u8>>
}

impl MemStore {
    pub fn new() -> Self {
        MemStore::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All entries in ascending lexicographic key order, for CLI/debug
    /// dumps - not used by any consensus-critical code path.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Vec<u8>)> {
        self.data.iter()
    }
}

impl KVStore for MemStore {
    fn get_raw(&self, key: &str) -> Option<Vec<u8>> {
        self.data.get(key).cloned()
    }

    fn set_raw(&mut self, key: &str, value: Vec<u8>) {
        self.data.insert(key.to_string(), value);
    }

    fn delete_raw(&mut self, key: &str) {
        self.data.remove(key);
    }

    fn iterate_prefix(&self, prefix: &str) -> Vec<(String, Vec<u8>)> {
        self.data
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
