use super::MetricValue;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Insertion-ordered mapping from metric key to value, scoped to exactly one
/// (platform, design, variant) run.
///
/// Overwrites keep the key's original position so the serialized document is
/// stable regardless of how often a field was re-extracted. Detecting (and
/// warning about) overwrites is the extractor's job; the record itself is
/// silent.
#[derive(Debug, Default)]
pub struct MetricRecord {
    entries: Vec<(String, MetricValue)>,
    index: HashMap<String, usize>,
}

impl MetricRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite, preserving insertion order.
    pub fn insert(&mut self, key: impl Into<String>, value: MetricValue) {
        let key = key.into();
        if let Some(&slot) = self.index.get(&key) {
            self.entries[slot].1 = value;
        } else {
            let _ = self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.index.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for MetricRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
