use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::LearnerRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RemarkEntry {
    pub key: String,
    pub remark: String,
}

/// Remarks in entry order, at most one per key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemarkBook {
    entries: Vec<RemarkEntry>,
}

impl RemarkBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a remark, replacing any existing one for the same key in place.
    pub fn set(&mut self, key: impl Into<String>, remark: impl Into<String>) {
        let key = key.into();
        let remark = remark.into();
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.remark = remark,
            None => self.entries.push(RemarkEntry { key, remark }),
        }
    }

    pub fn set_for(&mut self, learner: &LearnerRecord, remark: impl Into<String>) {
        self.set(learner.remark_key(), remark);
    }

    /// The remark for `key`, or an empty string.
    pub fn get(&self, key: &str) -> &str {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.remark.as_str())
            .unwrap_or("")
    }

    pub fn get_for(&self, learner: &LearnerRecord) -> &str {
        self.get(&learner.remark_key())
    }

    /// Drop every remark whose key is not in `keys`.
    pub fn retain_keys(&mut self, keys: &HashSet<String>) {
        self.entries.retain(|e| keys.contains(&e.key));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[RemarkEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
