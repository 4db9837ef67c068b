//! Contracts for the collaborators that sit around the extraction engine.
//!
//! The web API layer deduplicates records by a four-part natural key and
//! stores each extraction alongside method/confidence metadata; a separate
//! service translates the Odia-keyed record into a target language. Both
//! are external systems; these traits pin the shape of the seam without
//! pulling their implementations into this repository. An in-memory store
//! is provided for tests and dry runs.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::confidence::ConfidenceLevel;
use crate::error::{BhulekhError, Result};
use crate::record::ExtractedRecord;

/// Natural key for deduplicated record lookup/insert.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub district: String,
    pub tehsil: String,
    pub village: String,
    pub record_number: String,
}

impl RecordKey {
    /// Build the key from an extracted record's English-keyed fields.
    #[must_use]
    pub fn from_record(record: &ExtractedRecord) -> Self {
        Self {
            district: record.district.clone(),
            tehsil: record.tehsil.clone(),
            village: record.village.clone(),
            record_number: record.record_number.clone(),
        }
    }
}

/// One stored extraction, tagged with how it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredExtraction {
    /// Extraction method tag, e.g. `"html_parser"`.
    pub method: String,
    pub confidence: ConfidenceLevel,
    /// Serialized record payload.
    pub payload: Value,
}

/// Record persistence boundary.
pub trait RecordStore {
    /// Look up the record by natural key, inserting it if absent. Returns
    /// the stored record's identifier either way.
    fn find_or_insert(&self, key: &RecordKey) -> Result<u64>;

    /// Attach an extraction to a previously stored record.
    fn store_extraction(&self, record_id: u64, extraction: &StoredExtraction) -> Result<()>;
}

/// Translation boundary: converts an Odia-keyed record into the target
/// language, preserving structure and numeric fields. Failure is fatal to
/// the translation step; callers do not retry here.
pub trait RecordTranslator {
    fn translate(
        &self,
        record: &Map<String, Value>,
        target_language: &str,
    ) -> Result<Map<String, Value>>;
}

/// Hash-map backed [`RecordStore`] for tests and CLI dry runs.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    inner: Mutex<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    ids: HashMap<RecordKey, u64>,
    extractions: HashMap<u64, Vec<StoredExtraction>>,
    next_id: u64,
}

impl InMemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractions stored against `record_id`, in insertion order.
    #[must_use]
    pub fn extractions_for(&self, record_id: u64) -> Vec<StoredExtraction> {
        let inner = self.inner.lock().expect("store mutex poisoned");
        inner.extractions.get(&record_id).cloned().unwrap_or_default()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn find_or_insert(&self, key: &RecordKey) -> Result<u64> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        if let Some(id) = inner.ids.get(key) {
            return Ok(*id);
        }
        inner.next_id += 1;
        let id = inner.next_id;
        inner.ids.insert(key.clone(), id);
        inner.extractions.insert(id, Vec::new());
        Ok(id)
    }

    fn store_extraction(&self, record_id: u64, extraction: &StoredExtraction) -> Result<()> {
        let mut inner = self.inner.lock().expect("store mutex poisoned");
        match inner.extractions.get_mut(&record_id) {
            Some(list) => {
                list.push(extraction.clone());
                Ok(())
            }
            None => Err(BhulekhError::Storage(format!(
                "unknown record id: {record_id}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(record_number: &str) -> RecordKey {
        RecordKey {
            district: "Cuttack".into(),
            tehsil: "Cuttack".into(),
            village: "Chandini Chowk".into(),
            record_number: record_number.into(),
        }
    }

    #[test]
    fn find_or_insert_deduplicates_by_natural_key() {
        let store = InMemoryRecordStore::new();
        let first = store.find_or_insert(&key("2")).unwrap();
        let second = store.find_or_insert(&key("2")).unwrap();
        let third = store.find_or_insert(&key("3")).unwrap();
        assert_eq!(first, second);
        assert_ne!(first, third);
    }

    #[test]
    fn extractions_attach_to_their_record() {
        let store = InMemoryRecordStore::new();
        let id = store.find_or_insert(&key("2")).unwrap();
        let extraction = StoredExtraction {
            method: "html_parser".into(),
            confidence: ConfidenceLevel::High,
            payload: serde_json::json!({"ok": true}),
        };
        store.store_extraction(id, &extraction).unwrap();
        assert_eq!(store.extractions_for(id), vec![extraction]);
    }

    #[test]
    fn storing_against_unknown_id_fails() {
        let store = InMemoryRecordStore::new();
        let extraction = StoredExtraction {
            method: "html_parser".into(),
            confidence: ConfidenceLevel::Low,
            payload: Value::Null,
        };
        assert!(store.store_extraction(99, &extraction).is_err());
    }
}
