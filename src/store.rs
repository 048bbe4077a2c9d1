use std::collections::HashMap;

use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::{CaptionRecord, CaptionRequest, ParseResult};

/// In-memory record store.
#[derive(Default)]
pub struct CaptionStore {
    records: RwLock<HashMap<Uuid, CaptionRecord>>,
}

impl CaptionStore {
    pub fn insert(&self, request: CaptionRequest, result: ParseResult) -> CaptionRecord {
        let record = CaptionRecord { id: Uuid::new_v4(), request, result, created_at: Utc::now() };
        self.records.write().insert(record.id, record.clone());
        record
    }

    pub fn get(&self, id: &Uuid) -> Option<CaptionRecord> {
        self.records.read().get(id).cloned()
    }

    /// All records, newest first.
    pub fn list(&self) -> Vec<CaptionRecord> {
        let mut all: Vec<_> = self.records.read().values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    /// Replaces the generated content of a record. Returns the updated record,
    /// or `None` if it no longer exists.
    pub fn save_result(&self, id: &Uuid, result: ParseResult) -> Option<CaptionRecord> {
        let mut guard = self.records.write();
        let record = guard.get_mut(id)?;
        record.result = result;
        Some(record.clone())
    }

    pub fn clear_result(&self, id: &Uuid) -> Option<CaptionRecord> {
        self.save_result(id, ParseResult::default())
    }

    pub fn remove(&self, id: &Uuid) -> Option<CaptionRecord> {
        self.records.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
