//! In-memory record store.
//!
//! A deterministic [`RecordStore`] implementation with the same filter
//! and pagination semantics as the remote contract. Used by unit tests,
//! integration tests, and benchmarks.

use std::collections::BTreeMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::filter::{Filter, Page, RecordPage};
use super::record::{Fields, Record};
use super::store::RecordStore;

/// An in-memory record store keyed by table name.
///
/// Records keep insertion order; listing applies the filter first, then
/// the pagination window, and reports `has_more` when matches remain
/// beyond the window.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<BTreeMap<String, Vec<Record>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record with a pre-assigned id, for seeding fixtures.
    pub fn seed(&self, table: &str, record: Record) {
        let mut tables = self.tables.write().expect("store lock poisoned");
        tables.entry(table.to_string()).or_default().push(record);
    }

    /// Number of records currently in a table.
    pub fn len(&self, table: &str) -> usize {
        let tables = self.tables.read().expect("store lock poisoned");
        tables.get(table).map_or(0, Vec::len)
    }

    /// True when the table is absent or empty.
    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }
}

impl RecordStore for MemoryStore {
    fn list_records(&self, table: &str, filter: &Filter, page: Page) -> EngineResult<RecordPage> {
        let tables = self.tables.read().expect("store lock poisoned");
        let records = tables.get(table).map(Vec::as_slice).unwrap_or_default();

        let matching: Vec<&Record> = records.iter().filter(|r| filter.matches(r)).collect();
        let window: Vec<Record> = matching
            .iter()
            .skip(page.offset)
            .take(page.limit)
            .map(|r| (*r).clone())
            .collect();
        let has_more = page.offset + window.len() < matching.len();

        Ok(RecordPage {
            records: window,
            has_more,
        })
    }

    fn create_record(&self, table: &str, fields: Fields) -> EngineResult<Record> {
        let record = Record {
            id: Uuid::new_v4().to_string(),
            fields,
        };
        let mut tables = self.tables.write().expect("store lock poisoned");
        tables
            .entry(table.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    fn update_record(&self, table: &str, record_id: &str, fields: Fields) -> EngineResult<Record> {
        let mut tables = self.tables.write().expect("store lock poisoned");
        let records = tables
            .get_mut(table)
            .ok_or_else(|| EngineError::StoreRequest {
                table: table.to_string(),
                detail: format!("update of '{record_id}': table does not exist"),
            })?;

        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| EngineError::StoreRequest {
                table: table.to_string(),
                detail: format!("update of '{record_id}': record not found"),
            })?;

        record.fields.extend(fields);
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FieldValue;

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        for day in 11..=15 {
            store.seed(
                "punches",
                Record::new(format!("p{day}"))
                    .with_field("punch_in_time", format!("2025-11-{day}T09:00:00Z")),
            );
        }
        store
    }

    #[test]
    fn test_list_applies_filter_and_window() {
        let store = seeded_store();
        let filter = Filter::new().range("punch_in_time", "2025-11-12", "2025-11-14");

        let page = store
            .list_records("punches", &filter, Page::new(2, 0))
            .unwrap();
        assert_eq!(page.records.len(), 2);
        assert!(page.has_more);
        assert_eq!(page.records[0].id, "p12");

        let page = store
            .list_records("punches", &filter, Page::new(2, 2))
            .unwrap();
        assert_eq!(page.records.len(), 1);
        assert!(!page.has_more);
        assert_eq!(page.records[0].id, "p14");
    }

    #[test]
    fn test_list_unknown_table_is_empty_not_an_error() {
        let store = MemoryStore::new();
        let page = store
            .list_records("nowhere", &Filter::new(), Page::first(10))
            .unwrap();
        assert!(page.records.is_empty());
        assert!(!page.has_more);
    }

    #[test]
    fn test_create_assigns_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.create_record("departments", Fields::new()).unwrap();
        let b = store.create_record("departments", Fields::new()).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len("departments"), 2);
    }

    #[test]
    fn test_update_merges_fields() {
        let store = MemoryStore::new();
        store.seed(
            "templates",
            Record::new("t1")
                .with_field("start_day", 10u32)
                .with_field("payout_day", "last"),
        );

        let mut fix = Fields::new();
        fix.insert("start_day".to_string(), FieldValue::from(11u32));
        let updated = store.update_record("templates", "t1", fix).unwrap();

        assert_eq!(updated.number("start_day"), Some(11.0));
        assert_eq!(updated.text("payout_day"), Some("last"));
    }

    #[test]
    fn test_update_missing_record_is_a_store_error() {
        let store = MemoryStore::new();
        store.seed("templates", Record::new("t1"));
        let err = store
            .update_record("templates", "t9", Fields::new())
            .unwrap_err();
        assert!(err.to_string().contains("record not found"));
    }
}
