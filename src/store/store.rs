//! The record-store capability trait.

use crate::error::EngineResult;

use super::filter::{Filter, Page, RecordPage};
use super::record::{Fields, Record};

/// The three capability-shaped operations the engine needs from a record
/// store.
///
/// Implementations are expected to be synchronous; the engine sequences
/// paging strictly in offset order because later pages depend on the
/// store's pagination cursor. Any non-success response maps to
/// [`EngineError::StoreRequest`](crate::error::EngineError::StoreRequest)
/// and aborts the enclosing operation.
pub trait RecordStore: Send + Sync {
    /// Lists records from `table` matching `filter`, one page at a time.
    fn list_records(&self, table: &str, filter: &Filter, page: Page) -> EngineResult<RecordPage>;

    /// Creates a record in `table` with the given fields.
    fn create_record(&self, table: &str, fields: Fields) -> EngineResult<Record>;

    /// Updates the fields of an existing record.
    fn update_record(&self, table: &str, record_id: &str, fields: Fields) -> EngineResult<Record>;
}

/// Drains a listing into memory, page by page in offset order.
///
/// For bounded tables (departments, templates, time cards). Punches go
/// through the dedicated pager, which adds the safety ceiling.
pub fn list_all(
    store: &dyn RecordStore,
    table: &str,
    filter: &Filter,
    page_size: usize,
) -> EngineResult<Vec<Record>> {
    let mut records = Vec::new();
    let mut offset = 0;
    loop {
        let page = store.list_records(table, filter, Page::new(page_size, offset))?;
        let fetched = page.records.len();
        records.extend(page.records);
        if !page.has_more || fetched == 0 {
            return Ok(records);
        }
        offset += page_size;
    }
}
