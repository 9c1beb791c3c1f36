//! Record-store capability boundary.
//!
//! The engine reads and writes loosely-typed records through the
//! [`RecordStore`] trait; everything behind it (transport, auth, schema)
//! is an external collaborator. [`MemoryStore`] is a deterministic
//! in-process implementation used by tests and benchmarks.

mod filter;
mod memory;
mod record;
mod store;

pub use filter::{Condition, Filter, Page, RecordPage};
pub use memory::MemoryStore;
pub use record::{FieldValue, Fields, Record};
pub use store::{list_all, RecordStore};
