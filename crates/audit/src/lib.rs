//! `taskgrid-audit` — durable, queryable audit trail.
//!
//! Append-only recording of authorization decisions (and any other recordable
//! event), behind a small [`AuditStore`] trait so the backing store can be
//! swapped (flat file, relational table, durable queue) without touching the
//! decision engine. The record's wire shape is a compatibility contract; see
//! [`record::AuditRecord`].

pub mod file;
pub mod memory;
pub mod query;
pub mod record;
pub mod store;

pub use file::FileAuditStore;
pub use memory::InMemoryAuditStore;
pub use query::AuditQuery;
pub use record::{AuditRecord, Outcome};
pub use store::{AuditStore, AuditStoreError};
