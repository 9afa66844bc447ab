//! Append-only audit store contract.

use std::sync::Arc;

use thiserror::Error;

use crate::query::AuditQuery;
use crate::record::AuditRecord;

/// Audit storage error.
///
/// "No records yet" is not an error — `find` returns an empty vector for
/// that. These variants all mean the backing store itself misbehaved, so
/// callers can distinguish "nothing happened yet" from "storage is broken".
#[derive(Debug, Error)]
pub enum AuditStoreError {
    #[error("audit storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("audit record serialization failed: {0}")]
    Serialize(String),

    #[error("audit log corrupted: {0}")]
    Corrupt(String),

    #[error("audit store lock poisoned: {0}")]
    Lock(String),
}

/// Append-only, durable audit trail.
///
/// ## Contract
///
/// - `append` is atomic at the granularity of one whole record and durable
///   before it returns: the record survives a crash immediately after the
///   call, and concurrent appenders never interleave partial writes.
/// - `find` returns records in insertion order, runs safely concurrently with
///   appends and other reads, and never observes a half-written record. A
///   reader may miss a record appended after its read started.
/// - Records are immutable once written; there is no update or delete.
pub trait AuditStore: Send + Sync {
    /// Durably append one record.
    fn append(&self, record: &AuditRecord) -> Result<(), AuditStoreError>;

    /// Return the insertion-ordered records matching `query`.
    ///
    /// Absence of any backing data yields `Ok(vec![])`; a failure to read the
    /// backing store yields an error.
    fn find(&self, query: &AuditQuery) -> Result<Vec<AuditRecord>, AuditStoreError>;
}

impl<S> AuditStore for Arc<S>
where
    S: AuditStore + ?Sized,
{
    fn append(&self, record: &AuditRecord) -> Result<(), AuditStoreError> {
        (**self).append(record)
    }

    fn find(&self, query: &AuditQuery) -> Result<Vec<AuditRecord>, AuditStoreError> {
        (**self).find(query)
    }
}
