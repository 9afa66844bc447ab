//! In-memory audit store.

use std::sync::RwLock;

use crate::query::AuditQuery;
use crate::record::AuditRecord;
use crate::store::{AuditStore, AuditStoreError};

/// In-memory append-only audit store.
///
/// Intended for tests/dev. Durability is process-lifetime only; the
/// atomic-append contract holds because the whole record goes in under one
/// write lock.
#[derive(Debug, Default)]
pub struct InMemoryAuditStore {
    records: RwLock<Vec<AuditRecord>>,
}

impl InMemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuditStore for InMemoryAuditStore {
    fn append(&self, record: &AuditRecord) -> Result<(), AuditStoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|e| AuditStoreError::Lock(e.to_string()))?;
        records.push(record.clone());
        Ok(())
    }

    fn find(&self, query: &AuditQuery) -> Result<Vec<AuditRecord>, AuditStoreError> {
        let records = self
            .records
            .read()
            .map_err(|e| AuditStoreError::Lock(e.to_string()))?;
        Ok(query.apply(records.iter().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Outcome;
    use chrono::Utc;
    use taskgrid_core::{OrgId, UserId};

    fn sample(action: &str) -> AuditRecord {
        AuditRecord {
            ts: Utc::now(),
            user_id: UserId::new(),
            role: "Viewer".into(),
            org_id: OrgId::new(),
            action: action.into(),
            entity: "Task".into(),
            entity_id: None,
            outcome: Outcome::Deny,
            reason: Some("role not permitted for action".into()),
        }
    }

    #[test]
    fn append_then_find_returns_record_exactly_once() {
        let store = InMemoryAuditStore::new();
        let record = sample("Task.Create");
        store.append(&record).unwrap();

        let found = store.find(&AuditQuery::default()).unwrap();
        assert_eq!(found, vec![record]);
    }

    #[test]
    fn empty_store_finds_nothing() {
        let store = InMemoryAuditStore::new();
        assert!(store.find(&AuditQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let store = InMemoryAuditStore::new();
        let first = sample("Task.Create");
        let second = sample("Task.Delete");
        store.append(&first).unwrap();
        store.append(&second).unwrap();

        let found = store.find(&AuditQuery::default()).unwrap();
        assert_eq!(found, vec![first, second]);
    }
}
