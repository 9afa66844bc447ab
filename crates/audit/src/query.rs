//! Filtered, paginated audit queries.
//!
//! Filters are conjunctive (AND across everything provided); time bounds are
//! inclusive. Results preserve insertion order — stores must not reorder on
//! read.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskgrid_core::{OrgId, UserId};

use crate::record::AuditRecord;

/// Default page size when the caller does not specify one.
pub const DEFAULT_LIMIT: u32 = 100;

/// Query parameters for [`crate::AuditStore::find`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditQuery {
    /// Inclusive lower time bound.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper time bound.
    pub to: Option<DateTime<Utc>>,
    /// Exact-match filter on the acting user.
    pub user_id: Option<UserId>,
    /// Exact-match filter on the action token.
    pub action: Option<String>,
    /// Exact-match filter on the organization context.
    pub org_id: Option<OrgId>,
    /// Maximum number of records to return (≥ 1).
    pub limit: u32,
    /// 0-based offset into the filtered sequence.
    pub offset: u32,
}

impl Default for AuditQuery {
    fn default() -> Self {
        Self {
            from: None,
            to: None,
            user_id: None,
            action: None,
            org_id: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl AuditQuery {
    /// Build a query from optional pagination parameters, applying defaults.
    ///
    /// A limit of 0 is bumped to 1: the surface contract is `limit >= 1`.
    pub fn new(limit: Option<u32>, offset: Option<u32>) -> Self {
        Self {
            limit: limit.unwrap_or(DEFAULT_LIMIT).max(1),
            offset: offset.unwrap_or(0),
            ..Self::default()
        }
    }

    pub fn with_from(mut self, from: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_to(mut self, to: DateTime<Utc>) -> Self {
        self.to = Some(to);
        self
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_org(mut self, org_id: OrgId) -> Self {
        self.org_id = Some(org_id);
        self
    }

    /// Whether `record` satisfies every provided filter.
    pub fn matches(&self, record: &AuditRecord) -> bool {
        if let Some(from) = self.from {
            if record.ts < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if record.ts > to {
                return false;
            }
        }
        if let Some(user_id) = self.user_id {
            if record.user_id != user_id {
                return false;
            }
        }
        if let Some(action) = &self.action {
            if record.action != *action {
                return false;
            }
        }
        if let Some(org_id) = self.org_id {
            if record.org_id != org_id {
                return false;
            }
        }
        true
    }

    /// Filter and paginate an insertion-ordered sequence of records.
    ///
    /// An offset past the end of the filtered data yields an empty vector,
    /// never an error.
    pub fn apply(&self, records: impl IntoIterator<Item = AuditRecord>) -> Vec<AuditRecord> {
        records
            .into_iter()
            .filter(|r| self.matches(r))
            .skip(self.offset as usize)
            .take(self.limit.max(1) as usize)
            .collect()
    }
}
