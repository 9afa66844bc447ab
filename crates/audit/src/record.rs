//! Audit record shape.
//!
//! The serialized field names (`ts`, `userId`, `role`, `orgId`, `action`,
//! `entity`, `entityId`, `outcome`, `reason`) are a compatibility contract:
//! any storage backend swap must preserve them. Keep the record flat and
//! simple so it maps cleanly onto a table row or a log sink later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskgrid_core::{OrgId, UserId};

/// Result of an access decision (or other recordable event).
///
/// `Deny` is an expected, recordable outcome, not an error. `Error` means the
/// system could not determine whether the action was allowed (collaborator
/// failure) and denied by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Allow,
    Deny,
    Error,
}

impl core::fmt::Display for Outcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Outcome::Allow => f.write_str("allow"),
            Outcome::Deny => f.write_str("deny"),
            Outcome::Error => f.write_str("error"),
        }
    }
}

/// One immutable audit entry: who did what, where, and with what outcome.
///
/// Records are created at decision time, never updated, and appended in an
/// order consistent with the wall clock of recording.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    /// Wall-clock time of recording.
    pub ts: DateTime<Utc>,

    /// Acting user.
    pub user_id: UserId,

    /// The actor's role as of the event (stored as text so historical records
    /// survive role-set evolution).
    pub role: String,

    /// Organization context of the event.
    pub org_id: OrgId,

    /// Action token, e.g. `Task.Create`.
    pub action: String,

    /// Resource type the action targets, e.g. `Task`.
    pub entity: String,

    /// Specific target entity, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,

    pub outcome: Outcome,

    /// Human-readable reason, set on deny/error outcomes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
