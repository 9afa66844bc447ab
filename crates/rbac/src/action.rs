//! Action vocabulary.
//!
//! Canonical `Resource.Verb` tokens used across the decision engine, the
//! route registry, and audit records. The vocabulary is a closed, versioned
//! enumeration owned by this crate; unknown tokens are rejected at parse and
//! can therefore never be granted.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use taskgrid_core::DomainError;

/// A permission token of the form `Resource.Verb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "Task.Create")]
    TaskCreate,
    #[serde(rename = "Task.Read")]
    TaskRead,
    #[serde(rename = "Task.Update")]
    TaskUpdate,
    #[serde(rename = "Task.Delete")]
    TaskDelete,
    #[serde(rename = "Audit.View")]
    AuditView,
}

/// Every action in the current vocabulary.
pub const ALL_ACTIONS: [Action; 5] = [
    Action::TaskCreate,
    Action::TaskRead,
    Action::TaskUpdate,
    Action::TaskDelete,
    Action::AuditView,
];

/// Task CRUD actions.
pub const TASK_ACTIONS: [Action; 4] = [
    Action::TaskCreate,
    Action::TaskRead,
    Action::TaskUpdate,
    Action::TaskDelete,
];

/// Audit surface actions.
pub const AUDIT_ACTIONS: [Action; 1] = [Action::AuditView];

impl Action {
    /// The canonical `Resource.Verb` token.
    pub fn as_str(self) -> &'static str {
        match self {
            Action::TaskCreate => "Task.Create",
            Action::TaskRead => "Task.Read",
            Action::TaskUpdate => "Task.Update",
            Action::TaskDelete => "Task.Delete",
            Action::AuditView => "Audit.View",
        }
    }

    /// The resource half of the token (used as the audit record's entity).
    pub fn entity(self) -> &'static str {
        match self {
            Action::TaskCreate
            | Action::TaskRead
            | Action::TaskUpdate
            | Action::TaskDelete => "Task",
            Action::AuditView => "Audit",
        }
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    /// Exact-match parse of the canonical token. Fails closed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ACTIONS
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown action '{s}'")))
    }
}
