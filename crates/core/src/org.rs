//! Two-level organization model.
//!
//! Organizations form a fixed two-level hierarchy: level-0 roots and level-1
//! children. The depth is a design constant, not something discovered at
//! runtime, so the invariants are enforced here by construction rather than
//! re-checked by every consumer.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::OrgId;

/// A tenant/division node in the two-level hierarchy.
///
/// # Invariants
/// - A root has `level == 0` and no parent.
/// - A child has `level == 1` and its parent is a root.
/// - No node has more than one parent; cycles are impossible by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: OrgId,
    pub name: String,
    pub parent_id: Option<OrgId>,
    /// Hierarchy depth: 0 = root, 1 = child. Records from external stores may
    /// omit it, in which case it defaults to 0 and `is_root` falls back to the
    /// parent link.
    #[serde(default)]
    pub level: u8,
}

impl Organization {
    /// Create a level-0 root organization.
    pub fn root(id: OrgId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id: None,
            level: 0,
        }
    }

    /// Create a level-1 child of `parent`.
    ///
    /// Fails if `parent` is not a root: the hierarchy is exactly two levels
    /// deep and a child cannot itself have children.
    pub fn child_of(parent: &Organization, id: OrgId, name: impl Into<String>) -> DomainResult<Self> {
        if !parent.is_root() {
            return Err(DomainError::invariant(format!(
                "organization {} is not a root and cannot have children",
                parent.id
            )));
        }
        Ok(Self {
            id,
            name: name.into(),
            parent_id: Some(parent.id),
            level: 1,
        })
    }

    /// Whether this organization is a level-0 root.
    ///
    /// A record with a defaulted level is treated as a root only when its
    /// parent link is also absent; a non-null parent always means child.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none() && self.level == 0
    }
}
