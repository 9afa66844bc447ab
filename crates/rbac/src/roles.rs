//! Role definitions and inheritance.
//!
//! The role set is closed, ordered configuration: Viewer < Admin < Owner.
//! Inheritance is a fixed directed acyclic graph (Owner→Admin→Viewer) baked
//! in at compile time; nothing here mutates at runtime.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use taskgrid_core::DomainError;

/// System role, ordered by privilege (derive order: lowest first).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Role {
    Viewer,
    Admin,
    Owner,
}

/// All roles, lowest privilege first.
pub const ALL_ROLES: [Role; 3] = [Role::Viewer, Role::Admin, Role::Owner];

/// Role assigned to new users unless business rules say otherwise.
pub const DEFAULT_ROLE: Role = Role::Viewer;

impl Role {
    /// Privilege rank; higher = more privileged.
    pub fn rank(self) -> u8 {
        match self {
            Role::Viewer => 0,
            Role::Admin => 1,
            Role::Owner => 2,
        }
    }

    /// Is `self` at least as privileged as `required`?
    pub fn is_at_least(self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    /// Direct inheritance edges: the roles whose grants `self` absorbs.
    fn inherits(self) -> &'static [Role] {
        match self {
            Role::Viewer => &[],
            Role::Admin => &[Role::Viewer],
            Role::Owner => &[Role::Admin, Role::Viewer],
        }
    }

    /// `self` plus every role it inherits from, transitively.
    ///
    /// Worklist traversal over the fixed inheritance graph; terminates because
    /// the graph is acyclic and the seen-set only grows. Reflexive and
    /// idempotent: `expand(expand(r))` adds nothing.
    pub fn expand_inheritance(self) -> BTreeSet<Role> {
        let mut seen = BTreeSet::new();
        let mut stack = vec![self];

        while let Some(role) = stack.pop() {
            if seen.insert(role) {
                stack.extend(role.inherits());
            }
        }
        seen
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Viewer => "Viewer",
            Role::Admin => "Admin",
            Role::Owner => "Owner",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    /// Case-insensitive parse. Fails closed: no partial matches and no
    /// default role, so invalid input can never downgrade into a valid one.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "viewer" => Ok(Role::Viewer),
            "admin" => Ok(Role::Admin),
            "owner" => Ok(Role::Owner),
            other => Err(DomainError::validation(format!("unknown role '{other}'"))),
        }
    }
}
