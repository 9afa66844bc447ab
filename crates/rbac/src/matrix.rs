//! Permission matrix.
//!
//! A static base grant table (action → minimal directly-granted roles) is
//! expanded through role inheritance once, at construction, into a fast
//! lookup table. The expanded matrix is immutable for the process lifetime
//! and is a deterministic pure function of the base table.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use crate::action::Action;
use crate::roles::{Role, ALL_ROLES};

/// Base grants: the minimal set of roles directly authorized per action,
/// before inheritance expansion. Every action has at least one granted role.
const BASE_GRANTS: &[(Action, &[Role])] = &[
    (Action::TaskCreate, &[Role::Admin]),
    (Action::TaskRead, &[Role::Viewer]),
    (Action::TaskUpdate, &[Role::Admin]),
    (Action::TaskDelete, &[Role::Admin]),
    (Action::AuditView, &[Role::Admin]),
];

/// Inheritance-expanded action → role-set table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionMatrix {
    grants: HashMap<Action, BTreeSet<Role>>,
}

impl PermissionMatrix {
    /// Build the matrix from the hard-coded base grant table.
    pub fn new() -> Self {
        Self::from_base_grants(BASE_GRANTS)
    }

    /// Expand a base grant table through role inheritance.
    ///
    /// A role is in the expanded set for an action when its inheritance
    /// closure contains a directly granted role, so privilege is monotone:
    /// granting Viewer grants Admin and Owner too.
    fn from_base_grants(base: &[(Action, &[Role])]) -> Self {
        let mut grants: HashMap<Action, BTreeSet<Role>> = HashMap::new();

        for (action, direct) in base {
            let expanded: BTreeSet<Role> = ALL_ROLES
                .into_iter()
                .filter(|role| {
                    role.expand_inheritance()
                        .iter()
                        .any(|inherited| direct.contains(inherited))
                })
                .collect();

            debug_assert!(!expanded.is_empty(), "action {action} has no granted roles");
            grants.insert(*action, expanded);
        }

        Self { grants }
    }

    /// Is `role` granted `action`? Unknown actions fail closed.
    pub fn is_granted(&self, role: Role, action: Action) -> bool {
        self.grants
            .get(&action)
            .is_some_and(|roles| roles.contains(&role))
    }

    /// The expanded role set for `action`, if the action is in the table.
    pub fn granted_roles(&self, action: Action) -> Option<&BTreeSet<Role>> {
        self.grants.get(&action)
    }
}

impl Default for PermissionMatrix {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide matrix, built once on first use.
pub static PERMISSIONS: LazyLock<PermissionMatrix> = LazyLock::new(PermissionMatrix::new);

/// Does `role` have permission to perform `action`? (shared matrix)
pub fn can(role: Role, action: Action) -> bool {
    PERMISSIONS.is_granted(role, action)
}
