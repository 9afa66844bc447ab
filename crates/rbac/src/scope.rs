//! Organization scope resolution.
//!
//! Computes the set of organization ids a caller may operate within, from
//! their role and position in the two-level hierarchy. Reads the hierarchy
//! through the [`OrganizationLookup`] capability; never writes, never caches
//! across requests (topology can change between calls).

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use taskgrid_core::{Organization, OrgId};

use crate::context::CallerContext;
use crate::roles::Role;

/// Failure of the external organization store.
///
/// Distinct from "organization not found" — a missing record is a valid
/// (fail-closed) answer, an unavailable store is not.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("organization lookup failed: {0}")]
    Unavailable(String),
}

/// Read-only access to the organization hierarchy.
///
/// Implemented by whatever store owns organization records; this crate only
/// needs the two reads below and never traverses more than one level.
pub trait OrganizationLookup: Send + Sync {
    /// Fetch one organization by id.
    fn get_by_id(&self, id: OrgId) -> Result<Option<Organization>, LookupError>;

    /// Fetch the direct children of `parent_id`.
    fn get_children(&self, parent_id: OrgId) -> Result<Vec<Organization>, LookupError>;
}

impl<L> OrganizationLookup for Arc<L>
where
    L: OrganizationLookup + ?Sized,
{
    fn get_by_id(&self, id: OrgId) -> Result<Option<Organization>, LookupError> {
        (**self).get_by_id(id)
    }

    fn get_children(&self, parent_id: OrgId) -> Result<Vec<Organization>, LookupError> {
        (**self).get_children(parent_id)
    }
}

/// In-memory organization directory for tests and dev wiring.
#[derive(Debug, Default)]
pub struct InMemoryOrgDirectory {
    orgs: RwLock<HashMap<OrgId, Organization>>,
}

impl InMemoryOrgDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, org: Organization) {
        // Poisoning only happens if another test thread panicked mid-insert;
        // treat the directory as unusable at that point.
        self.orgs
            .write()
            .expect("organization directory lock poisoned")
            .insert(org.id, org);
    }
}

impl OrganizationLookup for InMemoryOrgDirectory {
    fn get_by_id(&self, id: OrgId) -> Result<Option<Organization>, LookupError> {
        let orgs = self
            .orgs
            .read()
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;
        Ok(orgs.get(&id).cloned())
    }

    fn get_children(&self, parent_id: OrgId) -> Result<Vec<Organization>, LookupError> {
        let orgs = self
            .orgs
            .read()
            .map_err(|e| LookupError::Unavailable(e.to_string()))?;
        Ok(orgs
            .values()
            .filter(|o| o.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }
}

/// Resolve the set of organization ids `caller` may access.
///
/// Rules (two-level org model):
/// - Viewer/Admin: `{caller.org_id}`, no lookups at all.
/// - Owner at a child org: `{caller.org_id}` — never the parent or siblings.
/// - Owner at a root org: the root plus its direct children.
/// - Owner whose org record is missing: `{caller.org_id}` — never expand
///   scope on missing data.
///
/// A store failure propagates; the caller decides how a lookup error maps to
/// an outcome (the decision engine answers deny-by-default).
pub fn resolve_scope<L>(caller: &CallerContext, lookup: &L) -> Result<BTreeSet<OrgId>, LookupError>
where
    L: OrganizationLookup + ?Sized,
{
    // Fast path: non-owners are confined to their home org regardless of
    // hierarchy position.
    if caller.role != Role::Owner {
        return Ok(BTreeSet::from([caller.org_id]));
    }

    let Some(own_org) = lookup.get_by_id(caller.org_id)? else {
        tracing::warn!(org_id = %caller.org_id, "owner's organization not found; falling back to minimal scope");
        return Ok(BTreeSet::from([caller.org_id]));
    };

    if !own_org.is_root() {
        return Ok(BTreeSet::from([caller.org_id]));
    }

    // Owner at root: the root itself plus its direct children. Depth is fixed
    // at two levels; no traversal below the children.
    let mut scope = BTreeSet::from([own_org.id]);
    for child in lookup.get_children(own_org.id)? {
        scope.insert(child.id);
    }
    Ok(scope)
}
