//! Caller context.
//!
//! The minimal shape the authorization core needs from an authenticated
//! actor. Token decoding and signature verification live with the transport
//! layer; this core trusts the supplied identity but offers fail-closed
//! construction from raw claim strings and validation against current
//! organization data.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use taskgrid_core::{DomainError, OrgId, UserId};

use crate::roles::Role;
use crate::scope::{LookupError, OrganizationLookup};

/// Identity of an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerContext {
    pub user_id: UserId,
    pub role: Role,
    pub org_id: OrgId,
}

/// Failure to validate a caller context against current data.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("caller's organization {0} does not exist")]
    UnknownOrganization(OrgId),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl CallerContext {
    pub fn new(user_id: UserId, role: Role, org_id: OrgId) -> Self {
        Self {
            user_id,
            role,
            org_id,
        }
    }

    /// Build a caller context from raw claim strings.
    ///
    /// Every field parses fail-closed: an unknown role or malformed id is an
    /// error, never coerced to a default.
    pub fn from_claims(user_id: &str, role: &str, org_id: &str) -> Result<Self, DomainError> {
        Ok(Self {
            user_id: UserId::from_str(user_id)?,
            role: Role::from_str(role)?,
            org_id: OrgId::from_str(org_id)?,
        })
    }

    /// Confirm the caller's home organization exists in current data.
    ///
    /// Intended as an explicit step for the transport layer after token
    /// verification; scope resolution itself already fails closed on a
    /// missing organization.
    pub fn validate<L>(&self, lookup: &L) -> Result<(), ContextError>
    where
        L: OrganizationLookup + ?Sized,
    {
        match lookup.get_by_id(self.org_id)? {
            Some(_) => Ok(()),
            None => Err(ContextError::UnknownOrganization(self.org_id)),
        }
    }
}
