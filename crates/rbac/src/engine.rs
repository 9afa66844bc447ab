//! Authorization decision engine.
//!
//! Combines the permission matrix and the org scope resolver into one
//! decision for "can this caller perform this action on a resource belonging
//! to org X", and records every decision to the audit trail before returning.
//! Each decision is a stateless single-pass evaluation: no retries, no
//! cross-request cache, no shared mutable state.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;

use taskgrid_audit::{AuditRecord, AuditStore, AuditStoreError, Outcome};
use taskgrid_core::OrgId;

use crate::action::Action;
use crate::context::CallerContext;
use crate::matrix::PermissionMatrix;
use crate::scope::{resolve_scope, LookupError, OrganizationLookup};

/// Why a decision came out deny (or error).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionReason {
    RoleNotPermitted,
    OutsideScope,
    LookupFailed(String),
}

impl core::fmt::Display for DecisionReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DecisionReason::RoleNotPermitted => f.write_str("role not permitted for action"),
            DecisionReason::OutsideScope => {
                f.write_str("resource outside caller's organizational scope")
            }
            DecisionReason::LookupFailed(detail) => {
                write!(f, "organization lookup failed: {detail}")
            }
        }
    }
}

/// Outcome of one authorization evaluation.
///
/// `scope` is set on target-less allows so the invoking collaborator can
/// filter its own query by it; the engine never filters business data itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<DecisionReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<BTreeSet<OrgId>>,
}

impl Decision {
    fn allow(scope: Option<BTreeSet<OrgId>>) -> Self {
        Self {
            outcome: Outcome::Allow,
            reason: None,
            scope,
        }
    }

    fn deny(reason: DecisionReason) -> Self {
        Self {
            outcome: Outcome::Deny,
            reason: Some(reason),
            scope: None,
        }
    }

    /// The system could not determine whether the action is allowed;
    /// access is denied by default.
    fn error(reason: DecisionReason) -> Self {
        Self {
            outcome: Outcome::Error,
            reason: Some(reason),
            scope: None,
        }
    }

    pub fn is_allowed(&self) -> bool {
        self.outcome == Outcome::Allow
    }
}

/// Engine failure.
///
/// Denials are not errors; the only failure `decide` itself can surface is an
/// audit trail gap, which must reach the transport layer so operators can
/// detect it.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to append audit record: {0}")]
    Audit(#[from] AuditStoreError),
}

/// The authorization façade.
///
/// Holds the immutable permission matrix plus handles to the two external
/// collaborators. All methods take `&self`; any number of decisions may run
/// concurrently.
pub struct DecisionEngine {
    matrix: PermissionMatrix,
    orgs: Arc<dyn OrganizationLookup>,
    audit: Arc<dyn AuditStore>,
}

impl DecisionEngine {
    pub fn new(orgs: Arc<dyn OrganizationLookup>, audit: Arc<dyn AuditStore>) -> Self {
        Self {
            matrix: PermissionMatrix::new(),
            orgs,
            audit,
        }
    }

    /// Decide whether `caller` may perform `action`, optionally on a resource
    /// belonging to `target_org`.
    ///
    /// Evaluation order: action check first (a role-level denial
    /// short-circuits scope resolution, keeping the failure reason
    /// unambiguous), then scope membership when a target org is given. With
    /// no target org (bulk/listing case) the decision is allow and carries
    /// the resolved scope set.
    ///
    /// Exactly one audit record is appended per call, before returning,
    /// including error paths.
    pub fn decide(
        &self,
        caller: &CallerContext,
        action: Action,
        target_org: Option<OrgId>,
    ) -> Result<Decision, EngineError> {
        self.decide_on(caller, action, target_org, None)
    }

    /// Like [`decide`](Self::decide), additionally naming the specific target
    /// entity in the audit record.
    pub fn decide_on(
        &self,
        caller: &CallerContext,
        action: Action,
        target_org: Option<OrgId>,
        entity_id: Option<&str>,
    ) -> Result<Decision, EngineError> {
        let decision = self.evaluate(caller, action, target_org);

        match decision.outcome {
            Outcome::Allow => tracing::debug!(
                user_id = %caller.user_id, role = %caller.role, %action, "access allowed"
            ),
            Outcome::Deny => tracing::debug!(
                user_id = %caller.user_id, role = %caller.role, %action,
                reason = %decision.reason.as_ref().map(ToString::to_string).unwrap_or_default(),
                "access denied"
            ),
            Outcome::Error => tracing::warn!(
                user_id = %caller.user_id, role = %caller.role, %action,
                reason = %decision.reason.as_ref().map(ToString::to_string).unwrap_or_default(),
                "access evaluation failed; denying by default"
            ),
        }

        self.audit.append(&AuditRecord {
            ts: Utc::now(),
            user_id: caller.user_id,
            role: caller.role.to_string(),
            org_id: target_org.unwrap_or(caller.org_id),
            action: action.to_string(),
            entity: action.entity().to_string(),
            entity_id: entity_id.map(str::to_string),
            outcome: decision.outcome,
            reason: decision.reason.as_ref().map(ToString::to_string),
        })?;

        Ok(decision)
    }

    fn evaluate(&self, caller: &CallerContext, action: Action, target_org: Option<OrgId>) -> Decision {
        if !self.matrix.is_granted(caller.role, action) {
            return Decision::deny(DecisionReason::RoleNotPermitted);
        }

        let scope = match resolve_scope(caller, &self.orgs) {
            Ok(scope) => scope,
            Err(LookupError::Unavailable(detail)) => {
                return Decision::error(DecisionReason::LookupFailed(detail));
            }
        };

        match target_org {
            Some(target) if scope.contains(&target) => Decision::allow(None),
            Some(_) => Decision::deny(DecisionReason::OutsideScope),
            None => Decision::allow(Some(scope)),
        }
    }
}
