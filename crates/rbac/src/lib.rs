//! `taskgrid-rbac` — pure authorization core (zero-trust).
//!
//! Role inheritance, the action permission matrix, two-level organization
//! scoping, and the decision engine that combines them and records every
//! outcome to the audit trail. This crate is intentionally decoupled from
//! HTTP and storage: its only I/O runs through the [`OrganizationLookup`]
//! capability and the audit store trait.

pub mod action;
pub mod context;
pub mod engine;
pub mod matrix;
pub mod roles;
pub mod routes;
pub mod scope;

pub use action::{Action, ALL_ACTIONS, AUDIT_ACTIONS, TASK_ACTIONS};
pub use context::{CallerContext, ContextError};
pub use engine::{Decision, DecisionEngine, DecisionReason, EngineError};
pub use matrix::{can, PermissionMatrix, PERMISSIONS};
pub use roles::{Role, ALL_ROLES, DEFAULT_ROLE};
pub use routes::RouteActions;
pub use scope::{resolve_scope, InMemoryOrgDirectory, LookupError, OrganizationLookup};
