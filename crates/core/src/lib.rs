//! `taskgrid-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the two-level organization model, and the
//! domain error taxonomy shared by the authorization and audit crates.

pub mod error;
pub mod id;
pub mod org;

pub use error::{DomainError, DomainResult};
pub use id::{OrgId, UserId};
pub use org::Organization;
