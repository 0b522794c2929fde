//! # mbx-core
//!
//! Core types shared across the mbx crates:
//! - Role enum, role sets, and role requirements for protected views
//! - The normalized user identity produced by session resolution
//! - The backend response envelope (`{data}` / `{error}` / `{message}`)
//! - Domain DTOs for the mailbox and admin API surfaces

pub mod entities;
pub mod envelope;
pub mod identity;
pub mod roles;

pub use envelope::Envelope;
pub use identity::UserIdentity;
pub use roles::{Role, RoleRequirement, RoleSet, role_set};
