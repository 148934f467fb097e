//! Profiles Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, access policy, repository traits
//! - `application/` - Use cases, account event bus, configuration
//! - `infra/` - PostgreSQL and in-memory stores, JWT verification
//! - `presentation/` - HTTP handlers, DTOs, router, caller middleware
//!
//! ## Features
//! - Public profile created for every new account
//! - Display name from `full_name` or `name` metadata, else the email local part
//! - Replayed account events refresh the existing profile instead of failing
//! - Profile sync failures never fail the signup that triggered them
//!
//! ## Security Model
//! - Callers identified by HS256 bearer tokens (`sub` + `role` claims)
//! - Row access decided per (caller, owner, role) before any storage call
//! - Account hooks restricted to the `service_role` and `auth_admin` roles

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::ProfilesConfig;
pub use error::{ProfileError, ProfileResult};
pub use infra::postgres::PgProfileRepository;
pub use presentation::router::profiles_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
