//! Domain Layer
//!
//! Entities, value objects, repository traits, and the access policy.

pub mod entity;
pub mod policy;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::{Account, Profile, ProfileChanges, ProfileRefresh};
pub use repository::{AccountRepository, ProfileRepository};
