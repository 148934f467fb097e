//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in `infra`.

use crate::domain::entity::{Account, Profile, ProfileChanges, ProfileRefresh};
use crate::domain::value_object::AccountId;
use crate::error::ProfileResult;

/// Profile store.
///
/// Implementations must enforce, at the storage layer:
/// - one profile per identifier (`insert` fails with `ProfileExists`)
/// - email absent or well formed (`InvalidEmail` otherwise)
#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    /// Insert a new profile
    async fn insert(&self, profile: &Profile) -> ProfileResult<()>;

    /// Apply a sync refresh to an existing profile in one atomic write.
    /// Returns the stored profile, or `ProfileNotFound`.
    async fn refresh(&self, refresh: &ProfileRefresh) -> ProfileResult<Profile>;

    async fn find_by_id(&self, id: &AccountId) -> ProfileResult<Option<Profile>>;

    /// All profiles, oldest first
    async fn list(&self) -> ProfileResult<Vec<Profile>>;

    /// Apply an owner edit in one atomic write. Only the name, avatar and
    /// `updated_at` columns change. Returns the stored profile, or
    /// `ProfileNotFound`.
    async fn update(&self, changes: &ProfileChanges) -> ProfileResult<Profile>;

    /// Returns whether a row was removed
    async fn delete(&self, id: &AccountId) -> ProfileResult<bool>;
}

/// Account store, standing in for the authentication subsystem's table
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account; `AccountExists` on duplicate identifier
    async fn create(&self, account: &Account) -> ProfileResult<()>;
}
