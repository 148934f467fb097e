//! In-memory Repository Implementations
//!
//! Used by tests and by local runs without a database. Enforces the same
//! constraints as the SQL schema.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entity::{Account, Profile, ProfileChanges, ProfileRefresh};
use crate::domain::repository::{AccountRepository, ProfileRepository};
use crate::domain::value_object::{AccountId, email::Email};
use crate::error::{ProfileError, ProfileResult};

#[derive(Clone, Default)]
pub struct MemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<AccountId, Profile>>>,
}

impl MemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }
}

/// Counterpart of the `profiles_email_format` check constraint
fn check_email(email: Option<&Email>) -> ProfileResult<()> {
    match email {
        Some(email) if !email.is_well_formed() => {
            Err(ProfileError::InvalidEmail(email.as_str().to_string()))
        }
        _ => Ok(()),
    }
}

impl ProfileRepository for MemoryProfileRepository {
    async fn insert(&self, profile: &Profile) -> ProfileResult<()> {
        check_email(profile.email.as_ref())?;

        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.id) {
            return Err(ProfileError::ProfileExists);
        }
        profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn refresh(&self, refresh: &ProfileRefresh) -> ProfileResult<Profile> {
        check_email(refresh.email.as_ref())?;

        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .get_mut(&refresh.id)
            .ok_or(ProfileError::ProfileNotFound)?;
        refresh.apply_to(profile);
        Ok(profile.clone())
    }

    async fn find_by_id(&self, id: &AccountId) -> ProfileResult<Option<Profile>> {
        Ok(self.profiles.read().await.get(id).cloned())
    }

    async fn list(&self) -> ProfileResult<Vec<Profile>> {
        let mut all: Vec<Profile> = self.profiles.read().await.values().cloned().collect();
        all.sort_by_key(|p| p.created_at);
        Ok(all)
    }

    async fn update(&self, changes: &ProfileChanges) -> ProfileResult<Profile> {
        let mut profiles = self.profiles.write().await;
        let stored = profiles
            .get_mut(&changes.id)
            .ok_or(ProfileError::ProfileNotFound)?;
        changes.apply_to(stored);
        Ok(stored.clone())
    }

    async fn delete(&self, id: &AccountId) -> ProfileResult<bool> {
        Ok(self.profiles.write().await.remove(id).is_some())
    }
}

#[derive(Clone, Default)]
pub struct MemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &AccountId) -> Option<Account> {
        self.accounts.read().await.get(id).cloned()
    }
}

impl AccountRepository for MemoryAccountRepository {
    async fn create(&self, account: &Account) -> ProfileResult<()> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.account_id) {
            return Err(ProfileError::AccountExists);
        }
        accounts.insert(account.account_id, account.clone());
        Ok(())
    }
}

/// Both stores behind one handle, for the generic router
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub profiles: MemoryProfileRepository,
    pub accounts: MemoryAccountRepository,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileRepository for MemoryStore {
    async fn insert(&self, profile: &Profile) -> ProfileResult<()> {
        self.profiles.insert(profile).await
    }

    async fn refresh(&self, refresh: &ProfileRefresh) -> ProfileResult<Profile> {
        self.profiles.refresh(refresh).await
    }

    async fn find_by_id(&self, id: &AccountId) -> ProfileResult<Option<Profile>> {
        self.profiles.find_by_id(id).await
    }

    async fn list(&self) -> ProfileResult<Vec<Profile>> {
        self.profiles.list().await
    }

    async fn update(&self, changes: &ProfileChanges) -> ProfileResult<Profile> {
        self.profiles.update(changes).await
    }

    async fn delete(&self, id: &AccountId) -> ProfileResult<bool> {
        self.profiles.delete(id).await
    }
}

impl AccountRepository for MemoryStore {
    async fn create(&self, account: &Account) -> ProfileResult<()> {
        self.accounts.create(account).await
    }
}
