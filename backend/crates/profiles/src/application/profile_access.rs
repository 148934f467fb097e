//! Profile Access Use Case
//!
//! Caller-facing reads and writes on profiles. Every storage operation is
//! preceded by an access-policy check.

use std::sync::Arc;

use crate::domain::entity::{Profile, ProfileChanges};
use crate::domain::policy::{self, Action};
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::{AccountId, caller::Caller};
use crate::error::{ProfileError, ProfileResult};

/// Maximum display name length
const FULL_NAME_MAX_LENGTH: usize = 200;

/// Partial profile edit; `None` leaves the field alone
#[derive(Debug, Clone, Default)]
pub struct ProfileEdit {
    pub full_name: Option<String>,
    /// `Some(None)` clears the avatar
    pub avatar_url: Option<Option<String>>,
}

pub struct ProfileAccessUseCase<R>
where
    R: ProfileRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> ProfileAccessUseCase<R>
where
    R: ProfileRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, caller: &Caller, id: &AccountId) -> ProfileResult<Profile> {
        policy::authorize(caller, Action::Select, id)?;

        self.repo
            .find_by_id(id)
            .await?
            .ok_or(ProfileError::ProfileNotFound)
    }

    /// The caller's own profile
    pub async fn me(&self, caller: &Caller) -> ProfileResult<Profile> {
        let id = caller.account_id.ok_or(ProfileError::Unauthenticated)?;
        self.get(caller, &id).await
    }

    /// Profiles visible to the caller; hidden rows are filtered out
    pub async fn list(&self, caller: &Caller) -> ProfileResult<Vec<Profile>> {
        if caller.role.is_trusted() {
            let all = self.repo.list().await?;
            return Ok(all
                .into_iter()
                .filter(|p| policy::permits(caller, Action::Select, &p.id))
                .collect());
        }

        // End users can see at most their own row.
        match caller.account_id {
            Some(id) if policy::permits(caller, Action::Select, &id) => {
                Ok(self.repo.find_by_id(&id).await?.into_iter().collect())
            }
            _ => Ok(Vec::new()),
        }
    }

    pub async fn update(
        &self,
        caller: &Caller,
        id: &AccountId,
        edit: ProfileEdit,
    ) -> ProfileResult<Profile> {
        policy::authorize(caller, Action::Update, id)?;

        let changes = ProfileChanges {
            full_name: edit
                .full_name
                .as_deref()
                .map(validate_full_name)
                .transpose()?,
            avatar_url: edit.avatar_url.map(|avatar_url| {
                avatar_url
                    .map(|url| url.trim().to_string())
                    .filter(|url| !url.is_empty())
            }),
            ..ProfileChanges::new(*id)
        };

        let profile = self.repo.update(&changes).await?;

        tracing::info!(profile_id = %id, role = %caller.role, "Profile updated");

        Ok(profile)
    }

    pub async fn delete(&self, caller: &Caller, id: &AccountId) -> ProfileResult<()> {
        policy::authorize(caller, Action::Delete, id)?;

        if !self.repo.delete(id).await? {
            return Err(ProfileError::ProfileNotFound);
        }

        tracing::info!(profile_id = %id, role = %caller.role, "Profile deleted");

        Ok(())
    }
}

fn validate_full_name(full_name: &str) -> ProfileResult<String> {
    let full_name = full_name.trim();

    if full_name.is_empty() {
        return Err(ProfileError::InvalidInput(
            "Full name cannot be empty".to_string(),
        ));
    }
    if full_name.chars().count() > FULL_NAME_MAX_LENGTH {
        return Err(ProfileError::InvalidInput(format!(
            "Full name must be at most {} characters",
            FULL_NAME_MAX_LENGTH
        )));
    }

    Ok(full_name.to_string())
}
