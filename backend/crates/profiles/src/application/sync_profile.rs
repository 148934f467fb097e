//! Profile Sync Use Case
//!
//! Mirrors a newly created account into the profile store: insert a new
//! profile, or refresh the existing one when the identifier is already
//! taken.

use async_trait::async_trait;
use derive_more::Display;
use std::sync::Arc;

use crate::application::config::ProfilesConfig;
use crate::application::events::{AccountEvent, AccountEventHandler, HandlerError};
use crate::domain::entity::{Account, Profile, ProfileRefresh};
use crate::domain::policy::{self, Action};
use crate::domain::repository::ProfileRepository;
use crate::domain::value_object::{AccountId, caller::Caller};
use crate::error::{ProfileError, ProfileResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SyncOutcome {
    #[display("created")]
    Created,
    #[display("updated")]
    Updated,
}

/// A sync that did not reach the store. Already logged when returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("profile sync failed for account {account_id}: {detail}")]
pub struct SyncFailure {
    pub account_id: AccountId,
    pub detail: String,
}

/// Identity the synchronizer writes with
const SYNC_CALLER: Caller = Caller::service();

pub struct ProfileSynchronizer<R>
where
    R: ProfileRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<ProfilesConfig>,
}

impl<R> ProfileSynchronizer<R>
where
    R: ProfileRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<ProfilesConfig>) -> Self {
        Self { repo, config }
    }

    /// Create or refresh the profile for `account`, propagating any error
    /// other than the identifier conflict.
    pub async fn sync(&self, account: &Account) -> ProfileResult<SyncOutcome> {
        policy::authorize(&SYNC_CALLER, Action::Insert, &account.account_id)?;
        let profile = Profile::from_account(account, &self.config.anonymous_display_name);

        match self.repo.insert(&profile).await {
            Ok(()) => {
                tracing::info!(account_id = %account.account_id, "Profile created");
                Ok(SyncOutcome::Created)
            }
            Err(ProfileError::ProfileExists) => {
                policy::authorize(&SYNC_CALLER, Action::Update, &account.account_id)?;
                let refresh = ProfileRefresh::from_account(account);
                self.repo.refresh(&refresh).await?;
                tracing::info!(account_id = %account.account_id, "Profile refreshed");
                Ok(SyncOutcome::Updated)
            }
            Err(e) => Err(e),
        }
    }

    /// [`Self::sync`] for callers that must not fail because of the profile.
    ///
    /// A failure is logged at warning level with the account identifier and
    /// handed back for the caller to drop.
    pub async fn sync_best_effort(&self, account: &Account) -> Result<SyncOutcome, SyncFailure> {
        self.sync(account).await.map_err(|e| {
            tracing::warn!(
                account_id = %account.account_id,
                error = %e,
                "Profile sync failed, account creation continues"
            );
            SyncFailure {
                account_id: account.account_id,
                detail: e.to_string(),
            }
        })
    }
}

#[async_trait]
impl<R> AccountEventHandler for ProfileSynchronizer<R>
where
    R: ProfileRepository + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        "profile_sync"
    }

    async fn handle(&self, event: &AccountEvent) -> Result<(), HandlerError> {
        match event {
            AccountEvent::Created(account) => {
                self.sync_best_effort(account)
                    .await
                    .map(|_| ())
                    .map_err(|failure| HandlerError {
                        handler: self.name(),
                        account_id: failure.account_id,
                        detail: failure.detail,
                    })
            }
        }
    }
}
