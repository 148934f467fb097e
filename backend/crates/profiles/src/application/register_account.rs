//! Register Account Use Case
//!
//! Stores a new account and announces it on the event bus. Stands in for
//! the authentication subsystem's signup when accounts are provisioned
//! through this service.

use std::sync::Arc;

use crate::application::events::{AccountEvent, AccountEventBus, PublishReport};
use crate::domain::entity::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{AccountId, account_metadata::AccountMetadata, email::Email};
use crate::error::{ProfileError, ProfileResult};

#[derive(Debug)]
pub struct RegisterAccountInput {
    pub email: Option<String>,
    pub metadata: AccountMetadata,
}

#[derive(Debug)]
pub struct RegisterAccountOutput {
    pub account_id: AccountId,
}

pub struct RegisterAccountUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    events: Arc<AccountEventBus>,
}

impl<A> RegisterAccountUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, events: Arc<AccountEventBus>) -> Self {
        Self {
            account_repo,
            events,
        }
    }

    /// Succeeds as soon as the account is stored; what the event handlers
    /// do with it afterwards does not change the result.
    pub async fn execute(&self, input: RegisterAccountInput) -> ProfileResult<RegisterAccountOutput> {
        let email = input.email.map(Email::new).transpose()?;

        let account = Account::new(email, input.metadata);
        self.account_repo.create(&account).await?;

        let report = self
            .events
            .publish(&AccountEvent::Created(account.clone()))
            .await;

        tracing::info!(
            account_id = %account.account_id,
            handlers_failed = report.failures.len(),
            "Account registered"
        );

        Ok(RegisterAccountOutput {
            account_id: account.account_id,
        })
    }

    /// Mirror an account the authentication subsystem already committed,
    /// then announce it. Replays of a known account are announced again.
    pub async fn record(&self, account: Account) -> ProfileResult<PublishReport> {
        match self.account_repo.create(&account).await {
            Ok(()) | Err(ProfileError::AccountExists) => {}
            Err(e) => return Err(e),
        }

        Ok(self.events.publish(&AccountEvent::Created(account)).await)
    }
}
