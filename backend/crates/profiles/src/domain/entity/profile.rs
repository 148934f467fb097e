//! Profile Entity
//!
//! Application-owned display data for an account, keyed by the account's
//! identifier (one profile per account).

use chrono::{DateTime, Utc};

use crate::domain::entity::account::Account;
use crate::domain::services;
use crate::domain::value_object::{AccountId, email::Email};

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Same value as the owning account's identifier
    pub id: AccountId,
    /// Denormalized copy of the account email
    pub email: Option<Email>,
    /// Never null once created
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// First-sight profile for a newly created account.
    ///
    /// `anonymous_name` is used when neither metadata nor email yields a
    /// display name.
    pub fn from_account(account: &Account, anonymous_name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: account.account_id,
            email: account.email.clone(),
            full_name: services::initial_display_name(
                &account.metadata,
                account.email.as_ref(),
                anonymous_name,
            ),
            avatar_url: account.metadata.avatar_url().map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update applied when a profile already exists for a synced account.
///
/// `None` for `full_name` / `avatar_url` means "keep the stored value";
/// `email` is always overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRefresh {
    pub id: AccountId,
    pub email: Option<Email>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRefresh {
    pub fn from_account(account: &Account) -> Self {
        Self {
            id: account.account_id,
            email: account.email.clone(),
            full_name: services::metadata_display_name(&account.metadata).map(str::to_string),
            avatar_url: account.metadata.avatar_url().map(str::to_string),
            updated_at: Utc::now(),
        }
    }

    /// In-place form of the storage update; `created_at` is left alone
    pub fn apply_to(&self, profile: &mut Profile) {
        profile.email = self.email.clone();
        if let Some(name) = &self.full_name {
            profile.full_name = name.clone();
        }
        if let Some(url) = &self.avatar_url {
            profile.avatar_url = Some(url.clone());
        }
        profile.updated_at = self.updated_at;
    }
}

/// Owner edit of the display columns.
///
/// Email and `created_at` belong to the sync path and are never written here.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileChanges {
    pub id: AccountId,
    /// `None` keeps the stored name
    pub full_name: Option<String>,
    /// `None` keeps the stored avatar, `Some(None)` clears it
    pub avatar_url: Option<Option<String>>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileChanges {
    pub fn new(id: AccountId) -> Self {
        Self {
            id,
            full_name: None,
            avatar_url: None,
            updated_at: Utc::now(),
        }
    }

    /// In-place form of the storage update
    pub fn apply_to(&self, profile: &mut Profile) {
        if let Some(name) = &self.full_name {
            profile.full_name = name.clone();
        }
        if let Some(url) = &self.avatar_url {
            profile.avatar_url = url.clone();
        }
        profile.updated_at = self.updated_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::account_metadata::AccountMetadata;

    fn account(email: Option<&str>, metadata: AccountMetadata) -> Account {
        Account::new(email.map(Email::from_db), metadata)
    }

    #[test]
    fn test_from_account_copies_fields() {
        let acc = account(
            Some("jane@example.com"),
            AccountMetadata::new()
                .with("full_name", "Jane Doe")
                .with("avatar_url", "https://cdn.example.com/jane.png"),
        );
        let profile = Profile::from_account(&acc, "");

        assert_eq!(profile.id, acc.account_id);
        assert_eq!(profile.email, acc.email);
        assert_eq!(profile.full_name, "Jane Doe");
        assert_eq!(
            profile.avatar_url.as_deref(),
            Some("https://cdn.example.com/jane.png")
        );
        assert_eq!(profile.created_at, profile.updated_at);
    }

    #[test]
    fn test_refresh_keeps_stored_values_when_metadata_is_silent() {
        let original = account(
            Some("jane@example.com"),
            AccountMetadata::new()
                .with("full_name", "Jane Doe")
                .with("avatar_url", "https://cdn.example.com/jane.png"),
        );
        let mut profile = Profile::from_account(&original, "");
        let created_at = profile.created_at;

        let mut later = account(Some("jane.doe@example.org"), AccountMetadata::new());
        later.account_id = original.account_id;
        ProfileRefresh::from_account(&later).apply_to(&mut profile);

        assert_eq!(profile.email.as_ref().map(Email::as_str), Some("jane.doe@example.org"));
        // Stored name wins over the email local part on refresh.
        assert_eq!(profile.full_name, "Jane Doe");
        assert_eq!(
            profile.avatar_url.as_deref(),
            Some("https://cdn.example.com/jane.png")
        );
        assert_eq!(profile.created_at, created_at);
        assert!(profile.updated_at >= created_at);
    }

    #[test]
    fn test_refresh_clears_email_when_account_has_none() {
        let acc = account(Some("jane@example.com"), AccountMetadata::new());
        let mut profile = Profile::from_account(&acc, "");

        let mut phone_only = account(None, AccountMetadata::new().with("name", "Jane"));
        phone_only.account_id = acc.account_id;
        ProfileRefresh::from_account(&phone_only).apply_to(&mut profile);

        assert_eq!(profile.email, None);
        assert_eq!(profile.full_name, "Jane");
    }

    #[test]
    fn test_changes_leave_email_alone() {
        let acc = account(
            Some("jane@example.com"),
            AccountMetadata::new().with("avatar_url", "https://cdn.example.com/jane.png"),
        );
        let mut profile = Profile::from_account(&acc, "");

        let changes = ProfileChanges {
            full_name: Some("Jane Doe".to_string()),
            avatar_url: Some(None),
            ..ProfileChanges::new(acc.account_id)
        };
        changes.apply_to(&mut profile);

        assert_eq!(profile.full_name, "Jane Doe");
        assert_eq!(profile.avatar_url, None);
        assert_eq!(profile.email, acc.email);

        ProfileChanges::new(acc.account_id).apply_to(&mut profile);
        assert_eq!(profile.full_name, "Jane Doe");
    }
}
