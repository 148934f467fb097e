//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::domain::entity::{Account, Profile};
use crate::domain::value_object::{
    AccountId, account_metadata::AccountMetadata, email::Email,
};

// ============================================================================
// Account hook
// ============================================================================

/// Account record posted by the authentication subsystem after signup.
///
/// Accepts both camelCase and the subsystem's native snake_case row names.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreatedRequest {
    pub id: Uuid,
    pub email: Option<String>,
    #[serde(
        default,
        alias = "user_metadata",
        alias = "rawUserMetaData",
        alias = "raw_user_meta_data"
    )]
    pub user_metadata: Option<AccountMetadata>,
    #[serde(default, alias = "created_at")]
    pub created_at: Option<DateTime<Utc>>,
}

impl AccountCreatedRequest {
    /// Email is copied verbatim; the profile store decides whether it is
    /// acceptable.
    pub fn into_account(self) -> Account {
        Account {
            account_id: AccountId::from_uuid(self.id),
            email: self.email.map(Email::from_db),
            metadata: self.user_metadata.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreatedResponse {
    /// False when a handler failed; the account itself is unaffected
    pub profile_synced: bool,
}

// ============================================================================
// Account provisioning
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccountRequest {
    pub email: Option<String>,
    #[serde(default)]
    pub metadata: Option<AccountMetadata>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccountResponse {
    pub account_id: String,
}

// ============================================================================
// Profiles
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub email: Option<String>,
    pub full_name: String,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.to_string(),
            email: profile.email.map(Email::into_db),
            full_name: profile.full_name,
            avatar_url: profile.avatar_url,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileListResponse {
    pub profiles: Vec<ProfileResponse>,
}

/// Partial update. `avatarUrl: null` clears the avatar; an absent key
/// leaves it alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub avatar_url: Option<Option<String>>,
}

fn present_or_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_request_distinguishes_null_from_absent() {
        let absent: UpdateProfileRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.avatar_url, None);

        let cleared: UpdateProfileRequest =
            serde_json::from_value(json!({ "avatarUrl": null })).unwrap();
        assert_eq!(cleared.avatar_url, Some(None));

        let set: UpdateProfileRequest =
            serde_json::from_value(json!({ "avatarUrl": "https://cdn.example.com/a.png" }))
                .unwrap();
        assert_eq!(
            set.avatar_url,
            Some(Some("https://cdn.example.com/a.png".to_string()))
        );
    }

    #[test]
    fn test_account_created_request_accepts_raw_metadata_alias() {
        let id = Uuid::new_v4();
        let req: AccountCreatedRequest = serde_json::from_value(json!({
            "id": id,
            "email": "jane@example.com",
            "rawUserMetaData": { "full_name": "Jane Doe" },
        }))
        .unwrap();

        let account = req.into_account();
        assert_eq!(account.account_id.as_uuid(), &id);
        assert_eq!(account.metadata.full_name(), Some("Jane Doe"));
    }

    #[test]
    fn test_account_created_request_accepts_snake_case_row() {
        let id = Uuid::new_v4();
        let req: AccountCreatedRequest = serde_json::from_value(json!({
            "id": id,
            "email": "jane@example.com",
            "raw_user_meta_data": { "name": "Jane" },
            "created_at": "2024-05-01T12:00:00Z",
        }))
        .unwrap();

        let account = req.into_account();
        assert_eq!(account.metadata.name(), Some("Jane"));
        assert_eq!(account.created_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }
}
