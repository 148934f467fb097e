//! Account Entity
//!
//! Authentication record owned by the authentication subsystem. This crate
//! only reads it.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    AccountId, account_metadata::AccountMetadata, email::Email,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub account_id: AccountId,
    /// Absent for phone or anonymous signups
    pub email: Option<Email>,
    pub metadata: AccountMetadata,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(email: Option<Email>, metadata: AccountMetadata) -> Self {
        Self {
            account_id: AccountId::new(),
            email,
            metadata,
            created_at: Utc::now(),
        }
    }
}
