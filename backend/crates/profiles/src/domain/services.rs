//! Domain Services
//!
//! Display-name derivation for profiles.

use crate::domain::value_object::{account_metadata::AccountMetadata, email::Email};

/// Name supplied by the identity provider: `full_name`, then `name`
pub fn metadata_display_name(metadata: &AccountMetadata) -> Option<&str> {
    metadata.full_name().or_else(|| metadata.name())
}

/// Display name for a brand-new profile.
///
/// Precedence: metadata name, then the email local part, then
/// `anonymous_name`.
pub fn initial_display_name(
    metadata: &AccountMetadata,
    email: Option<&Email>,
    anonymous_name: &str,
) -> String {
    metadata_display_name(metadata)
        .or_else(|| email.map(Email::local_part))
        .unwrap_or(anonymous_name)
        .to_string()
}
