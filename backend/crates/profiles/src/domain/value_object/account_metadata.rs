//! Account Metadata
//!
//! Free-form map supplied by the authentication subsystem at signup
//! (OAuth providers fill it with whatever claims they expose).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const FULL_NAME_KEY: &str = "full_name";
pub const NAME_KEY: &str = "name";
pub const AVATAR_URL_KEY: &str = "avatar_url";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountMetadata(Map<String, Value>);

impl AccountMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures and provisioning
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Non-blank string value for `key`.
    ///
    /// Missing keys, `null`, non-string values and whitespace-only strings
    /// all count as absent.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn full_name(&self) -> Option<&str> {
        self.text(FULL_NAME_KEY)
    }

    pub fn name(&self) -> Option<&str> {
        self.text(NAME_KEY)
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.text(AVATAR_URL_KEY)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_ignores_blank_and_non_strings() {
        let meta: AccountMetadata = serde_json::from_value(json!({
            "full_name": "   ",
            "name": 42,
            "avatar_url": null,
        }))
        .unwrap();

        assert_eq!(meta.full_name(), None);
        assert_eq!(meta.name(), None);
        assert_eq!(meta.avatar_url(), None);
    }

    #[test]
    fn test_text_trims() {
        let meta = AccountMetadata::new().with("full_name", "  Jane Doe ");
        assert_eq!(meta.full_name(), Some("Jane Doe"));
    }

    #[test]
    fn test_metadata_must_be_an_object() {
        assert!(serde_json::from_value::<AccountMetadata>(json!([1, 2])).is_err());
        assert!(AccountMetadata::new().as_map().is_empty());
    }
}
