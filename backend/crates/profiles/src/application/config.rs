//! Application Configuration
//!
//! Configuration for the profiles application layer.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ProfilesConfig {
    /// HS256 secret shared with the authentication subsystem
    pub jwt_secret: Vec<u8>,
    /// Expected `aud` claim; `None` skips the audience check
    pub jwt_audience: Option<String>,
    /// Lifetime of tokens issued by [`crate::infra::jwt::issue_token`]
    pub token_ttl: Duration,
    /// Display name for accounts with neither a metadata name nor an email
    pub anonymous_display_name: String,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            jwt_audience: None,
            token_ttl: Duration::from_secs(3600), // 1 hour
            anonymous_display_name: String::new(),
        }
    }
}

impl ProfilesConfig {
    /// Config with a random 32-byte secret
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = vec![0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            jwt_secret: secret,
            ..Default::default()
        }
    }

    /// Development config: random secret, tokens valid for a day
    pub fn development() -> Self {
        Self {
            token_ttl: Duration::from_secs(24 * 3600),
            ..Self::with_random_secret()
        }
    }

    pub fn token_ttl_secs(&self) -> i64 {
        self.token_ttl.as_secs() as i64
    }
}
