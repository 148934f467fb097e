//! Access Tokens
//!
//! HS256 JWTs issued by the authentication subsystem. `sub` carries the
//! account identifier, `role` one of the [`Role`] codes.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::application::config::ProfilesConfig;
use crate::domain::value_object::{AccountId, caller::Caller, role::Role};
use crate::error::{ProfileError, ProfileResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn for_caller(caller: &Caller, config: &ProfilesConfig) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: caller.account_id.map(|id| id.to_string()),
            role: caller.role.code().to_string(),
            aud: config.jwt_audience.clone(),
            exp: now + config.token_ttl_secs(),
            iat: now,
        }
    }

    /// Resolve the caller these claims describe
    pub fn into_caller(self) -> ProfileResult<Caller> {
        let role: Role = self.role.parse().map_err(|_| ProfileError::InvalidToken)?;

        let account_id = self
            .sub
            .map(|sub| sub.parse::<AccountId>())
            .transpose()
            .map_err(|_| ProfileError::InvalidToken)?;

        match (role, account_id) {
            // An end-user token without a subject names nobody.
            (Role::Authenticated, None) => Err(ProfileError::InvalidToken),
            // Anonymous tokens never act for an account.
            (Role::Anon, _) => Ok(Caller::anonymous()),
            (role, account_id) => Ok(Caller { account_id, role }),
        }
    }
}

/// Verifies bearer tokens against the configured secret
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &ProfilesConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        match &config.jwt_audience {
            Some(aud) => {
                validation.set_audience(&[aud]);
                // Without this a token that omits `aud` skips the check.
                validation.set_required_spec_claims(&["exp", "aud"]);
            }
            None => validation.validate_aud = false,
        }

        Self {
            key: DecodingKey::from_secret(&config.jwt_secret),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> ProfileResult<Caller> {
        let data = decode::<Claims>(token, &self.key, &self.validation)?;
        data.claims.into_caller()
    }
}

/// Issue a token for `caller`; used by trusted tooling and tests
pub fn issue_token(caller: &Caller, config: &ProfilesConfig) -> ProfileResult<String> {
    if config.jwt_secret.is_empty() {
        return Err(ProfileError::Internal("JWT secret not configured".to_string()));
    }

    let claims = Claims::for_caller(caller, config);
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(&config.jwt_secret),
    )
    .map_err(|e| ProfileError::Internal(format!("Token generation failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_for_each_caller_shape() {
        let config = ProfilesConfig::with_random_secret();
        let verifier = TokenVerifier::new(&config);
        let id = AccountId::new();

        for caller in [Caller::account(id), Caller::service(), Caller::auth_admin()] {
            let token = issue_token(&caller, &config).unwrap();
            assert_eq!(verifier.verify(&token).unwrap(), caller);
        }
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = ProfilesConfig::with_random_secret();
        let verifier = TokenVerifier::new(&ProfilesConfig::with_random_secret());

        let token = issue_token(&Caller::service(), &issuer).unwrap();
        assert!(matches!(verifier.verify(&token), Err(ProfileError::InvalidToken)));
        assert!(matches!(verifier.verify("garbage"), Err(ProfileError::InvalidToken)));
    }

    #[test]
    fn test_audience_is_enforced_when_configured() {
        let mut config = ProfilesConfig::with_random_secret();
        let token_without_aud = issue_token(&Caller::service(), &config).unwrap();

        config.jwt_audience = Some("authenticated".to_string());
        let verifier = TokenVerifier::new(&config);
        assert!(verifier.verify(&token_without_aud).is_err());

        let token = issue_token(&Caller::service(), &config).unwrap();
        assert_eq!(verifier.verify(&token).unwrap(), Caller::service());

        let mut other = config.clone();
        other.jwt_audience = Some("another-service".to_string());
        let token_for_other = issue_token(&Caller::service(), &other).unwrap();
        assert!(matches!(
            verifier.verify(&token_for_other),
            Err(ProfileError::InvalidToken)
        ));
    }

    #[test]
    fn test_claims_resolution() {
        let claims = |sub: Option<&str>, role: &str| Claims {
            sub: sub.map(str::to_string),
            role: role.to_string(),
            aud: None,
            exp: 0,
            iat: 0,
        };

        assert!(matches!(
            claims(None, "authenticated").into_caller(),
            Err(ProfileError::InvalidToken)
        ));
        assert!(matches!(
            claims(Some("not-a-uuid"), "authenticated").into_caller(),
            Err(ProfileError::InvalidToken)
        ));
        assert!(matches!(
            claims(None, "postgres").into_caller(),
            Err(ProfileError::InvalidToken)
        ));

        let id = AccountId::new();
        let anon = claims(Some(&id.to_string()), "anon").into_caller().unwrap();
        assert_eq!(anon, Caller::anonymous());
    }

    #[test]
    fn test_issue_requires_secret() {
        assert!(issue_token(&Caller::service(), &ProfilesConfig::default()).is_err());
    }
}
