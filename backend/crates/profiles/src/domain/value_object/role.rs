use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Database-style role carried by every caller.
///
/// Codes match the `role` claim issued by the authentication subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// No token presented
    #[default]
    Anon,
    /// End user acting on their own behalf
    Authenticated,
    /// Trusted backend service
    #[serde(rename = "service_role")]
    Service,
    /// The authentication subsystem's own service identity
    AuthAdmin,
}

impl Role {
    #[inline]
    pub const fn code(&self) -> &'static str {
        use Role::*;
        match self {
            Anon => "anon",
            Authenticated => "authenticated",
            Service => "service_role",
            AuthAdmin => "auth_admin",
        }
    }

    /// Roles that act for the system rather than for one account
    #[inline]
    pub const fn is_trusted(&self) -> bool {
        matches!(self, Role::Service | Role::AuthAdmin)
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        use Role::*;
        match code {
            "anon" => Ok(Anon),
            "authenticated" => Ok(Authenticated),
            "service_role" => Ok(Service),
            "auth_admin" => Ok(AuthAdmin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role: {0}")]
pub struct UnknownRole(pub String);
