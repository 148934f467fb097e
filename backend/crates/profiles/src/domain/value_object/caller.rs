//! Caller Identity
//!
//! Who is performing a request: the account they act for (if any) and the
//! role their token carries.

use kernel::id::AccountId;

use super::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub account_id: Option<AccountId>,
    pub role: Role,
}

impl Caller {
    pub const fn anonymous() -> Self {
        Self {
            account_id: None,
            role: Role::Anon,
        }
    }

    pub const fn account(account_id: AccountId) -> Self {
        Self {
            account_id: Some(account_id),
            role: Role::Authenticated,
        }
    }

    pub const fn service() -> Self {
        Self {
            account_id: None,
            role: Role::Service,
        }
    }

    pub const fn auth_admin() -> Self {
        Self {
            account_id: None,
            role: Role::AuthAdmin,
        }
    }

    /// True when the caller is an authenticated end user acting for `owner`
    pub fn owns(&self, owner: &AccountId) -> bool {
        self.role == Role::Authenticated && self.account_id.as_ref() == Some(owner)
    }
}

impl Default for Caller {
    fn default() -> Self {
        Self::anonymous()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owns_requires_authenticated_role() {
        let id = AccountId::new();
        assert!(Caller::account(id).owns(&id));
        assert!(!Caller::account(id).owns(&AccountId::new()));

        let spoofed = Caller {
            account_id: Some(id),
            role: Role::Anon,
        };
        assert!(!spoofed.owns(&id));
        assert!(!Caller::service().owns(&id));
    }
}
