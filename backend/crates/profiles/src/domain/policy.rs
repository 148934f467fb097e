//! Access Policy
//!
//! Row-level rules for the `profiles` collection expressed as predicates
//! over (caller, owner, role). Checked by the application layer before
//! every storage operation.

use derive_more::Display;

use crate::domain::value_object::{AccountId, caller::Caller, role::Role};
use crate::error::{ProfileError, ProfileResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Action {
    #[display("select")]
    Select,
    #[display("insert")]
    Insert,
    #[display("update")]
    Update,
    #[display("delete")]
    Delete,
}

/// Whether `caller` may perform `action` on the profile owned by `owner`.
///
/// | action | owner | service_role | auth_admin |
/// |--------|-------|--------------|------------|
/// | select | yes   | yes          | yes        |
/// | insert | yes   | yes          | yes        |
/// | update | yes   | yes          | yes        |
/// | delete | yes   | yes          | no         |
///
/// `anon` gets nothing.
pub fn permits(caller: &Caller, action: Action, owner: &AccountId) -> bool {
    if caller.owns(owner) {
        return true;
    }
    match caller.role {
        Role::Service => true,
        Role::AuthAdmin => action != Action::Delete,
        Role::Anon | Role::Authenticated => false,
    }
}

/// [`permits`] as a result.
///
/// A hidden row reads as "not found" for `select` so that other accounts'
/// profiles cannot be discovered; writes answer `Forbidden`, or
/// `Unauthenticated` for anonymous callers.
pub fn authorize(caller: &Caller, action: Action, owner: &AccountId) -> ProfileResult<()> {
    if permits(caller, action, owner) {
        return Ok(());
    }

    tracing::debug!(
        role = %caller.role,
        action = %action,
        owner = %owner,
        "Profile access denied"
    );

    match (caller.role, action) {
        (_, Action::Select) => Err(ProfileError::ProfileNotFound),
        (Role::Anon, _) => Err(ProfileError::Unauthenticated),
        _ => Err(ProfileError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Action; 4] = [Action::Select, Action::Insert, Action::Update, Action::Delete];

    #[test]
    fn test_owner_may_do_everything() {
        let owner = AccountId::new();
        for action in ALL {
            assert!(permits(&Caller::account(owner), action, &owner), "{action}");
        }
    }

    #[test]
    fn test_other_accounts_get_nothing() {
        let owner = AccountId::new();
        let stranger = Caller::account(AccountId::new());
        for action in ALL {
            assert!(!permits(&stranger, action, &owner), "{action}");
        }
    }

    #[test]
    fn test_anon_gets_nothing() {
        let owner = AccountId::new();
        for action in ALL {
            assert!(!permits(&Caller::anonymous(), action, &owner), "{action}");
        }
    }

    #[test]
    fn test_service_role_may_do_everything() {
        let owner = AccountId::new();
        for action in ALL {
            assert!(permits(&Caller::service(), action, &owner), "{action}");
        }
    }

    #[test]
    fn test_auth_admin_may_not_delete() {
        let owner = AccountId::new();
        assert!(permits(&Caller::auth_admin(), Action::Select, &owner));
        assert!(permits(&Caller::auth_admin(), Action::Insert, &owner));
        assert!(permits(&Caller::auth_admin(), Action::Update, &owner));
        assert!(!permits(&Caller::auth_admin(), Action::Delete, &owner));
    }

    #[test]
    fn test_authorize_error_shapes() {
        let owner = AccountId::new();
        let stranger = Caller::account(AccountId::new());

        assert!(matches!(
            authorize(&stranger, Action::Select, &owner),
            Err(ProfileError::ProfileNotFound)
        ));
        assert!(matches!(
            authorize(&stranger, Action::Update, &owner),
            Err(ProfileError::Forbidden)
        ));
        assert!(matches!(
            authorize(&Caller::anonymous(), Action::Delete, &owner),
            Err(ProfileError::Unauthenticated)
        ));
        assert!(authorize(&Caller::account(owner), Action::Delete, &owner).is_ok());
    }
}
