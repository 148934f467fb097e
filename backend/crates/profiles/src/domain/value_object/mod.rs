//! Value Object Module

pub mod account_metadata;
pub mod caller;
pub mod email;
pub mod role;

pub use kernel::id::AccountId;
