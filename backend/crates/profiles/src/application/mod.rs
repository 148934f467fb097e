//! Application Layer
//!
//! Use cases, event bus, and configuration.

pub mod config;
pub mod events;
pub mod profile_access;
pub mod register_account;
pub mod sync_profile;

// Re-exports
pub use config::ProfilesConfig;
pub use events::{AccountEvent, AccountEventBus, AccountEventHandler, HandlerError, PublishReport};
pub use profile_access::{ProfileAccessUseCase, ProfileEdit};
pub use register_account::{RegisterAccountInput, RegisterAccountOutput, RegisterAccountUseCase};
pub use sync_profile::{ProfileSynchronizer, SyncFailure, SyncOutcome};
