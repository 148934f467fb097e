//! Shared Kernel
//!
//! Vocabulary shared by every crate in the workspace:
//! - Unified error type and result alias
//! - Typed identifiers
//!
//! Only things whose meaning is the same across all domains belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
