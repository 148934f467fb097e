//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::ProfilesAppState;
pub use middleware::{CallerMiddlewareState, require_trusted_role, resolve_caller};
pub use router::{profiles_router, profiles_router_generic};
