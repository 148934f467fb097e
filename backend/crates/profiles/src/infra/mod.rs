//! Infrastructure Layer
//!
//! Storage backends and token handling.

pub mod jwt;
pub mod memory;
pub mod postgres;

pub use memory::{MemoryAccountRepository, MemoryProfileRepository, MemoryStore};
pub use postgres::PgProfileRepository;
