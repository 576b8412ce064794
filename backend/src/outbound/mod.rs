//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel with a bb8 pool
//! - **memory**: process-local repositories used without a database
//! - **security**: Argon2id password hashing and HS256 bearer tokens
//! - **spelling**: word-frequency dictionary answering the spelling oracle
//!
//! Adapters translate between domain types and infrastructure types and hold
//! no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
pub mod spelling;
