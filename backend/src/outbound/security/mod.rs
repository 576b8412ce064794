//! Credential primitives: password hashing and bearer token signing.

mod argon2_hasher;
mod jwt;

pub use argon2_hasher::Argon2PasswordHasher;
pub use jwt::{JwtTokenCodec, TokenConfig};
