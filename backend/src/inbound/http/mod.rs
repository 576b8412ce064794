//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod history;
pub mod identity;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod transform;
pub mod validation;

pub use error::ApiResult;
