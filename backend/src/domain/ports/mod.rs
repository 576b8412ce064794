//! Ports at the edge of the domain.
//!
//! Driving ports (`AccountService`, `TransformCommand`, `HistoryQuery`,
//! `HistoryCommand`) are what inbound adapters call. Driven ports
//! (repositories, hasher, token codec, spelling oracle) are what the domain
//! services call out to; each carries a typed error built with
//! `define_port_error!`.

mod macros;
pub(crate) use macros::define_port_error;

mod account_service;
mod history_command;
mod history_query;
mod history_repository;
mod password_hasher;
mod spelling_oracle;
mod token_codec;
mod transform_command;
mod user_repository;

pub use account_service::AccountService;
#[cfg(test)]
pub use account_service::MockAccountService;
pub use history_command::HistoryCommand;
#[cfg(test)]
pub use history_command::MockHistoryCommand;
pub use history_query::HistoryQuery;
#[cfg(test)]
pub use history_query::MockHistoryQuery;
#[cfg(test)]
pub use history_repository::MockHistoryRepository;
pub use history_repository::{HistoryPersistenceError, HistoryRepository};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use spelling_oracle::MockSpellingOracle;
pub use spelling_oracle::SpellingOracle;
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenError};
#[cfg(test)]
pub use transform_command::MockTransformCommand;
pub use transform_command::TransformCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
