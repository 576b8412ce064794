//! Domain types, services and ports.
//!
//! Nothing in this module knows about HTTP or Diesel. Inbound adapters call
//! the driving ports in [`ports`]; outbound adapters implement the driven
//! ones.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod history;
pub mod history_service;
pub mod ports;
pub mod text;
pub mod trace_id;
pub mod transform_service;
pub mod user;

pub use self::account_service::{PasswordAccountService, resolve_mandatory, resolve_optional};
pub use self::auth::{
    AccessToken, CredentialValidationError, Identity, LoginCredentials, SignupCredentials,
    TokenClaims,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::history::{HistoryEntry, HistoryEntryId, NewHistoryEntry, sort_newest_first};
pub use self::history_service::HistoryService;
pub use self::trace_id::TraceId;
pub use self::transform_service::TextTransformService;
pub use self::user::{
    NewUserAccount, PasswordHash, User, UserAccount, UserId, Username, UsernameValidationError,
};
