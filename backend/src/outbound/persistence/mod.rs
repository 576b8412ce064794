//! PostgreSQL adapters on Diesel.
//!
//! Repositories translate between row structs (`models`, `schema`) and
//! domain types; neither leaks past this module. Connections come from a
//! `bb8` pool over `diesel-async`, and every Diesel or pool failure becomes a
//! typed persistence error whose `Connection` variant maps to 503.
//!
//! ```ignore
//! use tidytext::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tidytext")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_history_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_history_repository::DieselHistoryRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
