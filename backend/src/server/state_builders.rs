//! Builders wiring driven adapters into the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use crate::domain::ports::{HistoryRepository, TokenCodec, UserRepository};
use crate::domain::{HistoryService, PasswordAccountService, TextTransformService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;
use crate::outbound::persistence::{DieselHistoryRepository, DieselUserRepository};
use crate::outbound::security::JwtTokenCodec;

use super::ServerConfig;

type Repositories = (Arc<dyn UserRepository>, Arc<dyn HistoryRepository>);

/// PostgreSQL repositories when a pool is configured, otherwise a shared
/// in-memory store.
fn build_repositories(config: &ServerConfig) -> Repositories {
    match &config.db_pool {
        Some(pool) => (
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselHistoryRepository::new(pool.clone())),
        ),
        None => {
            info!("no database configured; accounts and history are kept in memory");
            let store = InMemoryStore::new();
            (Arc::new(store.users()), Arc::new(store.history()))
        }
    }
}

/// Assemble the driving ports shared by every worker.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (users, history_repo) = build_repositories(config);
    let tokens: Arc<dyn TokenCodec> = Arc::new(JwtTokenCodec::new(&config.token));

    let accounts = Arc::new(PasswordAccountService::new(
        users,
        Arc::clone(&config.hasher),
        tokens,
        Arc::clone(&config.clock),
    ));
    let transforms = Arc::new(TextTransformService::new(
        Arc::clone(&history_repo),
        Arc::clone(&config.oracle),
        Arc::clone(&config.clock),
    ));
    let history = Arc::new(HistoryService::new(history_repo));

    web::Data::new(HttpState::new(
        accounts,
        transforms,
        history.clone(),
        history,
    ))
}
