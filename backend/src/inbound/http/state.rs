//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see driving ports, so
//! they can be tested against mocks without any I/O.

use std::sync::Arc;

use crate::domain::ports::{AccountService, HistoryCommand, HistoryQuery, TransformCommand};

/// Port implementations used by the HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Signup, login and token resolution.
    pub accounts: Arc<dyn AccountService>,
    /// Text transformations.
    pub transforms: Arc<dyn TransformCommand>,
    /// History reads.
    pub history: Arc<dyn HistoryQuery>,
    /// History deletes.
    pub history_command: Arc<dyn HistoryCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        accounts: Arc<dyn AccountService>,
        transforms: Arc<dyn TransformCommand>,
        history: Arc<dyn HistoryQuery>,
        history_command: Arc<dyn HistoryCommand>,
    ) -> Self {
        Self {
            accounts,
            transforms,
            history,
            history_command,
        }
    }
}
