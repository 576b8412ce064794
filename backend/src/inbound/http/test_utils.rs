//! Test helpers for inbound HTTP handlers.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{
    MockAccountService, MockHistoryCommand, MockHistoryQuery, MockTransformCommand,
};
use crate::domain::{User, UserId, Username};

use super::state::HttpState;
use super::validation::configure_extractors;

/// Mocks for every driving port. Unconfigured mocks panic when called, so
/// each test only sets up the ports it expects a handler to touch.
#[derive(Default)]
pub struct MockPorts {
    /// Account port.
    pub accounts: MockAccountService,
    /// Transform port.
    pub transforms: MockTransformCommand,
    /// History read port.
    pub history: MockHistoryQuery,
    /// History delete port.
    pub history_command: MockHistoryCommand,
}

impl MockPorts {
    /// Move the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState::new(
            Arc::new(self.accounts),
            Arc::new(self.transforms),
            Arc::new(self.history),
            Arc::new(self.history_command),
        )
    }
}

/// App with the given state and extractor error handlers registered.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .configure(configure_extractors)
}

/// User 1, `alice`.
pub fn alice() -> User {
    User::new(
        UserId::new(1),
        Username::new("alice").expect("valid username"),
    )
}
