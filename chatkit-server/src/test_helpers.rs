//! Test helpers for chatkit-server unit tests.

use std::sync::Arc;

use axum_test::TestServer;
use chatkit_core::provider::stub::ScriptedProvider;
use chatkit_core::ChatRelay;
use chatkit_types::RelayConfig;

use crate::router::build_router;
use crate::state::AppState;

/// `AppState` with no provider and no database.
pub fn unconfigured_app_state() -> AppState {
    AppState::new_with_components(RelayConfig::default(), None, None)
}

/// `AppState` whose relay talks to `provider`.
pub fn test_app_state(provider: Arc<ScriptedProvider>, retrieval_disabled: bool) -> AppState {
    let config = RelayConfig { retrieval_disabled, ..RelayConfig::default() };
    let relay = ChatRelay::new(provider, config.model.clone(), retrieval_disabled);
    AppState::new_with_components(config, Some(Arc::new(relay)), None)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state)).expect("failed to create test server")
}
