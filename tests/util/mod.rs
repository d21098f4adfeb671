//! Test utilities for creating AppState from a test context

use std::sync::Arc;

use warden::server::{
    esi::EsiDirectorClient,
    model::app::AppState,
    service::director::event::TracingEventSink,
};
use warden_test_utils::TestContext;

/// Extension trait for TestContext to create AppState pointing at the mock ESI server
///
/// The director client shares the context's ESI client, so SSO refreshes hit the mock server.
pub trait TestContextExt {
    fn into_app_state(&self) -> AppState;
}

impl TestContextExt for TestContext {
    fn into_app_state(&self) -> AppState {
        let director_client = EsiDirectorClient::new(self.db.clone(), self.esi_client.clone());

        AppState {
            db: self.db.clone(),
            esi_client: self.esi_client.clone(),
            director_client: Arc::new(director_client),
            events: Arc::new(TracingEventSink),
        }
    }
}
