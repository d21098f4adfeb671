use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{esi::DirectorEsiClient, service::director::event::DirectorEventSink};

/// Shared state of the HTTP server and scheduled jobs.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Client for public ESI endpoints
    pub esi_client: eve_esi::Client,
    /// Client for ESI requests authenticated as a director
    pub director_client: Arc<dyn DirectorEsiClient>,
    /// Receiver of director health events
    pub events: Arc<dyn DirectorEventSink>,
}
