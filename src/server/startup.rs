use std::sync::Arc;

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    error::Error,
    esi::EsiDirectorClient,
    model::app::AppState,
    service::director::{event::TracingEventSink, legacy::LegacyDirectorService},
};

/// Build and configure the ESI client with the provided credentials
pub fn build_esi_client(config: &Config) -> Result<eve_esi::Client, Error> {
    let esi_client = eve_esi::Client::builder()
        .user_agent(&config.user_agent)
        .client_id(&config.esi_client_id)
        .client_secret(&config.esi_client_secret)
        .callback_url(&config.esi_callback_url)
        .build()?;

    Ok(esi_client)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Promote directors configured before multi-director support
pub async fn promote_legacy_directors(db: &DatabaseConnection) -> Result<(), Error> {
    let promoted = LegacyDirectorService::new(db).promote_all().await?;

    if promoted > 0 {
        tracing::info!("Promoted {} legacy director(s)", promoted);
    }

    Ok(())
}

/// Build the shared application state
pub fn build_app_state(config: &Config, db: DatabaseConnection) -> Result<AppState, Error> {
    let esi_client = build_esi_client(config)?;
    let director_client = EsiDirectorClient::new(db.clone(), esi_client.clone());

    Ok(AppState {
        db,
        esi_client,
        director_client: Arc::new(director_client),
        events: Arc::new(TracingEventSink),
    })
}
