use dioxus_logger::tracing::{self, Level};
use warden::server::{config::Config, router, scheduler::Scheduler, startup};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    dioxus_logger::init(Level::INFO).expect("failed to init logger");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config).await {
        tracing::error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), warden::server::error::Error> {
    let db = startup::connect_to_database(&config).await?;
    startup::promote_legacy_directors(&db).await?;

    let state = startup::build_app_state(&config, db)?;

    Scheduler::new(state.clone())
        .await?
        .start(&config.verification_cron)
        .await?;

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Starting server on {}", config.bind_address);

    let app = router::routes().with_state(state);
    axum::serve(listener, app).await?;

    Ok(())
}
