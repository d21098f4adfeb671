//! Scheduler for periodic director verification.
//!
//! Registers a cron job which verifies every director of every corporation with directors, so
//! directors which recovered outside of live traffic become selectable again and broken
//! credentials are noticed before a sync needs them.

use std::sync::Arc;

use dioxus_logger::tracing;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::Error, model::app::AppState,
    service::director::verification::VerificationService,
};

/// Job scheduler for background director tasks.
pub struct Scheduler {
    state: AppState,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(state: AppState) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { state, sched })
    }

    /// Registers the director verification sweep on `verification_cron` and starts the scheduler.
    ///
    /// # Returns
    /// - `Ok(())` - Jobs registered and scheduler started
    /// - `Err(Error)` - Invalid cron expression or scheduler error
    pub async fn start(mut self, verification_cron: &str) -> Result<(), Error> {
        self.schedule_job(verification_cron, "director verification", verify_directors)
            .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// The job receives a clone of the application state and logs the count it returns, or the
    /// error if it fails.
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(AppState) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<usize, Error>> + Send + 'static,
    {
        let state = self.state.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let state = state.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(state).await {
                        Ok(count) => {
                            tracing::info!("Completed {} for {} corporation(s)", name, count)
                        }
                        Err(e) => tracing::error!("Error running {}: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}

/// Verifies the directors of every corporation with at least one director.
pub async fn verify_directors(state: AppState) -> Result<usize, Error> {
    let verification_service = VerificationService::new(
        &state.db,
        state.director_client.as_ref(),
        state.events.as_ref(),
    );

    verification_service.verify_all_corporations().await
}
