//! Environment driven application configuration.

use crate::server::error::config::ConfigError;

/// Default address the HTTP server binds to.
pub static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Default cron expression for the director verification sweep (every 6 hours).
pub static DEFAULT_VERIFICATION_CRON: &str = "0 0 */6 * * *";

/// Application configuration loaded from environment variables.
pub struct Config {
    /// Contact email included in the ESI user agent
    pub contact_email: String,
    /// EVE developer application client ID
    pub esi_client_id: String,
    /// EVE developer application client secret
    pub esi_client_secret: String,
    /// EVE developer application callback URL
    pub esi_callback_url: String,
    /// Database connection URL
    pub database_url: String,
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Cron expression for the director verification sweep
    pub verification_cron: String,
    /// User agent used for all ESI & SSO requests
    pub user_agent: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - A required variable is not set
    /// - `Err(ConfigError::InvalidEnvValue)` - A variable is set but malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        let contact_email = require_env("CONTACT_EMAIL")?;
        if !contact_email.contains('@') {
            return Err(ConfigError::InvalidEnvValue {
                var: "CONTACT_EMAIL".to_string(),
                reason: "must be an email address".to_string(),
            });
        }

        let verification_cron = optional_env("DIRECTOR_VERIFICATION_CRON")
            .unwrap_or_else(|| DEFAULT_VERIFICATION_CRON.to_string());
        if verification_cron.split_whitespace().count() != 6 {
            return Err(ConfigError::InvalidEnvValue {
                var: "DIRECTOR_VERIFICATION_CRON".to_string(),
                reason: "expected a 6 field cron expression (sec min hour day month weekday)"
                    .to_string(),
            });
        }

        let user_agent = format!(
            "Warden/{} ({})",
            env!("CARGO_PKG_VERSION"),
            contact_email
        );

        Ok(Self {
            contact_email,
            esi_client_id: require_env("ESI_CLIENT_ID")?,
            esi_client_secret: require_env("ESI_CLIENT_SECRET")?,
            esi_callback_url: require_env("ESI_CALLBACK_URL")?,
            database_url: require_env("DATABASE_URL")?,
            bind_address: optional_env("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            verification_cron,
            user_agent,
        })
    }
}

fn require_env(var: &str) -> Result<String, ConfigError> {
    optional_env(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional_env(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.trim().is_empty())
}
