//! EVE SSO access token retrieval for director characters.

use chrono::{Duration, Utc};
use dioxus_logger::tracing;
use oauth2::TokenResponse;
use sea_orm::DatabaseConnection;

use crate::server::{data::character_token::CharacterTokenRepository, error::esi::EsiFailure};

/// Access tokens expiring within this many seconds are refreshed ahead of use.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Lifetime assumed when SSO omits `expires_in`, EVE access tokens last 20 minutes.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 1200;

/// Provides valid access tokens for director characters.
///
/// Access tokens are cached in `eve_character_token` alongside the refresh token and only
/// refreshed through EVE SSO once they are about to expire.
#[derive(Clone)]
pub struct SsoTokenProvider {
    db: DatabaseConnection,
    esi_client: eve_esi::Client,
}

impl SsoTokenProvider {
    /// Creates a new instance of [`SsoTokenProvider`]
    ///
    /// `esi_client` must be configured for OAuth2 (client ID, secret and callback URL).
    pub fn new(db: DatabaseConnection, esi_client: eve_esi::Client) -> Self {
        Self { db, esi_client }
    }

    /// Returns a valid access token for the character, refreshing it if needed
    ///
    /// A refresh token rotated by SSO replaces the stored one.
    ///
    /// # Returns
    /// - `Ok(String)`: Access token usable as bearer token
    /// - `Err(EsiFailure::CredentialExpired)`: No refresh token is stored or SSO rejected it
    /// - `Err(EsiFailure::Transport)`: SSO or token storage could not be reached
    pub async fn access_token(&self, character_id: i64) -> Result<String, EsiFailure> {
        let token_repo = CharacterTokenRepository::new(&self.db);

        let Some(token) = token_repo.find_by_character_id(character_id).await? else {
            return Err(EsiFailure::CredentialExpired(format!(
                "no refresh token stored for character {}",
                character_id
            )));
        };

        let now = Utc::now().naive_utc();
        if let (Some(access_token), Some(expires_at)) = (&token.access_token, token.expires_at) {
            if expires_at > now + Duration::seconds(EXPIRY_MARGIN_SECS) {
                return Ok(access_token.clone());
            }
        }

        tracing::debug!("Refreshing access token for character {}", character_id);

        let refreshed = self
            .esi_client
            .oauth2()
            .get_token_refresh(token.refresh_token.clone())
            .await
            .map_err(|err| match EsiFailure::from(err) {
                EsiFailure::CredentialExpired(reason) => EsiFailure::CredentialExpired(format!(
                    "refresh token for character {} rejected: {}",
                    character_id, reason
                )),
                failure => failure,
            })?;

        let access_token = refreshed.access_token().secret().clone();
        let lifetime = refreshed
            .expires_in()
            .and_then(|expires_in| Duration::from_std(expires_in).ok())
            .unwrap_or_else(|| Duration::seconds(DEFAULT_TOKEN_LIFETIME_SECS));
        let rotated = refreshed
            .refresh_token()
            .map(|refresh_token| refresh_token.secret().clone())
            .filter(|refresh_token| *refresh_token != token.refresh_token);

        token_repo
            .update_access_token(token.id, access_token.clone(), now + lifetime, rotated)
            .await?;

        Ok(access_token)
    }
}
