//! `eve_esi` backed implementation of [`DirectorEsiClient`](super::DirectorEsiClient).
use async_trait::async_trait;
use eve_esi::model::character::CharacterCorporationRole;
use sea_orm::DatabaseConnection;

use crate::server::{
    error::esi::EsiFailure,
    esi::{token::SsoTokenProvider, DirectorEsiClient},
};

/// [`DirectorEsiClient`] backed by `eve_esi` and director refresh tokens stored in the database.
#[derive(Clone)]
pub struct EsiDirectorClient {
    esi_client: eve_esi::Client,
    tokens: SsoTokenProvider,
}

impl EsiDirectorClient {
    /// Creates a new instance of [`EsiDirectorClient`]
    ///
    /// `esi_client` is shared with the token provider and must be configured for OAuth2.
    pub fn new(db: DatabaseConnection, esi_client: eve_esi::Client) -> Self {
        let tokens = SsoTokenProvider::new(db, esi_client.clone());

        Self { esi_client, tokens }
    }
}

#[async_trait]
impl DirectorEsiClient for EsiDirectorClient {
    /// Fetches `/characters/{character_id}/roles` with the director's own access token
    ///
    /// # Returns
    /// - `Ok(CharacterCorporationRole)`: Roles held by the director
    /// - `Err(EsiFailure::CredentialExpired)`: No usable token or ESI responded 401
    /// - `Err(EsiFailure::PermissionDenied)`: Missing scope or ESI responded 403
    /// - `Err(EsiFailure::Transport)`: Any other failure, including undecodable responses
    async fn get_character_roles(
        &self,
        character_id: i64,
    ) -> Result<CharacterCorporationRole, EsiFailure> {
        let access_token = self.tokens.access_token(character_id).await?;

        Ok(self
            .esi_client
            .character()
            .get_character_corporation_roles(&access_token, character_id)
            .await?)
    }
}
