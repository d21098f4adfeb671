//! Authenticated ESI access using director credentials.
//!
//! Public ESI data (corporations, characters) is fetched with the `eve_esi` client directly.
//! Requests which need a director's access token go through [`DirectorEsiClient`] so selection
//! and failover can swap the character used for each call.

pub mod client;
pub mod token;

use async_trait::async_trait;
use eve_esi::model::character::CharacterCorporationRole;

use crate::server::error::esi::EsiFailure;

pub use client::EsiDirectorClient;
pub use token::SsoTokenProvider;

/// Authenticated ESI requests made on behalf of a director character.
#[async_trait]
pub trait DirectorEsiClient: Send + Sync {
    /// Fetches the corporation roles of the director, proving its credentials still work.
    async fn get_character_roles(
        &self,
        character_id: i64,
    ) -> Result<CharacterCorporationRole, EsiFailure>;
}
