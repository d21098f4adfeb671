pub use super::corporation_director::Entity as CorporationDirector;
pub use super::corporation_director_role::Entity as CorporationDirectorRole;
pub use super::eve_character_token::Entity as EveCharacterToken;
pub use super::eve_corporation::Entity as EveCorporation;
