//! Database model type aliases for test utilities.

/// Type alias for EVE Online corporation database model.
pub type EveCorporationModel = entity::eve_corporation::Model;

/// Type alias for corporation director database model.
pub type CorporationDirectorModel = entity::corporation_director::Model;

/// Type alias for stored character token database model.
pub type EveCharacterTokenModel = entity::eve_character_token::Model;
