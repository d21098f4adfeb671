//! SeaORM entities for Warden's database tables.

pub mod prelude;

pub mod corporation_director;
pub mod corporation_director_role;
pub mod eve_character_token;
pub mod eve_corporation;
