//! Test fixture modules for database and HTTP mock creation.
//!
//! - `eve` - EVE Online corporation records and ESI/SSO endpoints
//! - `director` - corporation director records and their stored tokens

pub mod director;
pub mod eve;
