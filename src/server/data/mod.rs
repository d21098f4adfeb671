//! Data access layer repositories.
//!
//! Repositories provide an abstraction layer over database operations, organized by table.
//! Each repository borrows any `ConnectionTrait` so it can run against a plain connection or
//! inside a transaction.

pub mod character_token;
pub mod corporation;
pub mod director;
pub mod director_role;
