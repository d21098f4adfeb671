//! HTTP controller endpoints for the Warden operator API.
//!
//! Controllers are thin Axum handlers over the director services. They use utoipa for OpenAPI
//! documentation and convert errors into responses through [`crate::server::error::Error`].

pub mod director;
