//! Server-side domain models and application state.

/// Shared Axum application state
pub mod app;
pub mod director;
