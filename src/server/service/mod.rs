//! Service layer for business logic and orchestration.
//!
//! Services coordinate between repositories and external APIs. The `director` module holds
//! director registration, health tracking, selection, failover and verification, while
//! `corporation` bootstraps corporations from EVE Online's ESI.

/// Corporation lookup and ESI bootstrap
pub mod corporation;
pub mod director;
