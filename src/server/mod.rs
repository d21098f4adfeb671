//! Server application core modules.
//!
//! This module contains the server-side functionality of Warden: director credential storage,
//! health tracking, selection and failover for authenticated ESI requests, scheduled director
//! verification, and the operator HTTP API used to manage directors.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod esi;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
/// Application bootstrap: clients, database and shared state
pub mod startup;
pub mod util;
