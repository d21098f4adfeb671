//! Warden: director credential selection and failover for EVE Online corporation data sync.

pub mod model;
pub mod server;
