//! Helpers shared across server modules.
