//! Configuration layer
//!
//! Concentrates the data the host supplies at startup: the map credential and
//! camera defaults.

pub mod settings;

pub use settings::{Settings, SettingsError};
