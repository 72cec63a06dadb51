//! Application orchestration layer
//!
//! This module coordinates between the domain, location, ui and platform
//! layers. It owns the screen's workflow state and event handling.

pub mod controller;
pub mod state;
