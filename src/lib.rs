//! Single-screen map application core
//!
//! Centers the map camera on the device location exactly once per session and
//! renders a fixed set of markers. Device location sensing and map rendering
//! are external capabilities consumed through the traits in [`platform`]; the
//! simulated implementations there let the whole workflow run without
//! hardware.

pub mod app;
pub mod config;
pub mod domain;
pub mod location;
pub mod platform;
pub mod ui;

pub use app::controller::{AppError, ScreenController};
pub use app::state::{BlockReason, ScreenEvent, ScreenPhase};
pub use config::settings::Settings;
pub use domain::camera::{CameraState, DEFAULT_ZOOM};
pub use domain::geo::LocationFix;
pub use domain::markers::{MarkerRegistry, MarkerSpec};
pub use domain::permission::{AuthorizationStatus, Directive, PermissionError, PermissionGate};
pub use location::source::{LocationError, LocationSource};
pub use platform::location::{Accuracy, LocationEvent, LocationService};
pub use platform::map::MapSurface;
pub use ui::camera::CameraController;
