//! Camera ownership and centering
//!
//! The camera controller is the single owner of [`CameraState`]; the rendering
//! capability only ever sees the state passed by reference through
//! [`MapSurface::move_camera`]. Enabling the my-location indicator is part of
//! the first centering and happens exactly once.

use crate::domain::camera::CameraState;
use crate::domain::geo::LocationFix;
use crate::platform::map::MapSurface;

/// Owns the camera position of the map surface
#[derive(Debug, Default)]
pub struct CameraController {
    state: Option<CameraState>,
    my_location_shown: bool,
}

impl CameraController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Centers the viewport on the fix and triggers the surface transition
    ///
    /// Zoom is forwarded as-is; the external surface clamps it to its
    /// supported range.
    pub fn center_on<M: MapSurface>(&mut self, surface: &mut M, fix: LocationFix, zoom: f32) {
        if !fix.is_well_formed() {
            log::warn!(
                "centering on malformed coordinates ({}, {})",
                fix.latitude,
                fix.longitude
            );
        }
        let camera = CameraState::new(fix, zoom);
        surface.move_camera(camera);
        if !self.my_location_shown {
            surface.set_my_location_enabled(true);
            self.my_location_shown = true;
        }
        self.state = Some(camera);
        log::debug!(
            "camera centered on ({:.6}, {:.6}) at zoom {}",
            fix.latitude,
            fix.longitude,
            zoom
        );
    }

    /// Current camera state; `None` until the first centering
    pub fn state(&self) -> Option<CameraState> {
        self.state
    }
}
