//! Camera viewport state

use crate::domain::geo::LocationFix;

/// Zoom level applied when centering on the device location
pub const DEFAULT_ZOOM: f32 = 13.0;

/// The map surface's viewport position and zoom
///
/// One instance exists per active map surface and it changes only through the
/// camera controller's recenter operation. Zoom is forwarded as-is; clamping to
/// the supported range is the external surface's concern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub center: LocationFix,
    pub zoom: f32,
}

impl CameraState {
    pub fn new(center: LocationFix, zoom: f32) -> Self {
        Self { center, zoom }
    }
}
