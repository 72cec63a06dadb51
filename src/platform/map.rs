//! Map rendering capability seam

use crate::domain::camera::CameraState;
use crate::domain::markers::MarkerSpec;

/// External map rendering capability
///
/// The surface is created by the host with a provisioned access credential and
/// an initial camera; this crate only drives it. Zoom clamping, tile serving
/// and marker drawing all live on the other side of this trait.
pub trait MapSurface {
    /// Draws a marker on the surface
    fn place_marker(&mut self, marker: &MarkerSpec);

    /// Moves the viewport to the given camera, possibly animated
    fn move_camera(&mut self, camera: CameraState);

    /// Toggles the surface's built-in my-location indicator
    fn set_my_location_enabled(&mut self, enabled: bool);
}
