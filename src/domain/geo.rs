//! Geographic value types
//!
//! Pure location data as reported by the device location capability. These
//! types have no knowledge of the platform APIs that produce them.

use std::time::SystemTime;

/// A single reported device location sample
///
/// Transient by design: each fix is superseded by the next one the platform
/// reports and nothing persists it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    /// Latitude in decimal degrees, positive north
    pub latitude: f64,
    /// Longitude in decimal degrees, positive east
    pub longitude: f64,
    /// Estimated horizontal accuracy radius in meters, if the platform reports one
    pub horizontal_accuracy: Option<f64>,
    /// When the sample was captured, if the platform reports it
    pub timestamp: Option<SystemTime>,
}

impl LocationFix {
    /// Creates a fix from bare coordinates
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            horizontal_accuracy: None,
            timestamp: None,
        }
    }

    /// Returns true if the coordinates fall inside the valid geographic range
    ///
    /// Latitude must be within [-90, 90] and longitude within [-180, 180].
    pub fn is_well_formed(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}
