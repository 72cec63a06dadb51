//! Device location capability seam
//!
//! The platform's delegate callbacks are remodeled as an explicit event
//! channel: whatever implements [`LocationService`] pushes [`LocationEvent`]s
//! into a channel whose receiving side is handed to the screen controller at
//! startup. The controller is the single consumer; nothing else drains the
//! channel.

use crate::domain::geo::LocationFix;
use crate::domain::permission::AuthorizationStatus;

/// Requested quality of location fixes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    /// The best accuracy the hardware can provide
    Best,
    /// Accurate to roughly ten meters
    TenMeters,
    /// Accurate to roughly a hundred meters
    HundredMeters,
    /// Accurate to roughly a kilometer
    Kilometer,
}

/// Asynchronous notifications from the device location capability
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationEvent {
    /// The authorization status changed: the user answered the permission
    /// prompt, or changed the permission in system settings
    AuthorizationChanged(AuthorizationStatus),
    /// The platform reported a new location sample
    FixAvailable(LocationFix),
}

/// Device location capability
///
/// Implementations wrap a real OS location manager or a simulation. The
/// outcomes of [`request_when_in_use_permission`] and [`start_updates`] are
/// observed through the event channel, never as return values; no method here
/// blocks.
///
/// [`request_when_in_use_permission`]: LocationService::request_when_in_use_permission
/// [`start_updates`]: LocationService::start_updates
pub trait LocationService {
    /// Whether location services are enabled at the OS level
    fn services_enabled(&self) -> bool;

    /// Snapshot of the current authorization status
    fn authorization_status(&self) -> AuthorizationStatus;

    /// Requests the fix quality for subsequent updates
    fn set_desired_accuracy(&mut self, accuracy: Accuracy);

    /// Asks the platform to prompt the user for when-in-use permission
    fn request_when_in_use_permission(&mut self);

    /// Starts delivering location updates over the event channel
    fn start_updates(&mut self);

    /// Stops delivering location updates
    fn stop_updates(&mut self);
}
