//! Adapter over the device location capability
//!
//! Owns the update subscription lifecycle so that at most one subscription is
//! active at any time. Consumers are expected to stop the subscription as soon
//! as they have consumed the single fix they need; `stop_locating` is the only
//! cancellation primitive.

use thiserror::Error;

use crate::domain::permission::AuthorizationStatus;
use crate::platform::location::{Accuracy, LocationService};

/// Location source failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationError {
    /// `begin_locating` was called without a sufficient grant. The screen
    /// controller's state machine prevents this; seeing it at runtime
    /// indicates a logic defect and it is reported, never swallowed.
    #[error("cannot start location updates while authorization is {status:?}")]
    NotAuthorized { status: AuthorizationStatus },
}

/// Thin adapter over the device location capability
///
/// Requests permission, starts and stops the update subscription, and exposes
/// the capability's status snapshots. Fixes themselves arrive over the event
/// channel the capability was created with.
pub struct LocationSource<S: LocationService> {
    service: S,
    active: bool,
}

impl<S: LocationService> LocationSource<S> {
    /// Wraps the capability and requests best accuracy for future updates
    pub fn new(mut service: S) -> Self {
        service.set_desired_accuracy(Accuracy::Best);
        Self {
            service,
            active: false,
        }
    }

    /// Whether location services are enabled at the OS level
    pub fn services_enabled(&self) -> bool {
        self.service.services_enabled()
    }

    /// Snapshot of the current authorization status
    pub fn authorization_status(&self) -> AuthorizationStatus {
        self.service.authorization_status()
    }

    /// Asks the platform to prompt the user for when-in-use permission
    ///
    /// Side effect only; the outcome arrives through the authorization-changed
    /// notification, not as a return value.
    pub fn request_permission(&mut self) {
        log::debug!("requesting when-in-use location permission");
        self.service.request_when_in_use_permission();
    }

    /// Starts the location update subscription
    ///
    /// A second call while a subscription is active is a no-op: there is never
    /// more than one.
    ///
    /// # Errors
    /// `LocationError::NotAuthorized` unless when-in-use or always access is
    /// granted.
    pub fn begin_locating(&mut self) -> Result<(), LocationError> {
        let status = self.service.authorization_status();
        if !status.is_granted() {
            return Err(LocationError::NotAuthorized { status });
        }
        if !self.active {
            self.service.start_updates();
            self.active = true;
            log::debug!("location updates started");
        }
        Ok(())
    }

    /// Cancels the update subscription
    ///
    /// Idempotent: safe to call when no subscription exists.
    pub fn stop_locating(&mut self) {
        if self.active {
            self.service.stop_updates();
            self.active = false;
            log::debug!("location updates stopped");
        }
    }

    /// Whether a subscription is currently active
    pub fn is_locating(&self) -> bool {
        self.active
    }
}

impl<S: LocationService> Drop for LocationSource<S> {
    fn drop(&mut self) {
        self.stop_locating();
    }
}
