//! Location authorization status and the permission gate
//!
//! The authorization enumeration mirrors the platform's open enumeration: the
//! five statuses this application understands plus an escape hatch for values
//! a future platform release may add. The gate turns a status snapshot into
//! exactly one directive; an unrecognized status is a contract violation and
//! must never silently proceed.

use thiserror::Error;

/// Platform-reported permission level for location access
///
/// An immutable snapshot observed from the platform; this application never
/// owns or stores it beyond the current decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationStatus {
    /// The user has not been asked yet
    NotDetermined,
    /// Location access granted while the app is in use
    WhenInUseGranted,
    /// Location access granted at all times
    AlwaysGranted,
    /// The user explicitly denied location access
    Denied,
    /// Device policy forbids location access; the user cannot change it
    Restricted,
    /// A status value this application does not understand, with the raw
    /// platform code attached
    Unrecognized(u32),
}

impl AuthorizationStatus {
    /// Whether this status permits starting location updates
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::WhenInUseGranted | Self::AlwaysGranted)
    }
}

/// Next action decided from an authorization status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Ask the platform to prompt the user for when-in-use permission
    RequestPermission,
    /// Start acquiring the device location
    BeginLocating,
    /// Tell the user that device policy blocks location access
    ShowRestrictedNotice,
    /// Tell the user how to re-enable the permission they denied
    ShowDeniedNotice,
    /// Nothing to do
    NoAction,
}

/// Permission contract failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// The platform reported a status value outside the known set. Acting on
    /// an unknown permission state is never safe, so this is fatal rather
    /// than recoverable.
    #[error("unsupported authorization state reported by the platform (raw value {0})")]
    UnsupportedAuthorizationState(u32),
}

/// Decides the next action for every authorization status
pub struct PermissionGate;

impl PermissionGate {
    /// Maps an authorization status to its directive
    ///
    /// # Errors
    /// `PermissionError::UnsupportedAuthorizationState` when the status is
    /// outside the enumerated set.
    ///
    /// # Example
    /// ```rust
    /// use mapscreen::domain::permission::{AuthorizationStatus, Directive, PermissionGate};
    ///
    /// let directive = PermissionGate::evaluate(AuthorizationStatus::NotDetermined).unwrap();
    /// assert_eq!(directive, Directive::RequestPermission);
    /// ```
    pub fn evaluate(status: AuthorizationStatus) -> Result<Directive, PermissionError> {
        match status {
            AuthorizationStatus::NotDetermined => Ok(Directive::RequestPermission),
            AuthorizationStatus::WhenInUseGranted => Ok(Directive::BeginLocating),
            AuthorizationStatus::AlwaysGranted => Ok(Directive::NoAction),
            AuthorizationStatus::Restricted => Ok(Directive::ShowRestrictedNotice),
            AuthorizationStatus::Denied => Ok(Directive::ShowDeniedNotice),
            AuthorizationStatus::Unrecognized(raw) => {
                Err(PermissionError::UnsupportedAuthorizationState(raw))
            }
        }
    }
}
