//! Screen orchestration state machine
//!
//! Pure transition logic for the location-authorization and camera-centering
//! workflow. The controller feeds events in and executes the commands that
//! come back out; nothing in this module touches a platform capability, which
//! keeps every transition testable without a device.

use crate::domain::geo::LocationFix;
use crate::domain::permission::{AuthorizationStatus, Directive, PermissionError, PermissionGate};

/// Why the screen cannot make progress without user action outside the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// Location services are switched off at the OS level
    ServicesDisabled,
    /// The user denied location permission
    PermissionDenied,
    /// Device policy forbids location access
    PermissionRestricted,
}

/// Workflow phase of the map screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    /// Map surface constructed and markers loaded; workflow not started
    Initializing,
    /// Deciding what to do from the service switch and authorization status
    CheckingServices,
    /// Permission prompt issued, waiting for the user's answer
    AwaitingPermission,
    /// Update subscription active, waiting for the first fix
    Locating,
    /// No way forward inside the app; recovery happens in system settings
    Blocked(BlockReason),
    /// Camera positioned once; terminal for the session
    Centered,
}

impl ScreenPhase {
    /// Whether the workflow is finished for this session
    ///
    /// `Blocked` is not terminal: a later authorization change re-runs the
    /// decision and may unblock the screen.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScreenPhase::Centered)
    }
}

/// Input to the state machine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenEvent {
    /// Result of the OS-level service switch check together with the
    /// authorization snapshot read at the same instant
    ServicesChecked {
        enabled: bool,
        status: AuthorizationStatus,
    },
    /// The authorization-changed notification fired
    AuthorizationChanged(AuthorizationStatus),
    /// The platform reported a location sample
    FixReceived(LocationFix),
}

/// Side effect the controller must execute after a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Prompt the user for when-in-use permission
    RequestPermission,
    /// Start the location update subscription
    BeginLocating,
    /// Center the camera on the fix, then stop the subscription
    CenterCamera(LocationFix),
}

/// Result of processing one event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub next: ScreenPhase,
    pub command: Option<Command>,
}

impl Transition {
    fn to(next: ScreenPhase) -> Self {
        Self {
            next,
            command: None,
        }
    }

    fn with(next: ScreenPhase, command: Command) -> Self {
        Self {
            next,
            command: Some(command),
        }
    }
}

/// Processes one event against the current phase
///
/// # Errors
/// `PermissionError::UnsupportedAuthorizationState` when the platform reports
/// a status value outside the known set; the session must end rather than act
/// on an unknown permission state.
pub fn advance(phase: ScreenPhase, event: ScreenEvent) -> Result<Transition, PermissionError> {
    match (phase, event) {
        // Centered is terminal: a later grant never re-centers. One-shot
        // centering exists so automatic moves cannot fight user pan/zoom.
        (ScreenPhase::Centered, event) => {
            log::debug!("ignoring {event:?} after centering");
            Ok(Transition::to(ScreenPhase::Centered))
        }

        // Events arriving before the workflow started are premature.
        (ScreenPhase::Initializing, event) => {
            log::debug!("ignoring {event:?} before the services check");
            Ok(Transition::to(ScreenPhase::Initializing))
        }

        (_, ScreenEvent::ServicesChecked { enabled: false, .. }) => {
            Ok(Transition::to(ScreenPhase::Blocked(
                BlockReason::ServicesDisabled,
            )))
        }

        (_, ScreenEvent::ServicesChecked { enabled: true, status }) => {
            Ok(follow(PermissionGate::evaluate(status)?))
        }

        // The authorization-changed notification re-runs the gate decision
        // from any non-terminal phase, including Blocked.
        (_, ScreenEvent::AuthorizationChanged(status)) => {
            Ok(follow(PermissionGate::evaluate(status)?))
        }

        (ScreenPhase::Locating, ScreenEvent::FixReceived(fix)) => Ok(Transition::with(
            ScreenPhase::Centered,
            Command::CenterCamera(fix),
        )),

        // Stale delivery: a fix queued by the platform that lands after the
        // subscription was stopped or before one existed.
        (phase, ScreenEvent::FixReceived(fix)) => {
            log::debug!("dropping stale fix {fix:?} in phase {phase:?}");
            Ok(Transition::to(phase))
        }
    }
}

fn follow(directive: Directive) -> Transition {
    match directive {
        Directive::RequestPermission => Transition::with(
            ScreenPhase::AwaitingPermission,
            Command::RequestPermission,
        ),
        Directive::BeginLocating => {
            Transition::with(ScreenPhase::Locating, Command::BeginLocating)
        }
        Directive::NoAction => Transition::to(ScreenPhase::CheckingServices),
        Directive::ShowDeniedNotice => {
            Transition::to(ScreenPhase::Blocked(BlockReason::PermissionDenied))
        }
        Directive::ShowRestrictedNotice => {
            Transition::to(ScreenPhase::Blocked(BlockReason::PermissionRestricted))
        }
    }
}
