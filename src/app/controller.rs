//! Screen controller and coordination layer
//!
//! The controller orchestrates between the domain, location, ui and platform
//! layers: it seeds the marker registry onto the surface, runs the OS-level
//! service check, and drives the permission gate, location source and camera
//! from the platform's event channel. All work happens cooperatively on the
//! caller's thread; there are no locks and no blocking waits.

use crossbeam_channel::Receiver;
use thiserror::Error;

use crate::app::state::{self, BlockReason, Command, ScreenEvent, ScreenPhase};
use crate::domain::camera::CameraState;
use crate::domain::markers::MarkerRegistry;
use crate::domain::permission::PermissionError;
use crate::location::source::{LocationError, LocationSource};
use crate::platform::location::{LocationEvent, LocationService};
use crate::platform::map::MapSurface;
use crate::ui::camera::CameraController;

/// Failures that end the screen workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppError {
    /// The platform reported an authorization state outside the contract
    #[error("authorization contract violation: {0}")]
    Permission(#[from] PermissionError),
    /// The location source refused an operation the state machine should have
    /// made impossible
    #[error("location source failure: {0}")]
    Location(#[from] LocationError),
}

/// Top-level orchestrator for the map screen
///
/// Owns the map surface, the camera state and the single location
/// subscription. Exactly one fix is consumed per locating session: the first
/// fix centers the camera and the subscription is released immediately after.
pub struct ScreenController<S: LocationService, M: MapSurface> {
    phase: ScreenPhase,
    source: LocationSource<S>,
    surface: M,
    camera: CameraController,
    markers: MarkerRegistry,
    events: Receiver<LocationEvent>,
    zoom: f32,
}

impl<S: LocationService, M: MapSurface> ScreenController<S, M> {
    /// Builds the screen: wraps the location capability, loads the marker
    /// registry and draws every marker on the surface
    pub fn new(service: S, mut surface: M, events: Receiver<LocationEvent>, zoom: f32) -> Self {
        let markers = MarkerRegistry::with_defaults();
        for marker in markers.specs() {
            surface.place_marker(marker);
        }
        log::debug!("placed {} markers", markers.len());
        Self {
            phase: ScreenPhase::Initializing,
            source: LocationSource::new(service),
            surface,
            camera: CameraController::new(),
            markers,
            events,
            zoom,
        }
    }

    /// Current workflow phase
    pub fn phase(&self) -> ScreenPhase {
        self.phase
    }

    /// Camera state after centering; `None` while not yet centered
    pub fn camera(&self) -> Option<CameraState> {
        self.camera.state()
    }

    /// The marker registry loaded at startup
    pub fn markers(&self) -> &MarkerRegistry {
        &self.markers
    }

    /// The map surface the screen drives
    pub fn surface(&self) -> &M {
        &self.surface
    }

    /// Runs the OS-level service check and the first gate decision
    ///
    /// If the service is disabled the screen lands in `Blocked` without ever
    /// prompting for permission or starting a subscription.
    pub fn start(&mut self) -> Result<(), AppError> {
        self.phase = ScreenPhase::CheckingServices;
        let event = ScreenEvent::ServicesChecked {
            enabled: self.source.services_enabled(),
            status: self.source.authorization_status(),
        };
        self.apply(event)
    }

    /// Drains pending platform notifications, one cooperative pass
    ///
    /// Events queued while earlier ones are applied (a fix delivered the
    /// moment updates start, for instance) are consumed in the same pass.
    pub fn pump(&mut self) -> Result<(), AppError> {
        while let Ok(event) = self.events.try_recv() {
            let event = match event {
                LocationEvent::AuthorizationChanged(status) => {
                    ScreenEvent::AuthorizationChanged(status)
                }
                LocationEvent::FixAvailable(fix) => ScreenEvent::FixReceived(fix),
            };
            self.apply(event)?;
        }
        Ok(())
    }

    /// Applies a single event to the state machine and executes its command
    pub fn apply(&mut self, event: ScreenEvent) -> Result<(), AppError> {
        let transition = state::advance(self.phase, event)?;
        let previous = self.phase;
        self.phase = transition.next;

        if previous != transition.next {
            log::debug!("screen phase {previous:?} -> {:?}", transition.next);
            if let ScreenPhase::Blocked(reason) = transition.next {
                // No recovery path inside the app; release the subscription
                // if one is active and point the user at system settings.
                self.source.stop_locating();
                warn_blocked(reason);
            }
        }

        match transition.command {
            Some(Command::RequestPermission) => self.source.request_permission(),
            Some(Command::BeginLocating) => self.source.begin_locating()?,
            Some(Command::CenterCamera(fix)) => {
                self.camera.center_on(&mut self.surface, fix, self.zoom);
                // One fix per locating session: stop before the next delivery.
                self.source.stop_locating();
            }
            None => {}
        }
        Ok(())
    }
}

fn warn_blocked(reason: BlockReason) {
    match reason {
        BlockReason::ServicesDisabled => {
            log::warn!("location services are disabled; enable them in system settings");
        }
        BlockReason::PermissionDenied => {
            log::warn!("location permission was denied; grant it in system settings");
        }
        BlockReason::PermissionRestricted => {
            log::warn!("location access is restricted on this device");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geo::LocationFix;
    use crate::domain::permission::AuthorizationStatus;
    use crate::platform::sim::{SimulatedDevice, SimulatedLocationService, SimulatedMapSurface};

    fn screen(
        services_enabled: bool,
        status: AuthorizationStatus,
    ) -> (
        ScreenController<SimulatedLocationService, SimulatedMapSurface>,
        SimulatedDevice,
    ) {
        let (service, device, events) = SimulatedLocationService::new(services_enabled, status);
        let surface = SimulatedMapSurface::new("test-key");
        let controller = ScreenController::new(service, surface, events, 13.0);
        (controller, device)
    }

    #[test]
    fn construction_places_all_default_markers() {
        let (controller, _device) = screen(true, AuthorizationStatus::NotDetermined);

        assert_eq!(controller.phase(), ScreenPhase::Initializing);
        assert_eq!(controller.surface().markers().len(), 3);
        assert_eq!(controller.surface().markers()[0].title, "stuff");
        assert_eq!(controller.surface().credential(), "test-key");
    }

    #[test]
    fn full_workflow_from_prompt_to_centered() {
        let (mut controller, device) = screen(true, AuthorizationStatus::NotDetermined);
        device.answer_prompt_with(AuthorizationStatus::WhenInUseGranted);
        device.report_fix(LocationFix::new(40.0, -73.0));

        controller.start().unwrap();
        controller.pump().unwrap();

        assert_eq!(controller.phase(), ScreenPhase::Centered);
        let camera = controller.camera().unwrap();
        assert_eq!(camera.center, LocationFix::new(40.0, -73.0));
        assert_eq!(camera.zoom, 13.0);
        assert_eq!(device.prompt_requests(), 1);
        assert_eq!(device.start_calls(), 1);
        assert_eq!(device.stop_calls(), 1);
        assert!(!device.updates_active());
        assert!(controller.surface().my_location_enabled());
    }

    #[test]
    fn disabled_services_never_prompt_or_subscribe() {
        let (mut controller, device) = screen(false, AuthorizationStatus::NotDetermined);

        controller.start().unwrap();
        controller.pump().unwrap();

        assert_eq!(
            controller.phase(),
            ScreenPhase::Blocked(BlockReason::ServicesDisabled)
        );
        assert_eq!(device.prompt_requests(), 0);
        assert_eq!(device.start_calls(), 0);
        assert_eq!(controller.camera(), None);
    }

    #[test]
    fn already_granted_centers_without_prompting() {
        let (mut controller, device) = screen(true, AuthorizationStatus::WhenInUseGranted);
        device.report_fix(LocationFix::new(40.852651, -73.877160));

        controller.start().unwrap();
        controller.pump().unwrap();

        assert_eq!(controller.phase(), ScreenPhase::Centered);
        assert_eq!(device.prompt_requests(), 0);
        assert_eq!(
            controller.camera().unwrap().center,
            LocationFix::new(40.852651, -73.877160)
        );
    }

    #[test]
    fn only_the_first_fix_recenters() {
        let (mut controller, device) = screen(true, AuthorizationStatus::WhenInUseGranted);

        controller.start().unwrap();
        assert_eq!(controller.phase(), ScreenPhase::Locating);

        // Two deliveries land before the next cooperative pass.
        device.report_fix(LocationFix::new(40.0, -73.0));
        device.report_fix(LocationFix::new(41.0, -74.0));
        controller.pump().unwrap();

        assert_eq!(controller.phase(), ScreenPhase::Centered);
        assert_eq!(controller.surface().camera_moves().len(), 1);
        assert_eq!(
            controller.camera().unwrap().center,
            LocationFix::new(40.0, -73.0)
        );
        assert_eq!(device.stop_calls(), 1);
    }

    #[test]
    fn later_grant_after_centering_does_not_recenter() {
        let (mut controller, device) = screen(true, AuthorizationStatus::WhenInUseGranted);
        device.report_fix(LocationFix::new(40.0, -73.0));
        controller.start().unwrap();
        controller.pump().unwrap();
        assert_eq!(controller.phase(), ScreenPhase::Centered);

        device.set_authorization(AuthorizationStatus::AlwaysGranted);
        device.report_fix(LocationFix::new(50.0, 8.0));
        controller.pump().unwrap();

        assert_eq!(controller.phase(), ScreenPhase::Centered);
        assert_eq!(controller.surface().camera_moves().len(), 1);
        assert_eq!(device.start_calls(), 1);
    }

    #[test]
    fn denial_after_prompt_blocks_the_screen() {
        let (mut controller, device) = screen(true, AuthorizationStatus::NotDetermined);

        controller.start().unwrap();
        assert_eq!(controller.phase(), ScreenPhase::AwaitingPermission);

        device.set_authorization(AuthorizationStatus::Denied);
        controller.pump().unwrap();

        assert_eq!(
            controller.phase(),
            ScreenPhase::Blocked(BlockReason::PermissionDenied)
        );
        assert_eq!(device.start_calls(), 0);
    }

    #[test]
    fn grant_from_blocked_restarts_the_workflow() {
        let (mut controller, device) = screen(true, AuthorizationStatus::Denied);

        controller.start().unwrap();
        assert_eq!(
            controller.phase(),
            ScreenPhase::Blocked(BlockReason::PermissionDenied)
        );

        device.set_authorization(AuthorizationStatus::WhenInUseGranted);
        device.report_fix(LocationFix::new(40.0, -73.0));
        controller.pump().unwrap();

        assert_eq!(controller.phase(), ScreenPhase::Centered);
    }

    #[test]
    fn unrecognized_status_ends_the_session() {
        let (mut controller, device) = screen(true, AuthorizationStatus::NotDetermined);
        controller.start().unwrap();

        device.set_authorization(AuthorizationStatus::Unrecognized(7));
        let result = controller.pump();

        assert_eq!(
            result,
            Err(AppError::Permission(
                PermissionError::UnsupportedAuthorizationState(7)
            ))
        );
    }

    #[test]
    fn permission_revoked_while_locating_releases_the_subscription() {
        let (mut controller, device) = screen(true, AuthorizationStatus::WhenInUseGranted);
        controller.start().unwrap();
        assert_eq!(controller.phase(), ScreenPhase::Locating);
        assert!(device.updates_active());

        device.set_authorization(AuthorizationStatus::Denied);
        controller.pump().unwrap();

        assert_eq!(
            controller.phase(),
            ScreenPhase::Blocked(BlockReason::PermissionDenied)
        );
        assert_eq!(device.stop_calls(), 1);
        assert!(!device.updates_active());
    }
}
