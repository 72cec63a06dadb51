//! Simulated platform capabilities
//!
//! Deviceless implementations of the location and map seams so the whole
//! workflow runs and tests without hardware. The [`SimulatedDevice`] handle
//! scripts what the real device would do: flip the service switch, answer the
//! permission prompt, report fixes.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crossbeam_channel::{Receiver, Sender, unbounded};

use crate::domain::camera::CameraState;
use crate::domain::geo::LocationFix;
use crate::domain::markers::MarkerSpec;
use crate::domain::permission::AuthorizationStatus;
use crate::platform::location::{Accuracy, LocationEvent, LocationService};
use crate::platform::map::MapSurface;

struct DeviceState {
    services_enabled: bool,
    status: AuthorizationStatus,
    prompt_response: Option<AuthorizationStatus>,
    desired_accuracy: Accuracy,
    updates_active: bool,
    pending_fixes: VecDeque<LocationFix>,
    prompt_requests: u32,
    start_calls: u32,
    stop_calls: u32,
}

/// Control handle for the simulated device
///
/// Shares state with the service it was created alongside; everything stays on
/// one thread, matching the cooperative execution model of the real screen.
pub struct SimulatedDevice {
    state: Rc<RefCell<DeviceState>>,
    events: Sender<LocationEvent>,
}

impl SimulatedDevice {
    /// Flips the OS-level location service switch
    pub fn set_services_enabled(&self, enabled: bool) {
        self.state.borrow_mut().services_enabled = enabled;
    }

    /// Changes the authorization status as if done in system settings and
    /// emits the authorization-changed notification
    pub fn set_authorization(&self, status: AuthorizationStatus) {
        self.state.borrow_mut().status = status;
        let _ = self.events.send(LocationEvent::AuthorizationChanged(status));
    }

    /// Configures how the user will answer the next permission prompt
    pub fn answer_prompt_with(&self, status: AuthorizationStatus) {
        self.state.borrow_mut().prompt_response = Some(status);
    }

    /// Reports a location sample
    ///
    /// Delivered immediately while updates are active; queued for the next
    /// `start_updates` otherwise.
    pub fn report_fix(&self, fix: LocationFix) {
        let active = self.state.borrow().updates_active;
        if active {
            let _ = self.events.send(LocationEvent::FixAvailable(fix));
        } else {
            self.state.borrow_mut().pending_fixes.push_back(fix);
        }
    }

    /// Number of permission prompts the application requested
    pub fn prompt_requests(&self) -> u32 {
        self.state.borrow().prompt_requests
    }

    /// Number of `start_updates` calls the application made
    pub fn start_calls(&self) -> u32 {
        self.state.borrow().start_calls
    }

    /// Number of `stop_updates` calls the application made
    pub fn stop_calls(&self) -> u32 {
        self.state.borrow().stop_calls
    }

    /// Whether an update subscription is currently active
    pub fn updates_active(&self) -> bool {
        self.state.borrow().updates_active
    }

    /// Accuracy the application requested
    pub fn desired_accuracy(&self) -> Accuracy {
        self.state.borrow().desired_accuracy
    }
}

/// Simulated device location capability
pub struct SimulatedLocationService {
    state: Rc<RefCell<DeviceState>>,
    events: Sender<LocationEvent>,
}

impl SimulatedLocationService {
    /// Builds a simulated device in the given initial state
    ///
    /// Returns the service, its control handle and the receiving side of the
    /// event channel for the single consumer.
    pub fn new(
        services_enabled: bool,
        status: AuthorizationStatus,
    ) -> (Self, SimulatedDevice, Receiver<LocationEvent>) {
        let (tx, rx) = unbounded();
        let state = Rc::new(RefCell::new(DeviceState {
            services_enabled,
            status,
            prompt_response: None,
            desired_accuracy: Accuracy::Kilometer,
            updates_active: false,
            pending_fixes: VecDeque::new(),
            prompt_requests: 0,
            start_calls: 0,
            stop_calls: 0,
        }));
        let handle = SimulatedDevice {
            state: Rc::clone(&state),
            events: tx.clone(),
        };
        (Self { state, events: tx }, handle, rx)
    }
}

impl LocationService for SimulatedLocationService {
    fn services_enabled(&self) -> bool {
        self.state.borrow().services_enabled
    }

    fn authorization_status(&self) -> AuthorizationStatus {
        self.state.borrow().status
    }

    fn set_desired_accuracy(&mut self, accuracy: Accuracy) {
        self.state.borrow_mut().desired_accuracy = accuracy;
    }

    fn request_when_in_use_permission(&mut self) {
        let response = {
            let mut state = self.state.borrow_mut();
            state.prompt_requests += 1;
            if state.status == AuthorizationStatus::NotDetermined {
                if let Some(response) = state.prompt_response.take() {
                    state.status = response;
                    Some(response)
                } else {
                    None
                }
            } else {
                None
            }
        };
        if let Some(status) = response {
            let _ = self
                .events
                .send(LocationEvent::AuthorizationChanged(status));
        }
    }

    fn start_updates(&mut self) {
        let queued: Vec<LocationFix> = {
            let mut state = self.state.borrow_mut();
            state.start_calls += 1;
            state.updates_active = true;
            state.pending_fixes.drain(..).collect()
        };
        for fix in queued {
            let _ = self.events.send(LocationEvent::FixAvailable(fix));
        }
    }

    fn stop_updates(&mut self) {
        let mut state = self.state.borrow_mut();
        state.stop_calls += 1;
        state.updates_active = false;
    }
}

/// Simulated map rendering surface
///
/// Records everything the application drives at it so tests and the demo can
/// inspect the outcome.
pub struct SimulatedMapSurface {
    credential: String,
    markers: Vec<MarkerSpec>,
    camera_moves: Vec<CameraState>,
    my_location_enabled: bool,
}

impl SimulatedMapSurface {
    /// Creates a surface provisioned with the given access credential
    pub fn new(credential: &str) -> Self {
        Self {
            credential: credential.to_string(),
            markers: Vec::new(),
            camera_moves: Vec::new(),
            my_location_enabled: false,
        }
    }

    /// The credential the surface was provisioned with
    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// Markers placed on the surface, in placement order
    pub fn markers(&self) -> &[MarkerSpec] {
        &self.markers
    }

    /// Every camera transition the surface was asked to perform
    pub fn camera_moves(&self) -> &[CameraState] {
        &self.camera_moves
    }

    pub fn my_location_enabled(&self) -> bool {
        self.my_location_enabled
    }
}

impl MapSurface for SimulatedMapSurface {
    fn place_marker(&mut self, marker: &MarkerSpec) {
        self.markers.push(marker.clone());
    }

    fn move_camera(&mut self, camera: CameraState) {
        log::debug!(
            "surface animating to ({:.6}, {:.6}) at zoom {}",
            camera.center.latitude,
            camera.center.longitude,
            camera.zoom
        );
        self.camera_moves.push(camera);
    }

    fn set_my_location_enabled(&mut self, enabled: bool) {
        self.my_location_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_answer_changes_status_and_notifies() {
        let (mut service, device, events) =
            SimulatedLocationService::new(true, AuthorizationStatus::NotDetermined);
        device.answer_prompt_with(AuthorizationStatus::WhenInUseGranted);

        service.request_when_in_use_permission();

        assert_eq!(device.prompt_requests(), 1);
        assert_eq!(
            service.authorization_status(),
            AuthorizationStatus::WhenInUseGranted
        );
        assert_eq!(
            events.try_recv(),
            Ok(LocationEvent::AuthorizationChanged(
                AuthorizationStatus::WhenInUseGranted
            ))
        );
    }

    #[test]
    fn prompt_without_scripted_answer_stays_pending() {
        let (mut service, device, events) =
            SimulatedLocationService::new(true, AuthorizationStatus::NotDetermined);

        service.request_when_in_use_permission();

        assert_eq!(device.prompt_requests(), 1);
        assert_eq!(
            service.authorization_status(),
            AuthorizationStatus::NotDetermined
        );
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn fixes_queue_until_updates_start() {
        let (mut service, device, events) =
            SimulatedLocationService::new(true, AuthorizationStatus::WhenInUseGranted);
        let fix = LocationFix::new(40.0, -73.0);
        device.report_fix(fix);
        assert!(events.try_recv().is_err());

        service.start_updates();

        assert_eq!(events.try_recv(), Ok(LocationEvent::FixAvailable(fix)));
        assert!(device.updates_active());
    }

    #[test]
    fn surface_records_everything() {
        let mut surface = SimulatedMapSurface::new("key-123");
        let camera = CameraState::new(LocationFix::new(40.0, -73.0), 13.0);

        surface.move_camera(camera);
        surface.set_my_location_enabled(true);

        assert_eq!(surface.credential(), "key-123");
        assert_eq!(surface.camera_moves(), &[camera]);
        assert!(surface.my_location_enabled());
    }
}
