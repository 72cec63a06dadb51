use mapscreen::config::settings;
use mapscreen::platform::sim::{SimulatedLocationService, SimulatedMapSurface};
use mapscreen::{AuthorizationStatus, LocationFix, ScreenController, Settings};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = settings::load().unwrap_or_else(|err| {
        log::warn!("falling back to default settings: {err}");
        Settings::default()
    });

    // Scripted device: the user grants when-in-use access and the hardware
    // reports a single fix once updates start.
    let (service, device, events) =
        SimulatedLocationService::new(true, AuthorizationStatus::NotDetermined);
    device.answer_prompt_with(AuthorizationStatus::WhenInUseGranted);
    device.report_fix(LocationFix::new(40.748433, -73.985656));

    let surface = SimulatedMapSurface::new(&settings.api_key);
    let mut screen = ScreenController::new(service, surface, events, settings.default_zoom);

    if let Err(err) = screen.start().and_then(|()| screen.pump()) {
        log::error!("map screen failed: {err}");
        std::process::exit(1);
    }

    match screen.camera() {
        Some(camera) => log::info!(
            "centered on ({:.6}, {:.6}) at zoom {}",
            camera.center.latitude,
            camera.center.longitude,
            camera.zoom
        ),
        None => log::info!("screen settled in {:?} without centering", screen.phase()),
    }
}
