// Trip Countdown
// Main entry point

use trip_countdown::services::settings::SettingsService;
use trip_countdown::ui_egui::CountdownApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    log::info!("Starting Trip Countdown");

    // A share link may be passed as the first argument
    let share_link = std::env::args().nth(1);

    let settings = SettingsService::new(CountdownApp::config_path());
    log::info!("Reading settings from {}", settings.path().display());
    let config = settings.get_or_default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Countdown")
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size(CountdownApp::min_window_size()),
        ..Default::default()
    };

    eframe::run_native(
        "Trip Countdown",
        options,
        Box::new(move |cc| Ok(Box::new(CountdownApp::new(cc, config, share_link)?))),
    )
}
