use eframe::egui;
use eventdeck::gui::DeckApp;
use eventdeck::session::Session;
use eventdeck::settings::{self, Settings};
use eventdeck::logging;

fn main() -> anyhow::Result<()> {
    let root = settings::config_root();
    std::fs::create_dir_all(&root)?;
    let settings = Settings::load(settings::settings_path(&root))?;

    let log_dir = settings::log_dir(&root);
    std::fs::create_dir_all(&log_dir)?;
    logging::init(settings.debug_logging, Some(&log_dir));

    let session = Session::load(settings::session_path(&root));
    let app = DeckApp::new(settings, session)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_min_inner_size([820.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        "eventdeck",
        native_options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("failed to start ui: {err}"))
}
