mod app;
mod color;
mod state;
mod ui;

use app::PandaDatasetApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    // Optional dataset folder or recipe (.json) to open on start.
    let input = std::env::args_os().nth(1).map(std::path::PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([700.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Panda Dataset – Classification Dataset Viewer",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can preview png/jpg samples.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(PandaDatasetApp::with_input(input)))
        }),
    )
}
