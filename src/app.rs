use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct PandaDatasetApp {
    pub state: AppState,
}

impl PandaDatasetApp {
    /// Start with a dataset folder or recipe given on the command line.
    pub fn with_input(input: Option<std::path::PathBuf>) -> Self {
        let mut app = Self::default();
        match input {
            Some(path) if path.extension().is_some_and(|e| e == "json") => {
                app.state.open_recipe(&path)
            }
            Some(path) => app.state.open_folder(path),
            None => {}
        }
        app
    }
}

impl eframe::App for PandaDatasetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: crawl / split settings ----
        egui::SidePanel::left("settings_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Right side panel: samples ----
        egui::SidePanel::right("sample_panel")
            .default_width(420.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::sample_panel(ui, &mut self.state);
            });

        // ---- Central panel: count chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::count_plot(ui, &self.state);
        });
    }
}
