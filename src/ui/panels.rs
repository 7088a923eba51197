use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use panda_dataset::StratifiedSplit;

use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Left side panel – crawl, label and split settings
// ---------------------------------------------------------------------------

/// Render the left settings panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dataset");
    ui.separator();

    match &state.root {
        Some(root) => ui.label(root.display().to_string()),
        None => ui.label("No folder selected."),
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Crawl filters ----
            ui.strong("Include (comma-separated)");
            let mut filter_edited = ui.text_edit_singleline(&mut state.include_text).lost_focus();
            ui.strong("Exclude (comma-separated)");
            filter_edited |= ui.text_edit_singleline(&mut state.exclude_text).lost_focus();
            if filter_edited {
                state.apply_filter_text();
                changed = true;
            }
            changed |= ui
                .checkbox(&mut state.label_by_folder, "Label by parent folder")
                .changed();
            ui.separator();

            // ---- Split steps ----
            egui::CollapsingHeader::new(RichText::new("Stratified splits").strong())
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    let mut remove = None;
                    for (i, step) in state.steps.iter_mut().enumerate() {
                        ui.horizontal(|ui: &mut Ui| {
                            ui.label("k");
                            changed |= ui
                                .add(egui::DragValue::new(&mut step.k).range(0..=10_000))
                                .changed();
                            changed |= ui
                                .add(egui::TextEdit::singleline(&mut step.origin).desired_width(50.0))
                                .lost_focus();
                            ui.label("→");
                            changed |= ui
                                .add(egui::TextEdit::singleline(&mut step.to).desired_width(50.0))
                                .lost_focus();
                            changed |= ui.checkbox(&mut step.overwrite, "reset").changed();
                            if ui.small_button("✖").clicked() {
                                remove = Some(i);
                            }
                        });
                    }
                    if let Some(i) = remove {
                        state.steps.remove(i);
                        changed = true;
                    }
                    if ui.small_button("Add step").clicked() {
                        state.steps.push(StratifiedSplit::default());
                        changed = true;
                    }
                });

            // ---- Seed ----
            ui.horizontal(|ui: &mut Ui| {
                let mut fixed = state.seed.is_some();
                if ui.checkbox(&mut fixed, "Fixed seed").changed() {
                    state.seed = fixed.then_some(42);
                    changed = true;
                }
                if let Some(seed) = state.seed.as_mut() {
                    changed |= ui.add(egui::DragValue::new(seed)).changed();
                }
            });

            if ui.button("Rebuild").clicked() {
                changed = true;
            }
            ui.separator();

            // ---- Row filters and legend ----
            row_filters(ui, state);
        });

    if changed {
        state.rebuild();
    }
}

/// Label / split selectors for the sample table, with colour swatches.
fn row_filters(ui: &mut Ui, state: &mut AppState) {
    let Some(ds) = &state.dataset else {
        return;
    };
    let classes = ds.classes().unwrap_or_default();
    let splits = ds.splits().unwrap_or_default();

    let mut label_choice = state.label_filter.clone();
    ui.strong("Show label");
    egui::ComboBox::from_id_salt("label_filter")
        .selected_text(label_choice.clone().unwrap_or_else(|| "all".to_string()))
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut label_choice, None, "all");
            for class in &classes {
                let mut text = RichText::new(class);
                if let Some(cm) = &state.class_colors {
                    text = text.color(cm.color_for(class));
                }
                ui.selectable_value(&mut label_choice, Some(class.clone()), text);
            }
        });
    if label_choice != state.label_filter {
        state.set_label_filter(label_choice);
    }

    let mut split_choice = state.split_filter.clone();
    ui.strong("Show split");
    egui::ComboBox::from_id_salt("split_filter")
        .selected_text(split_choice.clone().unwrap_or_else(|| "all".to_string()))
        .show_ui(ui, |ui: &mut Ui| {
            ui.selectable_value(&mut split_choice, None, "all");
            for split in &splits {
                ui.selectable_value(&mut split_choice, Some(split.clone()), split.as_str());
            }
        });
    if split_choice != state.split_filter {
        state.set_split_filter(split_choice);
    }

    if let Some(cm) = &state.split_colors {
        ui.separator();
        ui.strong(format!("Legend ({})", cm.column));
        for (value, color) in cm.legend_entries() {
            ui.label(RichText::new(format!("■ {value}")).color(color));
        }
    }
}

// ---------------------------------------------------------------------------
// Right side panel – sample table and preview
// ---------------------------------------------------------------------------

/// `file://` URI for a crawled path; relative paths are taken from the working directory.
fn file_uri(filepath: &str) -> String {
    let path = Path::new(filepath);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    format!("file://{}", absolute.display())
}

/// Render the sample table with a preview of the selected file.
pub fn sample_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(ds) = &state.dataset else {
        ui.label("No samples.");
        return;
    };

    if let Some(sample) = state.selected.and_then(|id| ds.get(id)) {
        ui.add(
            egui::Image::new(file_uri(&sample.filepath))
                .max_width(ui.available_width())
                .max_height(200.0),
        );
        ui.label(RichText::new(&sample.filepath).small());
        ui.separator();
    }

    let mut clicked = None;
    let visible = &state.visible_indices;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .sense(egui::Sense::click())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for title in ["#", "label", "split", "filepath"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, visible.len(), |mut row| {
                let id = visible[row.index()];
                let sample = &ds.samples()[id];
                row.set_selected(state.selected == Some(id));

                row.col(|ui| {
                    ui.label(id.to_string());
                });
                row.col(|ui| {
                    ui.label(sample.label.as_deref().unwrap_or("–"));
                });
                row.col(|ui| {
                    let split = sample.split.as_deref().unwrap_or("–");
                    let color = state
                        .split_colors
                        .as_ref()
                        .map(|cm| cm.color_for(split))
                        .unwrap_or(Color32::GRAY);
                    ui.label(RichText::new(split).color(color));
                });
                row.col(|ui| {
                    ui.label(sample.filepath.as_str());
                });

                if row.response().clicked() {
                    clicked = Some(id);
                }
            });
        });

    if clicked.is_some() {
        state.selected = clicked;
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Open recipe…").clicked() {
                open_recipe_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} samples, {} classes, {} shown",
                ds.len(),
                ds.classes().map_or(0, |c| c.len()),
                state.visible_indices.len()
            ));
        }

        ui.separator();

        ui.selectable_value(&mut state.chart, ChartKind::Occurrences, "Classes");
        let can_split = state.dataset.as_ref().is_some_and(|ds| ds.is_split());
        ui.add_enabled_ui(can_split, |ui: &mut Ui| {
            ui.selectable_value(&mut state.chart, ChartKind::Splits, "Splits");
        });

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open dataset folder")
        .pick_folder();

    if let Some(path) = folder {
        state.open_folder(path);
    }
}

pub fn open_recipe_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dataset recipe")
        .add_filter("Recipe", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.open_recipe(&path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_uri_anchors_relative_paths() {
        let uri = file_uri("sample_dataset/cat/cat_000.png");
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(
            uri,
            format!("file://{}", cwd.join("sample_dataset/cat/cat_000.png").display())
        );
        assert!(!uri.starts_with("file://sample_dataset"));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_uri_keeps_absolute_paths() {
        assert_eq!(file_uri("/data/cat/1.png"), "file:///data/cat/1.png");
    }
}
