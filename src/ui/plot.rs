use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

use crate::state::{AppState, ChartKind};

// ---------------------------------------------------------------------------
// Count charts (central panel)
// ---------------------------------------------------------------------------

/// Render the selected count chart in the central panel.
pub fn count_plot(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a dataset folder to count samples  (File → Open folder…)");
            });
            return;
        }
    };

    let Some(classes) = dataset.classes() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading(format!("{} samples, not labeled", dataset.len()));
        });
        return;
    };

    match state.chart {
        ChartKind::Occurrences => occurrences_plot(ui, state, &classes),
        ChartKind::Splits => splits_plot(ui, state, &classes),
    }
}

/// Class names under integer x positions.
fn class_axis(classes: &[String]) -> impl Fn(GridMark, &std::ops::RangeInclusive<f64>) -> String {
    let classes = classes.to_vec();
    move |mark, _range| {
        let pos = mark.value.round();
        if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
            return String::new();
        }
        classes.get(pos as usize).cloned().unwrap_or_default()
    }
}

/// One bar per class.
fn occurrences_plot(ui: &mut Ui, state: &AppState, classes: &[String]) {
    let Some(counts) = state.dataset.as_ref().and_then(|ds| ds.count_occurrences()) else {
        return;
    };

    Plot::new("occurrences_plot")
        .legend(Legend::default())
        .x_axis_label("Class")
        .y_axis_label("Samples")
        .x_axis_formatter(class_axis(classes))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (i, class) in classes.iter().enumerate() {
                let color = state
                    .class_colors
                    .as_ref()
                    .map(|cm| cm.color_for(class))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let n = counts.get(class).copied().unwrap_or(0);

                let bar = Bar::new(i as f64, n as f64).name(class).width(0.7);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(class).color(color));
            }
        });
}

/// Grouped bars: one series per split, side by side within each class.
fn splits_plot(ui: &mut Ui, state: &AppState, classes: &[String]) {
    let Some(table) = state.dataset.as_ref().and_then(|ds| ds.count_splits()) else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No split assigned yet");
        });
        return;
    };

    let n_splits = table.splits.len().max(1) as f64;
    let group_width = 0.8;
    let bar_width = group_width / n_splits;

    Plot::new("splits_plot")
        .legend(Legend::default())
        .x_axis_label("Class")
        .y_axis_label("Samples")
        .x_axis_formatter(class_axis(classes))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (col, split) in table.splits.iter().enumerate() {
                let color = state
                    .split_colors
                    .as_ref()
                    .map(|cm| cm.color_for(split))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let offset = -group_width / 2.0 + bar_width * (col as f64 + 0.5);

                let bars: Vec<Bar> = table
                    .classes
                    .iter()
                    .enumerate()
                    .map(|(row, class)| {
                        Bar::new(row as f64 + offset, table.counts[row][col] as f64)
                            .name(format!("{class} / {split}"))
                            .width(bar_width * 0.95)
                    })
                    .collect();

                plot_ui.bar_chart(BarChart::new(bars).name(split).color(color));
            }
        });
}
