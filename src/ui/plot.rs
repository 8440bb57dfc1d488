use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, Points};

use crate::data::filter::visible_trials;
use crate::data::model::{LabDataset, Part};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Figure rendering (central panel)
// ---------------------------------------------------------------------------

/// Render the active figure as two stacked panels, Part A above Part B.
pub fn lab_figure(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a lab CSV to view the figures  (File → Open…)");
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(state.figure.title()).heading());
    });
    ui.add_space(4.0);

    // Two equal panels; each carries its own part title above the plot.
    let panel_height = ((ui.available_height() - 60.0) / 2.0).max(140.0);
    for part in Part::ALL {
        part_panel(ui, state, dataset, part, panel_height);
    }
}

fn part_panel(ui: &mut Ui, state: &AppState, dataset: &LabDataset, part: Part, height: f32) {
    let figure = state.figure;
    let series = figure.stores(dataset).get(part);
    let colors = state.colors_for(figure, part);

    ui.label(RichText::new(part.title()).strong());

    let mut plot = Plot::new((figure.label(), part.title()))
        .legend(Legend::default())
        .x_axis_label("Time elapsed since ignition (s)")
        .y_axis_label(figure.y_label(part))
        .height(height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);

    if figure.percent_axis() {
        plot = plot.y_axis_formatter(|mark, _range| {
            let v = mark.value;
            if v.fract().abs() < 1e-9 {
                format!("{v:.0}%")
            } else {
                format!("{v}%")
            }
        });
    }

    plot.show(ui, |plot_ui| {
        for trial in visible_trials(series, part, &state.hidden) {
            let Some((xs, ys)) = series.series(trial) else {
                continue;
            };

            let color = colors
                .map(|cm| cm.color_for(trial))
                .unwrap_or(Color32::LIGHT_BLUE);
            let readings: Vec<[f64; 2]> = xs
                .iter()
                .zip(ys.iter())
                .map(|(&x, &y)| [x, y])
                .collect();

            if figure.has_trend() {
                // Scatter plus a translucent fitted curve in the same hue.
                plot_ui.points(
                    Points::new(readings)
                        .name(trial)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(2.5),
                );
                if state.show_trend {
                    if let Some(curve) = state.trend_for(figure, part, trial) {
                        let trend_color = colors
                            .map(|cm| cm.trend_color_for(trial))
                            .unwrap_or(Color32::GRAY);
                        plot_ui.line(
                            Line::new(curve.to_vec()).color(trend_color).width(1.5),
                        );
                    }
                }
            } else {
                plot_ui.line(
                    Line::new(readings.clone())
                        .name(trial)
                        .color(color)
                        .width(1.5),
                );
                plot_ui.points(
                    Points::new(readings)
                        .color(color)
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(2.0),
                );
            }
        }
    });
}
