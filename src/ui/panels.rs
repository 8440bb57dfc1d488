use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::filter::is_visible;
use crate::data::model::Part;
use crate::state::{AppState, Figure};

// ---------------------------------------------------------------------------
// Left side panel – trial visibility
// ---------------------------------------------------------------------------

/// Render the left panel: per-part trial lists with colour swatches and
/// visibility checkboxes.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Trials");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state inside the loop.
    let trials_per_part: Vec<(Part, Vec<String>)> = Part::ALL
        .iter()
        .map(|&part| {
            let names = dataset
                .trial_names(part)
                .into_iter()
                .map(str::to_string)
                .collect();
            (part, names)
        })
        .collect();
    let figure = state.figure;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (part, trials) in &trials_per_part {
                let part = *part;
                let header = format!("{}  ({})", part.title(), trials.len());

                egui::CollapsingHeader::new(RichText::new(header).strong())
                    .id_salt(part.title())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                for trial in trials {
                                    state.hidden.remove(&(part, trial.clone()));
                                }
                            }
                            if ui.small_button("None").clicked() {
                                for trial in trials {
                                    state.hidden.insert((part, trial.clone()));
                                }
                            }
                        });

                        for trial in trials {
                            let mut text = RichText::new(trial);
                            if let Some(cm) = state.colors_for(figure, part) {
                                text = text.color(cm.color_for(trial));
                            }

                            let mut shown = is_visible(&state.hidden, part, trial);
                            if ui.checkbox(&mut shown, text).changed() {
                                state.toggle_trial(part, trial);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for figure in Figure::ALL {
            if ui
                .selectable_label(state.figure == figure, figure.label())
                .clicked()
            {
                state.figure = figure;
            }
        }

        ui.separator();

        if ui
            .selectable_label(state.show_trend, "Trend curves")
            .clicked()
        {
            state.show_trend = !state.show_trend;
        }

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} readings, {} oxidizer / {} catalyst trials",
                ds.reading_count(),
                ds.trial_count(Part::Oxidizer),
                ds.trial_count(Part::Catalyst)
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open lab measurements")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_file(&path);
    }
}
