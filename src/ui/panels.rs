use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use cv_analyzer::data::export;
use cv_analyzer::data::summary::CapacitanceUnit;
use cv_analyzer::style::FontStyle;

use crate::state::AppState;
use crate::ui::styled;

// ---------------------------------------------------------------------------
// Left side panel – parameters, summary, cycle table
// ---------------------------------------------------------------------------

/// Render the left result panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Parameters");
    ui.separator();

    let mut changed = false;
    ui.horizontal(|ui: &mut Ui| {
        changed |= ui
            .checkbox(&mut state.override_area, "Electrode area")
            .changed();
        changed |= ui
            .add_enabled(
                state.override_area,
                egui::DragValue::new(&mut state.electrode_area)
                    .speed(0.001)
                    .range(1e-4..=100.0)
                    .suffix(" cm²"),
            )
            .changed();
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Outliers to exclude");
        changed |= ui
            .add(egui::DragValue::new(&mut state.config.outlier_count).range(0..=10))
            .changed();
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Sensitivity factor");
        changed |= ui
            .add(
                egui::DragValue::new(&mut state.config.sensitivity_threshold_factor)
                    .speed(0.5)
                    .range(1.0..=1000.0)
                    .suffix("×"),
            )
            .changed();
    });
    if changed {
        if let Err(e) = state.reanalyze() {
            log::error!("Re-analysis failed: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }

    ui.add_space(8.0);
    ui.heading("Results");
    ui.separator();

    let Some(result) = &state.result else {
        ui.label("No file loaded.");
        return;
    };

    let text_font = state.style.style.text;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if let Some(summary) = &state.summary {
                for (label, value) in summary.entries() {
                    ui.label(styled(format!("{label}: {value}"), plain(text_font)));
                }
                if let Some(cv) = result.statistics().coefficient_of_variation {
                    ui.label(styled(
                        format!("Coefficient of Variation: {cv:.2} %"),
                        plain(text_font),
                    ));
                }
            }

            if !state.warnings.is_empty() {
                ui.add_space(6.0);
                ui.strong("Warnings");
                for w in &state.warnings {
                    ui.label(RichText::new(w.to_string()).color(Color32::from_rgb(230, 140, 20)));
                }
            }

            ui.add_space(6.0);
            ui.strong("Cycles");
            let unit = CapacitanceUnit::for_values(
                result.cycles().iter().filter_map(|c| c.valid_capacitance()),
            );
            egui::Grid::new("cycle_table")
                .striped(true)
                .num_columns(4)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("Cycle");
                    ui.strong("Area (C)");
                    ui.strong(format!("C ({})", unit.symbol()));
                    ui.strong("Remark");
                    ui.end_row();

                    for c in result.cycles() {
                        let color = state.colors.color_for(c.index, c.is_valid());
                        ui.label(RichText::new(c.index.to_string()).color(color));
                        ui.label(
                            c.area
                                .map(|a| format!("{a:.4e}"))
                                .unwrap_or_else(|| "—".into()),
                        );
                        ui.label(
                            c.capacitance
                                .map(|v| format!("{:.6}", v * unit.factor_from_mf()))
                                .unwrap_or_else(|| "—".into()),
                        );
                        ui.label(c.exclusion.map(|e| e.to_string()).unwrap_or_default());
                        ui.end_row();
                    }
                });
        });
}

/// Summary lines are long; keep the size but not the weight.
fn plain(font: FontStyle) -> FontStyle {
    FontStyle {
        bold: false,
        ..font
    }
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
            if ui
                .add_enabled(state.result.is_some(), egui::Button::new("Export cycles CSV…"))
                .clicked()
            {
                export_csv_dialog(state);
                ui.close_menu();
            }
        });
        ui.menu_button("Settings", |ui: &mut Ui| {
            if ui.button("Plot style…").clicked() {
                state.show_style_window = true;
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(result) = &state.result {
            ui.label(format!(
                "{} cycles, {} valid",
                result.cycles().len(),
                result.statistics().valid_count
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Plot style window
// ---------------------------------------------------------------------------

pub fn style_window(ctx: &egui::Context, state: &mut AppState) {
    let mut open = state.show_style_window;
    egui::Window::new("Plot style")
        .open(&mut open)
        .resizable(false)
        .show(ctx, |ui: &mut Ui| {
            let style = &mut state.style.style;
            egui::Grid::new("style_grid").num_columns(3).show(ui, |ui: &mut Ui| {
                for (name, font) in [
                    ("Title", &mut style.title),
                    ("X label", &mut style.x_label),
                    ("Y label", &mut style.y_label),
                    ("Text", &mut style.text),
                ] {
                    ui.label(name);
                    ui.add(egui::DragValue::new(&mut font.size).range(6.0..=48.0));
                    ui.checkbox(&mut font.bold, "Bold");
                    ui.end_row();
                }
                ui.label("Line width");
                ui.add(egui::DragValue::new(&mut style.line_width).speed(0.1).range(0.5..=8.0));
                ui.end_row();
            });

            ui.separator();
            let (save, import, export, reset) = ui
                .horizontal(|ui: &mut Ui| {
                    (
                        ui.button("Save").clicked(),
                        ui.button("Import…").clicked(),
                        ui.button("Export…").clicked(),
                        ui.button("Reset").clicked(),
                    )
                })
                .inner;

            let outcome = if save {
                Some(state.style.save())
            } else if import {
                pick_json("Import plot style").map(|path| state.style.import(&path))
            } else if export {
                rfd::FileDialog::new()
                    .set_title("Export plot style")
                    .set_file_name("plot-style.json")
                    .add_filter("JSON", &["json"])
                    .save_file()
                    .map(|path| state.style.export(&path))
            } else if reset {
                Some(state.style.reset())
            } else {
                None
            };
            if let Some(Err(e)) = outcome {
                log::error!("Plot style: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        });
    state.show_style_window = open;
}

fn pick_json(title: &str) -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title(title)
        .add_filter("JSON", &["json"])
        .pick_file()
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open CV export")
        .add_filter("Instrument export", &["txt", "csv"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.import(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

pub fn export_csv_dialog(state: &mut AppState) {
    let Some(result) = &state.result else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export cycle results")
        .set_file_name("cycles.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match export::save_cycles_csv(result, &path) {
            Ok(()) => log::info!("Exported {} cycles to {}", result.cycles().len(), path.display()),
            Err(e) => {
                log::error!("Export failed: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
