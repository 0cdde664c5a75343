use eframe::egui::Ui;
use egui_plot::{Legend, Line, LineStyle, Plot, PlotPoints};

use crate::state::AppState;
use crate::ui::styled;

// ---------------------------------------------------------------------------
// Voltammogram (central panel)
// ---------------------------------------------------------------------------

/// Render every cycle's forward + reverse sweep in the central panel.
pub fn cv_plot(ui: &mut Ui, state: &AppState) {
    let result = match &state.result {
        Some(r) => r,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open an instrument export  (File → Open…)");
            });
            return;
        }
    };

    let style = &state.style.style;
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(styled("Cyclic Voltammetry", style.title));
    });

    Plot::new("cv_plot")
        .legend(Legend::default())
        .x_axis_label(styled("Potential / V", style.x_label))
        .y_axis_label(styled("Current / A", style.y_label))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for curve in result.curves() {
                let points: PlotPoints = curve
                    .forward
                    .iter()
                    .chain(curve.reverse.iter())
                    .map(|s| [s.potential, s.current])
                    .collect();

                let line_style = if curve.valid {
                    LineStyle::Solid
                } else {
                    LineStyle::dashed_loose()
                };

                let line = Line::new(points)
                    .name(format!("Cycle {}", curve.index))
                    .color(state.colors.color_for(curve.index, curve.valid))
                    .style(line_style)
                    .width(style.line_width);

                plot_ui.line(line);
            }
        });
}
