use eframe::egui::{Align2, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, LineStyle, Plot, PlotPoint, PlotPoints, Text, VLine};

use crate::color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Distribution plot (central panel)
// ---------------------------------------------------------------------------

/// Histogram, fitted bell curve and percentile markers for the current
/// selection.
pub fn distribution_plot(ui: &mut Ui, state: &AppState) {
    let report = match &state.report {
        Some(r) => r,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                let msg = if state.series.is_some() {
                    "Select a date with at least two observations up to it"
                } else {
                    "Waiting for data…"
                };
                ui.heading(msg);
            });
            return;
        }
    };

    ui.heading("Distribution of NetMargin (Filtered by Date)");

    let width = report.histogram.bin_width();
    let bars: Vec<Bar> = report
        .histogram
        .bars()
        .map(|(center, density)| Bar::new(center, density).width(width))
        .collect();

    let selected = report.selection.selected.value;
    let peak = report.curve_peak();
    let threshold_colors = color::threshold_palette(report.thresholds.len());

    Plot::new("distribution_plot")
        .legend(Legend::default())
        .x_axis_label("NetMargin")
        .y_axis_label("Density")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("NetMargin Histogram (Filtered)")
                    .color(color::HISTOGRAM),
            );

            let curve: PlotPoints = report.curve.iter().copied().collect();
            plot_ui.line(
                Line::new(curve)
                    .name("Fitted Bell Curve (Filtered)")
                    .color(color::CURVE)
                    .width(2.0),
            );

            plot_ui.vline(
                VLine::new(selected)
                    .name(format!("Selected Value: {selected:?}"))
                    .color(color::SELECTED)
                    .style(LineStyle::Dashed { length: 10.0 })
                    .width(2.0),
            );
            plot_ui.text(
                Text::new(
                    PlotPoint::new(selected, peak / 2.0),
                    RichText::new(format!(
                        "Percentile: {:.2}%",
                        report.selection.percentile_rank
                    ))
                    .color(color::SELECTED),
                )
                .anchor(Align2::LEFT_CENTER),
            );

            for (t, &c) in report.thresholds.iter().zip(&threshold_colors) {
                plot_ui.vline(
                    VLine::new(t.nearest.value)
                        .name(format!("{}th Percentile: {:.2}", t.rank, t.nearest.value))
                        .color(c)
                        .style(LineStyle::Dashed { length: 6.0 })
                        .width(1.5),
                );
            }
        });
}
