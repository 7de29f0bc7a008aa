use std::time::Instant;

use eframe::egui::{self, Color32, RichText, Slider, Ui};

use crate::config::{DataSource, REFRESH_MAX_SECS, REFRESH_MIN_SECS};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – controls and summaries
// ---------------------------------------------------------------------------

/// Render the refresh slider, the observation picker and the text summary.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    ui.add(
        Slider::new(
            &mut state.refresh_interval_secs,
            REFRESH_MIN_SECS..=REFRESH_MAX_SECS,
        )
        .text("Refresh Interval (seconds)"),
    );
    ui.label(format!(
        "Auto-refreshing every {} seconds...",
        state.refresh_interval_secs
    ));
    ui.separator();

    if state.series.is_none() {
        ui.label("No data loaded.");
        return;
    }

    ui.strong("Select a Date and Value");
    let current = state
        .selected
        .and_then(|i| state.labels.get(i))
        .cloned()
        .unwrap_or_default();

    let mut picked = None;
    egui::ComboBox::from_id_salt("observation_picker")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for (i, label) in state.labels.iter().enumerate() {
                if ui
                    .selectable_label(state.selected == Some(i), label)
                    .clicked()
                {
                    picked = Some(i);
                }
            }
        });
    if let Some(i) = picked {
        state.select(i);
    }
    ui.separator();

    let Some(report) = &state.report else {
        return;
    };

    ui.strong("Percentile Summary (Filtered Data)");
    for line in report.percentile_lines() {
        ui.label(line);
    }
    ui.separator();

    for line in report.selection_lines() {
        ui.label(RichText::new(line).strong());
    }
    ui.label(format!(
        "{} observations, {} bins, mean {:.2}, std dev {:.2}",
        report.sample_size, report.bins, report.fit.mean, report.fit.std_dev
    ));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open local file…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Use configured source").clicked() {
                let source = state.configured_source.clone();
                state.set_source(source);
                ui.close_menu();
            }
            ui.separator();
            if ui
                .add_enabled(state.report.is_some(), egui::Button::new("Export summary…"))
                .clicked()
            {
                save_summary_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if ui.button("Refresh now").clicked() {
            state.reload();
        }

        if let Some(series) = &state.series {
            ui.label(format!("{} observations from {}", series.len(), state.source));
            if let Some((first, last)) = series.date_span() {
                ui.label(format!("{first} → {last}"));
            }
            let wait = state.time_until_refresh(Instant::now());
            ui.label(format!("next refresh in {}s", wait.as_secs()));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open NetMargin export")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.set_source(DataSource::File(path));
    }
}

pub fn save_summary_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export percentile summary")
        .add_filter("CSV", &["csv"])
        .set_file_name("netmargin_percentiles.csv")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_summary(&path) {
            log::error!("Failed to export summary: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
