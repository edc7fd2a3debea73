use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::ColorMetric;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Right side panel – metric selector and selected tweets
// ---------------------------------------------------------------------------

/// Render the controls and the list of selected tweets.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    // ---- Color-by selector ----
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Color By:");
        let current = state.metric;
        egui::ComboBox::from_id_salt("color_by")
            .selected_text(current.label())
            .show_ui(ui, |ui: &mut Ui| {
                for metric in ColorMetric::ALL {
                    if ui
                        .selectable_label(current == metric, metric.label())
                        .clicked()
                    {
                        state.set_metric(metric);
                    }
                }
            });
    });
    ui.separator();

    ui.heading("Selected tweets");
    if state.selection.is_empty() {
        ui.label("Click a marker to inspect its tweet.");
        return;
    }

    let metric = state.metric;
    let tweets = state.selected_tweets();

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder().clip(true))
        .header(ROW_HEIGHT, |mut header| {
            header.col(|ui| {
                ui.strong("Month");
            });
            header.col(|ui| {
                ui.strong(metric.label());
            });
            header.col(|ui| {
                ui.strong("Tweet");
            });
        })
        .body(|mut body| {
            for tweet in tweets {
                body.row(ROW_HEIGHT, |mut row| {
                    row.col(|ui| {
                        ui.label(&tweet.month);
                    });
                    row.col(|ui| {
                        ui.label(format!("{:.3}", metric.value(tweet)));
                    });
                    row.col(|ui| {
                        ui.add(egui::Label::new(&tweet.raw_tweet).truncate())
                            .on_hover_text(&tweet.raw_tweet);
                    });
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

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} tweets across {} months, {} selected",
                ds.len(),
                ds.months.len(),
                state.selection.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open tweet data")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(tweets) => state.set_tweets(tweets),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
