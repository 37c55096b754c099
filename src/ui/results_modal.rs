use egui::{Align, Id, Image, Layout, Modal, Ui, Vec2};
use egui_extras::{Column, TableBuilder};

use crate::ergast::{RaceRepository, RaceResult};

use super::{HEADSHOT_SIZE, PaddockApp, ROW_HEIGHT};

const RESULTS_COLUMNS: [&str; 7] = [
    "Position",
    "Headshot",
    "Driver",
    "Nationality",
    "Team",
    "Time",
    "Points",
];
const MODAL_WIDTH: f32 = 760.;
const MODAL_MAX_TABLE_HEIGHT: f32 = 480.;

impl<R: RaceRepository + 'static> PaddockApp<R> {
    pub(crate) fn results_modal(&mut self, ctx: &egui::Context) {
        let Some(selection) = self.controller.results_view().visible_selection() else {
            return;
        };

        let modal = Modal::new(Id::new("race_results")).show(ctx, |ui| {
            ui.set_width(MODAL_WIDTH);
            ui.heading(format!("{} Results", selection.race_name));
            ui.separator();
            if selection.results.is_empty() {
                ui.label("No results published for this race yet.");
            } else {
                results_table(ui, &selection.results);
            }
            ui.separator();
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.button("Close").clicked()
            })
            .inner
        });

        // clicking the backdrop or pressing escape also dismisses
        if modal.inner || modal.should_close() {
            self.controller.dismiss_modal();
        }
    }
}

fn results_table(ui: &mut Ui, results: &[RaceResult]) {
    let row_height = HEADSHOT_SIZE.max(ROW_HEIGHT) + 4.;
    TableBuilder::new(ui)
        .id_salt("results_table")
        .striped(true)
        .max_scroll_height(MODAL_MAX_TABLE_HEIGHT)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(60.))
        .column(Column::exact(HEADSHOT_SIZE + 8.))
        .column(Column::auto().at_least(150.))
        .column(Column::auto().at_least(90.))
        .column(Column::auto().at_least(110.))
        .column(Column::auto().at_least(90.))
        .column(Column::remainder().at_least(50.))
        .header(ROW_HEIGHT, |mut header| {
            for title in RESULTS_COLUMNS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, results.len(), |mut row| {
                let result = &results[row.index()];
                row.col(|ui| {
                    ui.label(result.position.to_string());
                });
                row.col(|ui| {
                    // the URL is a guess; a missing image just shows the loader's error glyph
                    ui.add(
                        Image::new(result.headshot_url.as_str())
                            .fit_to_exact_size(Vec2::splat(HEADSHOT_SIZE)),
                    )
                    .on_hover_text(format!("{} headshot", result.driver_name));
                });
                row.col(|ui| {
                    ui.label(&result.driver_name);
                });
                row.col(|ui| {
                    ui.label(&result.nationality);
                });
                row.col(|ui| {
                    ui.label(&result.team);
                });
                row.col(|ui| {
                    ui.label(result.time.as_deref().unwrap_or(""));
                });
                row.col(|ui| {
                    ui.label(result.points.to_string());
                });
            });
        });
}
