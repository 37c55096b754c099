use egui::{Align, Button, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::{
    controller::LoadState,
    ergast::{Race, RaceRepository},
};

use super::{PALETTE_ORANGE, PaddockApp, ROW_HEIGHT};

const SCHEDULE_COLUMNS: [&str; 5] = ["Round", "Race name", "Circuit name", "Date", "Time"];

impl<R: RaceRepository + 'static> PaddockApp<R> {
    pub(crate) fn schedule_view(&mut self, ctx: &egui::Context) {
        let is_loading = self.controller.load_state().is_loading();

        egui::TopBottomPanel::top("header")
            .min_height(36.)
            .show(ctx, |ui| {
                ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                    ui.heading(
                        RichText::new(format!("Season: {}", self.app_config.season))
                            .color(PALETTE_ORANGE),
                    );
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.add_enabled(!is_loading, Button::new("Refresh")).clicked() {
                            self.controller.load_schedule();
                        }
                    });
                });
            });

        let mut selected_round = None;
        egui::CentralPanel::default().show(ctx, |ui| match self.controller.load_state() {
            LoadState::Idle | LoadState::Loading => {
                ui.label("Loading...");
            }
            LoadState::Failed(message) => {
                ui.label(RichText::new(message).color(PALETTE_ORANGE));
            }
            LoadState::Loaded(races) => {
                selected_round = schedule_table(ui, races);
            }
        });

        if let Some(round) = selected_round {
            self.controller.select_race(round);
        }
    }
}

/// Draws the race table, returning the round whose name was clicked.
fn schedule_table(ui: &mut Ui, races: &[Race]) -> Option<u32> {
    let mut clicked = None;
    TableBuilder::new(ui)
        .id_salt("schedule_table")
        .striped(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto().at_least(50.))
        .column(Column::remainder().at_least(200.).clip(true))
        .column(Column::remainder().at_least(200.).clip(true))
        .column(Column::auto().at_least(90.))
        .column(Column::auto().at_least(80.))
        .header(ROW_HEIGHT, |mut header| {
            for title in SCHEDULE_COLUMNS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, races.len(), |mut row| {
                let race = &races[row.index()];
                row.col(|ui| {
                    ui.label(race.round.to_string());
                });
                row.col(|ui| {
                    if ui.link(&race.name).clicked() {
                        clicked = Some(race.round);
                    }
                });
                row.col(|ui| {
                    ui.label(&race.circuit_name);
                });
                row.col(|ui| {
                    ui.label(&race.date);
                });
                row.col(|ui| {
                    ui.label(race.time.as_deref().unwrap_or(""));
                });
            });
        });
    clicked
}
