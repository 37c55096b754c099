mod results_modal;
mod schedule_view;

use std::sync::Arc;

use egui::{Color32, Visuals, style::Widgets};
use log::error;
use tokio::runtime::Handle;

use crate::{config::AppConfig, controller::ScheduleController, ergast::RaceRepository};

pub(crate) const PALETTE_BLACK: Color32 = Color32::from_rgb(12, 12, 12);
pub(crate) const PALETTE_BROWN: Color32 = Color32::from_rgb(72, 30, 20);
pub(crate) const PALETTE_MAROON: Color32 = Color32::from_rgb(155, 57, 34);
pub(crate) const PALETTE_ORANGE: Color32 = Color32::from_rgb(242, 97, 63);

const ROW_HEIGHT: f32 = 22.;
const HEADSHOT_SIZE: f32 = 40.;

/// `PaddockApp` shows the season schedule and a results modal for the race
/// the user clicks on.
///
/// The schedule is requested as soon as the app is created. Everything the
/// app renders comes from its [`ScheduleController`]; the only ways it
/// changes state are loading the schedule, selecting a race and dismissing
/// the modal.
pub struct PaddockApp<R: RaceRepository + 'static> {
    controller: ScheduleController<R>,
    /// Config as stored on disk; only the window geometry changes before it
    /// is saved on exit.
    app_config: AppConfig,
}

impl<R: RaceRepository + 'static> PaddockApp<R> {
    pub fn new(
        repository: Arc<R>,
        runtime: Handle,
        app_config: AppConfig,
        cc: &eframe::CreationContext<'_>,
    ) -> Self {
        let default_visuals = Visuals {
            dark_mode: true,
            hyperlink_color: PALETTE_ORANGE,
            faint_bg_color: PALETTE_BROWN,
            extreme_bg_color: PALETTE_BLACK,
            panel_fill: PALETTE_BLACK,
            window_fill: PALETTE_BLACK,
            selection: egui::style::Selection {
                bg_fill: PALETTE_MAROON,
                ..Default::default()
            },
            button_frame: true,
            widgets: Widgets::dark(),
            striped: true,
            ..Default::default()
        };
        cc.egui_ctx.set_visuals(default_visuals);
        // headshots are plain URLs, loaded through the http loader
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let ctx = cc.egui_ctx.clone();
        let mut controller =
            ScheduleController::new(repository, runtime).with_update_hook(move || ctx.request_repaint());
        controller.load_schedule();

        Self {
            controller,
            app_config,
        }
    }
}

impl<R: RaceRepository + 'static> eframe::App for PaddockApp<R> {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_config.save() {
            error!("Error while saving config file: {}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll();

        let (outer_rect, inner_rect) = ctx.input(|is| (is.viewport().outer_rect, is.viewport().inner_rect));
        if let Some(outer_rect) = outer_rect {
            self.app_config.window_position = outer_rect.min.into();
        }
        if let Some(inner_rect) = inner_rect {
            self.app_config.window_size = [inner_rect.width(), inner_rect.height()];
        }

        self.schedule_view(ctx);
        self.results_modal(ctx);
    }
}
