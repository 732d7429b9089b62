mod chart;
mod form;
mod stats_view;

use std::time::Duration;

use egui::{Color32, Frame, Margin, RichText, Visuals, style::Widgets};
use log::error;

use crate::{client::LapSource, config::AppConfig, viewer::LapViewer};

const LOADING_REPAINT_MS: u64 = 100;

pub(crate) const PALETTE_BLACK: Color32 = Color32::from_rgb(12, 12, 12);
pub(crate) const PALETTE_BROWN: Color32 = Color32::from_rgb(72, 30, 20);
pub(crate) const PALETTE_MAROON: Color32 = Color32::from_rgb(155, 57, 34);
pub(crate) const PALETTE_ORANGE: Color32 = Color32::from_rgb(242, 97, 63);
pub(crate) const PALETTE_GREEN: Color32 = Color32::from_rgb(87, 187, 104);

const DEFAULT_CORNER_RADIUS: u8 = 6;

/// `LapchartApp` is the desktop window around a [`LapViewer`]: the query form,
/// the error banner, four stat cards and the lap time chart.
pub struct LapchartApp<S: LapSource + ?Sized> {
    viewer: LapViewer<S>,
    app_config: AppConfig,
}

impl<S: LapSource + ?Sized> LapchartApp<S> {
    pub fn new(viewer: LapViewer<S>, app_config: AppConfig, cc: &eframe::CreationContext<'_>) -> Self {
        let default_visuals = Visuals {
            dark_mode: true,
            hyperlink_color: PALETTE_MAROON,
            faint_bg_color: PALETTE_BLACK,
            extreme_bg_color: PALETTE_BROWN,
            panel_fill: PALETTE_BLACK,
            button_frame: true,
            widgets: Widgets::dark(),
            striped: false,
            ..Default::default()
        };
        cc.egui_ctx.set_visuals(default_visuals);

        Self { viewer, app_config }
    }
}

impl<S: LapSource + ?Sized> eframe::App for LapchartApp<S> {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.app_config.last_year = self.viewer.form.year.trim().to_string();
        self.app_config.last_race = self.viewer.form.race.trim().to_string();
        self.app_config.last_driver = self.viewer.form.driver.trim().to_string();

        if let Err(e) = self.app_config.save() {
            error!("Error while saving config file: {}", e);
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.viewer.poll();

        egui::TopBottomPanel::top("lap_query")
            .frame(
                Frame::new()
                    .fill(PALETTE_BLACK)
                    .inner_margin(Margin::same(8)),
            )
            .show(ctx, |ui| {
                if form::show_form(ui, &mut self.viewer, &mut self.app_config.show_trend_line) {
                    self.viewer.submit();
                }
                if let Some(message) = self.viewer.error_message() {
                    ui.add_space(6.);
                    ui.label(RichText::new(message).color(Color32::RED).strong());
                }
                ui.add_space(6.);
                stats_view::show_stats(ui, self.viewer.stats());
            });

        egui::CentralPanel::default()
            .frame(
                Frame::new()
                    .fill(PALETTE_BLACK)
                    .inner_margin(Margin::same(8)),
            )
            .show(ctx, |ui| match self.viewer.visible_chart() {
                Some(lap_chart) => {
                    chart::show_lap_chart(ui, lap_chart, self.app_config.show_trend_line)
                }
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new("No laps loaded").color(Color32::GRAY));
                    });
                }
            });

        if self.viewer.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(LOADING_REPAINT_MS));
        }
    }
}

/// Linear blend between two colors, `t` in `[0, 1]`.
pub(crate) fn stroke_shade(start: Color32, end: Color32, t: f32) -> Color32 {
    let t = if t.is_finite() { t.clamp(0., 1.) } else { 0. };
    let channel = |from: u8, to: u8| (from as f32 + t * (to as f32 - from as f32)).round() as u8;
    Color32::from_rgb(
        channel(start.r(), end.r()),
        channel(start.g(), end.g()),
        channel(start.b(), end.b()),
    )
}
