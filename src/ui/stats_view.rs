use egui::{Color32, CornerRadius, Frame, Layout, Margin, RichText, Ui};

use crate::laps::{LapStats, format_lap_time};

use super::{DEFAULT_CORNER_RADIUS, PALETTE_BROWN};

const STAT_CARD_WIDTH: f32 = 140.;

fn stat_card(ui: &mut Ui, title: &str, seconds: f64) {
    Frame::new()
        .fill(PALETTE_BROWN)
        .corner_radius(CornerRadius::same(DEFAULT_CORNER_RADIUS))
        .inner_margin(Margin::same(8))
        .show(ui, |ui| {
            ui.set_min_width(STAT_CARD_WIDTH);
            ui.vertical(|ui| {
                ui.label(RichText::new(title).color(Color32::LIGHT_GRAY).small());
                ui.label(
                    RichText::new(format_lap_time(seconds))
                        .color(Color32::WHITE)
                        .heading()
                        .strong(),
                );
            });
        });
}

/// Four stat cards, or nothing when there are no stats.
pub(super) fn show_stats(ui: &mut Ui, stats: Option<&LapStats>) {
    let Some(stats) = stats else {
        return;
    };

    ui.with_layout(Layout::left_to_right(egui::Align::Center), |ui| {
        stat_card(ui, "Fastest Lap", stats.fastest);
        stat_card(ui, "Slowest Lap", stats.slowest);
        stat_card(ui, "Average Lap", stats.average);
        stat_card(ui, "Median Lap", stats.median);
    });
}
