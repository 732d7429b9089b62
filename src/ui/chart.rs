use std::sync::Arc;

use egui::{Color32, RichText, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoints, Points};

use crate::{
    laps::{TREND_WINDOW_LAPS, format_lap_time},
    viewer::LapChart,
};

use super::{PALETTE_GREEN, PALETTE_ORANGE, stroke_shade};

const LAP_TIME_SERIES: &str = "Lap Time (seconds)";
const LINE_WIDTH: f32 = 3.;
const POINT_RADIUS: f32 = 4.;

pub(super) fn show_lap_chart(ui: &mut Ui, lap_chart: &LapChart, show_trend_line: bool) {
    ui.label(RichText::new(&lap_chart.title).color(Color32::WHITE).strong());
    ui.add_space(4.);

    // shade each lap by how close it is to the slowest one
    let (fastest, slowest) = lap_chart
        .series
        .times
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
            (lo.min(*t), hi.max(*t))
        });
    let spread = (slowest - fastest).max(f64::EPSILON);

    Plot::new("lap_times")
        .legend(Legend::default())
        .show_background(false)
        .x_axis_label("Lap Number")
        .y_axis_label(LAP_TIME_SERIES)
        .y_axis_formatter(|mark, _range| format_lap_time(mark.value))
        .label_formatter(|_name, value| {
            format!("Lap {}: {}", value.x.round() as i64, format_lap_time(value.y))
        })
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(LAP_TIME_SERIES, PlotPoints::new(lap_chart.points.clone()))
                    .gradient_color(
                        Arc::new(move |point| {
                            stroke_shade(
                                PALETTE_GREEN,
                                PALETTE_ORANGE,
                                ((point.y - fastest) / spread) as f32,
                            )
                        }),
                        false,
                    )
                    .color(PALETTE_ORANGE)
                    .width(LINE_WIDTH),
            );
            plot_ui.points(
                Points::new("Laps", PlotPoints::new(lap_chart.points.clone()))
                    .color(Color32::WHITE)
                    .radius(POINT_RADIUS),
            );
            if show_trend_line {
                plot_ui.line(
                    Line::new(
                        format!("{TREND_WINDOW_LAPS}-lap average"),
                        PlotPoints::new(lap_chart.trend.clone()),
                    )
                    .color(Color32::LIGHT_GRAY),
                );
            }
        });
}
