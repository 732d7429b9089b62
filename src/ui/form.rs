use egui::{Button, Color32, Key, Layout, Response, RichText, TextEdit, Ui};

use crate::{client::LapSource, viewer::LapViewer};

const YEAR_FIELD_WIDTH: f32 = 60.;
const RACE_FIELD_WIDTH: f32 = 160.;
const DRIVER_FIELD_WIDTH: f32 = 50.;

fn submitted_with_enter(ui: &Ui, response: &Response) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter))
}

/// Draws the query form. Returns `true` when the user asked for a load,
/// either with the button or by pressing Enter in one of the fields.
pub(super) fn show_form<S: LapSource + ?Sized>(
    ui: &mut Ui,
    viewer: &mut LapViewer<S>,
    show_trend_line: &mut bool,
) -> bool {
    let is_loading = viewer.is_loading();
    let mut submit = false;

    ui.with_layout(Layout::left_to_right(egui::Align::Center), |ui| {
        ui.label(RichText::new("Year: ").color(Color32::WHITE));
        let year = ui.add(
            TextEdit::singleline(&mut viewer.form.year)
                .hint_text("2023")
                .desired_width(YEAR_FIELD_WIDTH),
        );
        submit |= submitted_with_enter(ui, &year);

        ui.separator();
        ui.label(RichText::new("Race: ").color(Color32::WHITE));
        let race = ui.add(
            TextEdit::singleline(&mut viewer.form.race)
                .hint_text("Monza")
                .desired_width(RACE_FIELD_WIDTH),
        );
        submit |= submitted_with_enter(ui, &race);

        ui.separator();
        ui.label(RichText::new("Driver: ").color(Color32::WHITE));
        let driver = ui.add(
            TextEdit::singleline(&mut viewer.form.driver)
                .hint_text("VER")
                .char_limit(8)
                .desired_width(DRIVER_FIELD_WIDTH),
        );
        if driver.changed() {
            viewer.form.driver = viewer.form.driver.to_uppercase();
        }
        submit |= submitted_with_enter(ui, &driver);

        ui.separator();
        if ui
            .add_enabled(!is_loading, Button::new("Load Laps"))
            .clicked()
        {
            submit = true;
        }
        if is_loading {
            ui.spinner();
            ui.label(RichText::new("Loading lap data...").color(Color32::GRAY));
        }

        ui.with_layout(Layout::right_to_left(egui::Align::Center), |ui| {
            ui.checkbox(show_trend_line, "Trend");
        });
    });

    submit && !is_loading
}
