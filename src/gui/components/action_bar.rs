// src/gui/components/action_bar.rs

use eframe::egui;

use crate::gui::app::App;

pub const CLOSE_LABEL: &str = "Close (Press Enter)";

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        let has_data = app.session.is_some();

        ui.label("Save to:");
        ui.add_enabled(
            has_data,
            egui::TextEdit::singleline(&mut app.download_path_text)
                .desired_width(360.0)
                .font(egui::TextStyle::Monospace),
        );
        if ui.add_enabled(has_data, egui::Button::new("Download CSV")).clicked() {
            app.download();
        }

        ui.separator();

        if ui.button(CLOSE_LABEL).clicked() {
            app.request_close();
        }
    });
    ui.add_space(4.0);
}
