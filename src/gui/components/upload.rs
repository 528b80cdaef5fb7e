// src/gui/components/upload.rs
//
// Shown only when no data file exists: pick a CSV by path or drop one in.

use eframe::egui;

use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.label("Upload CSV");
    ui.horizontal(|ui| {
        ui.label("Path:");
        let edit = ui.add(
            egui::TextEdit::singleline(&mut app.upload_path_text)
                .hint_text("path/to/file.csv")
                .font(egui::TextStyle::Monospace),
        );
        let submitted = edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Load").clicked() || submitted {
            app.load_upload_path();
        }
        if ui.button("Retry data file").clicked() {
            app.reload();
        }
    });
    ui.weak("…or drop a .csv file onto this window.");
}

/// Dropped file → upload. Native builds give a path, web builds give bytes.
pub fn accept_drop(app: &mut App, file: egui::DroppedFile) {
    if let Some(bytes) = &file.bytes {
        app.load_upload(&file.name, bytes);
    } else if let Some(path) = &file.path {
        app.upload_path_text = path.to_string_lossy().into_owned();
        app.load_upload_path();
    }
}
