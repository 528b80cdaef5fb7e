// src/gui/components/summary.rs

use eframe::egui::{self, Color32};

use crate::{
    data::DataSet,
    diff::{Alignment, Comparison, Direction},
    viewer::Session,
};

use super::data_table;

const DIRECTION_COL: usize = 4;

pub fn draw(ui: &mut egui::Ui, session: &Session, view: Option<&DataSet>, numeric: &[bool]) {
    ui.strong("Snapshot comparison");

    let (Comparison::Available(summary), Some(view)) = (&session.comparison, view) else {
        ui.label(session.comparison.message());
        return;
    };

    let aligned = match &summary.alignment {
        Alignment::Key(k) => format!("matched by `{k}`"),
        Alignment::Position => s!("matched by row position"),
    };
    ui.label(format!("Column `{}`, {} ({} rows)", summary.value_column, aligned, summary.rows.len()));

    let avail = ui.available_height();
    data_table::draw(ui, "summary_table", view, numeric, avail, |ci, cell| {
        if ci != DIRECTION_COL { return None; }
        match cell {
            c if c == Direction::Up.as_str() => Some(Color32::from_rgb(0x3C, 0xB3, 0x71)),
            c if c == Direction::Down.as_str() => Some(Color32::from_rgb(0xDC, 0x61, 0x49)),
            _ => None,
        }
    });
}
