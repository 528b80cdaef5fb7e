// src/gui/components/data_table.rs
//
// Draws any DataSet as a striped, resizable table. Purely a view.

use eframe::egui::{self, Align, Color32, Layout, RichText, TextWrapMode};
use egui_extras::{Column, TableBuilder};

use crate::data::DataSet;

/// `numeric[col]` centers that column (see `DataSet::numeric_columns`).
/// `paint(col, cell)` may return a text color for that cell.
pub fn draw<F>(
    ui: &mut egui::Ui,
    id: &str,
    table: &DataSet,
    numeric: &[bool],
    max_height: f32,
    paint: F,
) where
    F: Fn(usize, &str) -> Option<Color32>,
{
    let cols = table.header_count();
    if cols == 0 {
        ui.label("(empty table)");
        return;
    }

    // Scroll bars take space instead of floating over the last rows
    {
        let s = &mut ui.style_mut().spacing.scroll;
        s.floating = false;
        s.bar_width = 10.0;
        s.handle_min_length = 48.0;
    }

    let mut builder = TableBuilder::new(ui)
        .id_salt(id)
        .striped(true)
        .min_scrolled_height(0.0)
        .max_scroll_height(max_height);
    for ci in 0..cols {
        let w = if ci == 0 { 160.0 } else { 110.0 };
        builder = builder.column(Column::initial(w).resizable(true).clip(true).at_least(20.0));
    }

    builder
        .header(24.0, |mut header| {
            for h in &table.headers {
                header.col(|ui| {
                    ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                    ui.add(egui::Label::new(RichText::new(h).strong()).selectable(false));
                });
            }
        })
        .body(|body| {
            body.rows(20.0, table.row_count(), |mut row| {
                let Some(data) = table.rows.get(row.index()) else { return };
                for ci in 0..cols {
                    let cell = data.get(ci).map(String::as_str).unwrap_or("");
                    row.col(|ui| {
                        ui.style_mut().wrap_mode = Some(TextWrapMode::Extend);
                        let mut rt = RichText::new(cell);
                        if let Some(c) = paint(ci, cell) {
                            rt = rt.color(c);
                        }
                        if numeric.get(ci).copied().unwrap_or(false) {
                            ui.centered_and_justified(|ui| { ui.label(rt); });
                        } else {
                            ui.with_layout(Layout::left_to_right(Align::Center), |ui| { ui.label(rt); });
                        }
                    });
                }
            });
        });
}
