/// Bounded preview of the per-pixel table

use egui_extras::{Column, TableBuilder};

use crate::pipeline::table::PixelTable;

/// Show the first `limit` rows of the table.
pub fn show_table_preview(ui: &mut egui::Ui, table: &PixelTable, limit: usize, height: f32) {
    let rows = table.preview(limit);
    if rows.len() < table.len() {
        ui.label(
            egui::RichText::new(format!(
                "First {} of {} rows (the CSV export contains all rows)",
                rows.len(),
                table.len()
            ))
            .weak(),
        );
    } else {
        ui.label(egui::RichText::new(format!("{} rows", rows.len())).weak());
    }

    let row_height = ui.text_style_height(&egui::TextStyle::Monospace) + 4.0;
    TableBuilder::new(ui)
        .id_salt("pixel_table_preview")
        .striped(true)
        .max_scroll_height(height)
        .column(Column::exact(70.0))
        .column(Column::exact(70.0))
        .column(Column::exact(70.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in ["#", "x", "y", "R"] {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(row_height, rows.len(), |mut row| {
                let i = row.index();
                let rec = rows[i];
                row.col(|ui| {
                    ui.monospace(i.to_string());
                });
                row.col(|ui| {
                    ui.monospace(rec.x.to_string());
                });
                row.col(|ui| {
                    ui.monospace(rec.y.to_string());
                });
                row.col(|ui| {
                    ui.monospace(rec.intensity.to_string());
                });
            });
        });
}
