/// Toolbar: top menu bar with file operations and quick actions

use std::path::PathBuf;

use crate::data::raster::SUPPORTED_EXTENSIONS;
use crate::pipeline::export::SUGGESTED_FILE_NAME;

/// Actions that can be triggered from the toolbar
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    None,
    OpenFile,
    CloseImage,
    ExportCsv,
    ExportLog,
    ThemeToggle,
    ShowAbout,
}

/// Render the toolbar and return any triggered action
pub fn show_toolbar(ctx: &egui::Context, theme_label: &str, has_image: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("📁 File", |ui| {
                if ui.button("📂 Open Image…").clicked() {
                    action = ToolbarAction::OpenFile;
                    ui.close_menu();
                }
                if ui
                    .add_enabled(has_image, egui::Button::new("✖ Close Image"))
                    .clicked()
                {
                    action = ToolbarAction::CloseImage;
                    ui.close_menu();
                }
                ui.separator();
                if ui
                    .add_enabled(has_image, egui::Button::new("📥 Export CSV…"))
                    .clicked()
                {
                    action = ToolbarAction::ExportCsv;
                    ui.close_menu();
                }
                if ui.button("📋 Export Log…").clicked() {
                    action = ToolbarAction::ExportLog;
                    ui.close_menu();
                }
            });

            ui.menu_button("🔍 View", |ui| {
                if ui.button(format!("🎨 Theme: {}", theme_label)).clicked() {
                    action = ToolbarAction::ThemeToggle;
                    ui.close_menu();
                }
            });

            ui.menu_button("❓ Help", |ui| {
                if ui.button("ℹ About").clicked() {
                    action = ToolbarAction::ShowAbout;
                    ui.close_menu();
                }
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add(egui::Button::new(egui::RichText::new(theme_label).size(12.0)).corner_radius(12.0))
                    .clicked()
                {
                    action = ToolbarAction::ThemeToggle;
                }
                ui.separator();
                ui.label(
                    egui::RichText::new("Red Channel Inspector")
                        .color(egui::Color32::from_rgb(0x70, 0x75, 0x80))
                        .size(12.0),
                );
            });
        });
    });

    action
}

/// Show file-open dialog for raster images
pub fn open_image_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open Image")
        .add_filter("Images", SUPPORTED_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .pick_file()
}

/// Show save dialog for the full CSV export
pub fn save_csv_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Download Full Red Intensity CSV")
        .set_file_name(SUGGESTED_FILE_NAME)
        .add_filter("CSV (comma-separated)", &["csv"])
        .save_file()
}

/// Show save dialog for log export
pub fn save_log_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Export Session Log")
        .add_filter("Text File", &["txt"])
        .add_filter("JSON", &["json"])
        .save_file()
}
