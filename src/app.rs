/// Main application state and eframe::App implementation
///
/// Ties together the decoded image, the pipeline, the views and the session log.

use std::path::{Path, PathBuf};

use eframe::egui;

use crate::data::raster::{self, InspectError, PixelGrid};
use crate::gui::filter_panel::{self, FilterAction};
use crate::gui::heatmap_view::{self, HeatmapViewState};
use crate::gui::scatter_view::{self, ScatterViewState};
use crate::gui::table_view;
use crate::gui::theme::{self, AppTheme, ThemeColors};
use crate::gui::toolbar::{self, ToolbarAction};
use crate::log::session::SessionLog;
use crate::pipeline::{self, export, PipelineConfig, PipelineOutput};

/// An image that passed decoding, with the latest pipeline result
struct LoadedImage {
    name: String,
    grid: PixelGrid,
    output: PipelineOutput,
    original_texture: Option<egui::TextureHandle>,
}

/// Either nothing is loaded yet, or every view is live.
enum ImageState {
    AwaitingUpload,
    Loaded(Box<LoadedImage>),
}

/// A file dropped onto the window
enum DroppedImage {
    Path(PathBuf),
    Bytes { name: String, bytes: std::sync::Arc<[u8]> },
}

/// The main application
pub struct InspectorApp {
    image: ImageState,
    config: PipelineConfig,
    /// Config as last written to the session log
    logged_config: PipelineConfig,
    /// Bumped on every pipeline run; keys the heat-map texture
    generation: u64,

    session_log: SessionLog,

    heatmap_state: HeatmapViewState,
    scatter_state: ScatterViewState,

    status_message: String,
    error_banner: Option<String>,
    show_log_window: bool,
    show_about: bool,

    current_theme: AppTheme,
    theme_colors: ThemeColors,

    max_upload_bytes: usize,
    dropped_files: Vec<DroppedImage>,
}

impl InspectorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, initial_path: Option<PathBuf>) -> Self {
        let default_theme = AppTheme::Light;
        theme::apply_theme(&cc.egui_ctx, default_theme);

        // ── Typography: scale for monitor DPI ──
        let ppi = cc.egui_ctx.pixels_per_point();
        let base_size = if ppi > 1.5 { 14.0 } else { 13.0 };
        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::new(base_size, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Heading,
            egui::FontId::new(base_size * 1.25, egui::FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Monospace,
            egui::FontId::new(base_size * 0.92, egui::FontFamily::Monospace),
        );
        style.spacing.item_spacing = egui::vec2(8.0, 5.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);
        cc.egui_ctx.set_style(style);

        let mut app = Self {
            image: ImageState::AwaitingUpload,
            config: PipelineConfig::default(),
            logged_config: PipelineConfig::default(),
            generation: 0,
            session_log: SessionLog::new(),
            heatmap_state: HeatmapViewState::default(),
            scatter_state: ScatterViewState::default(),
            status_message: "Ready. Open a PNG or JPEG image to begin".to_string(),
            error_banner: None,
            show_log_window: false,
            show_about: false,
            current_theme: default_theme,
            theme_colors: ThemeColors::from_theme(default_theme),
            max_upload_bytes: raster::DEFAULT_MAX_UPLOAD_BYTES,
            dropped_files: Vec::new(),
        };

        if let Some(path) = initial_path {
            app.open_path(&path);
        }
        app
    }

    fn has_image(&self) -> bool {
        matches!(self.image, ImageState::Loaded(_))
    }

    fn open_path(&mut self, path: &Path) {
        self.status_message = format!("Loading: {}…", path.display());
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        match raster::load_image_file(path, self.max_upload_bytes) {
            Ok(grid) => self.install(name, grid),
            Err(e) => self.report_load_error(&name, e),
        }
    }

    fn open_bytes(&mut self, name: String, bytes: &[u8]) {
        match raster::decode_image(bytes, self.max_upload_bytes) {
            Ok(grid) => self.install(name, grid),
            Err(e) => self.report_load_error(&name, e),
        }
    }

    /// Make `grid` the current image: threshold back to 0, fresh session log.
    fn install(&mut self, name: String, grid: PixelGrid) {
        self.config = self.config.for_new_image();
        self.logged_config = self.config.clone();
        self.heatmap_state.invalidate();
        self.error_banner = None;

        let output = pipeline::run(&grid, &self.config);
        self.generation += 1;

        self.session_log = SessionLog::new();
        self.session_log.set_source(&name);
        self.session_log
            .add_entry("Open", &format!("{} ({})", name, output.dimensions_label()));

        self.status_message = format!("Loaded: {} ({})", name, output.dimensions_label());
        self.image = ImageState::Loaded(Box::new(LoadedImage {
            name,
            grid,
            output,
            original_texture: None,
        }));
    }

    fn report_load_error(&mut self, name: &str, e: InspectError) {
        log::error!("Load error for {}: {}", name, e);
        self.image = ImageState::AwaitingUpload;
        self.heatmap_state.invalidate();
        self.status_message = format!("Error loading {}: {}", name, e);
        self.error_banner = Some(format!("Could not open {}: {}", name, e));
    }

    /// Re-run the pipeline with the current config.
    fn rerun(&mut self) {
        if let ImageState::Loaded(loaded) = &mut self.image {
            loaded.output = pipeline::run(&loaded.grid, &self.config);
            self.generation += 1;
        }
    }

    /// Log the filter settings once the user lets go of the controls.
    fn log_config_if_settled(&mut self, ctx: &egui::Context) {
        if self.config == self.logged_config || ctx.input(|i| i.pointer.any_down()) {
            return;
        }
        self.session_log.add_entry(
            "Filter",
            &format!(
                "threshold {} ({}), 3D {}",
                self.config.threshold,
                self.config.policy,
                if self.config.show_3d { "on" } else { "off" }
            ),
        );
        self.logged_config = self.config.clone();
    }

    fn export_csv(&mut self) {
        let ImageState::Loaded(loaded) = &self.image else {
            self.status_message = "No image loaded to export".to_string();
            return;
        };
        let Some(path) = toolbar::save_csv_dialog() else {
            return;
        };
        match export::save_csv(&loaded.output.table, &path) {
            Ok(rows) => {
                self.status_message = format!("CSV exported: {} ({} rows)", path.display(), rows);
                self.session_log.add_entry(
                    "Export CSV",
                    &format!("{} rows of {} to {}", rows, loaded.name, path.display()),
                );
            }
            Err(e) => {
                log::error!("CSV export failed: {}", e);
                self.status_message = format!("CSV export failed: {}", e);
            }
        }
    }

    fn handle_toolbar_action(&mut self, action: ToolbarAction) {
        match action {
            ToolbarAction::OpenFile => {
                if let Some(path) = toolbar::open_image_dialog() {
                    self.open_path(&path);
                }
            }
            ToolbarAction::CloseImage => {
                self.image = ImageState::AwaitingUpload;
                self.heatmap_state.invalidate();
                self.status_message = "Image closed".to_string();
            }
            ToolbarAction::ExportCsv => self.export_csv(),
            ToolbarAction::ExportLog => {
                if let Some(path) = toolbar::save_log_dialog() {
                    match self.session_log.save(&path) {
                        Ok(_) => self.status_message = format!("Log saved: {}", path.display()),
                        Err(e) => self.status_message = format!("Error saving log: {}", e),
                    }
                }
            }
            ToolbarAction::ThemeToggle => {
                self.current_theme = self.current_theme.next();
                self.theme_colors = ThemeColors::from_theme(self.current_theme);
            }
            ToolbarAction::ShowAbout => self.show_about = true,
            ToolbarAction::None => {}
        }
    }

    fn handle_filter_action(&mut self, action: FilterAction) {
        match action {
            FilterAction::ConfigChanged => self.rerun(),
            FilterAction::ResetThreshold => {
                self.config.threshold = 0;
                self.rerun();
            }
            FilterAction::ExportCsv => self.export_csv(),
            FilterAction::OpenFile => self.handle_toolbar_action(ToolbarAction::OpenFile),
            FilterAction::None => {}
        }
    }

    fn collect_dropped_files(&mut self, ctx: &egui::Context) {
        ctx.input(|i| {
            for file in &i.raw.dropped_files {
                if let Some(path) = &file.path {
                    self.dropped_files.push(DroppedImage::Path(path.clone()));
                } else if let Some(bytes) = &file.bytes {
                    self.dropped_files.push(DroppedImage::Bytes {
                        name: file.name.clone(),
                        bytes: bytes.clone(),
                    });
                }
            }
        });
        // Only one image at a time: the last drop wins.
        if let Some(dropped) = self.dropped_files.pop() {
            self.dropped_files.clear();
            match dropped {
                DroppedImage::Path(path) => self.open_path(&path),
                DroppedImage::Bytes { name, bytes } => self.open_bytes(name, &bytes),
            }
        }
    }
}

impl eframe::App for InspectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        theme::apply_theme(ctx, self.current_theme);
        self.collect_dropped_files(ctx);

        // ── Toolbar ──
        let toolbar_action =
            toolbar::show_toolbar(ctx, self.current_theme.label(), self.has_image());
        if toolbar_action != ToolbarAction::None {
            self.handle_toolbar_action(toolbar_action);
        }

        // ── Status Bar ──
        let tc = self.theme_colors.clone();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::new()
                    .fill(tc.status_bar_bg)
                    .inner_margin(egui::Margin::symmetric(12, 4)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.5)
                            .color(tc.status_text),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.small_button("📋 Log").clicked() {
                            self.show_log_window = !self.show_log_window;
                        }
                        ui.label(
                            egui::RichText::new(format!("{} ops", self.session_log.len()))
                                .size(11.0)
                                .color(tc.text_muted),
                        );
                    });
                });
            });

        // ── Left Panel: filter controls ──
        let dims = match &self.image {
            ImageState::Loaded(loaded) => Some(loaded.output.dimensions_label()),
            ImageState::AwaitingUpload => None,
        };
        let has_image = dims.is_some();
        let op_count = self.session_log.len();
        let mut filter_action = FilterAction::None;
        egui::SidePanel::left("filter_panel")
            .resizable(true)
            .default_width(250.0)
            .min_width(200.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        filter_action = filter_panel::show_filter_panel(
                            ui,
                            &mut self.config,
                            has_image,
                            dims.as_deref(),
                            op_count,
                        );
                    });
            });
        if filter_action != FilterAction::None {
            self.handle_filter_action(filter_action);
        }
        self.log_config_if_settled(ctx);

        // ── Central Panel ──
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(err) = &self.error_banner {
                ui.colored_label(tc.error, format!("⚠ {}", err));
                ui.separator();
            }

            let ImageState::Loaded(loaded) = &mut self.image else {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open an image (PNG, JPEG) to map its red channel intensity");
                });
                return;
            };

            if loaded.original_texture.is_none() {
                let rgb = loaded.grid.as_rgb();
                let image = egui::ColorImage::from_rgb(
                    [loaded.grid.width(), loaded.grid.height()],
                    rgb.as_raw(),
                );
                loaded.original_texture =
                    Some(ctx.load_texture("original_image", image, egui::TextureOptions::LINEAR));
            }

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.heading(format!(
                        "{} — {}",
                        loaded.name,
                        loaded.output.dimensions_label()
                    ));
                    ui.add_space(4.0);

                    let plot_height = 420.0;
                    ui.columns(2, |cols| {
                        if let Some(tex) = &loaded.original_texture {
                            heatmap_view::show_original(&mut cols[0], tex);
                        }
                        heatmap_view::show_heatmap(
                            &mut cols[1],
                            &loaded.output,
                            self.generation,
                            &mut self.heatmap_state,
                            plot_height,
                        );
                    });

                    ui.add_space(8.0);
                    if self.config.show_3d {
                        egui::CollapsingHeader::new("🧊 3D scatter (x, y, R)")
                            .default_open(false)
                            .show(ui, |ui| {
                                scatter_view::show_scatter(
                                    ui,
                                    &loaded.output.scatter,
                                    (loaded.output.width, loaded.output.height),
                                    loaded.output.scatter_range,
                                    self.heatmap_state.colormap,
                                    &mut self.scatter_state,
                                    &tc,
                                );
                            });
                    }

                    egui::CollapsingHeader::new("📋 Pixel table")
                        .default_open(true)
                        .show(ui, |ui| {
                            table_view::show_table_preview(
                                ui,
                                &loaded.output.table,
                                self.config.preview_rows,
                                320.0,
                            );
                        });
                });
        });

        // ── Log Window ──
        if self.show_log_window {
            egui::Window::new("📋 Session Log")
                .open(&mut self.show_log_window)
                .default_size([520.0, 360.0])
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        for entry in &self.session_log.entries {
                            ui.monospace(entry.to_text());
                        }
                    });
                });
        }

        // ── About ──
        if self.show_about {
            egui::Window::new("About")
                .open(&mut self.show_about)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.heading("Red Channel Inspector");
                    ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                    ui.label("Per-pixel red intensity with a bottom-left origin,");
                    ui.label("heat-map, 3D scatter and full CSV export.");
                });
        }
    }
}
