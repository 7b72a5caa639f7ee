/// Theme system: switchable Light / Dark color themes

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub enum AppTheme {
    #[default]
    Light,
    Dark,
}

impl AppTheme {
    pub fn label(&self) -> &'static str {
        match self {
            AppTheme::Light => "☀ Light",
            AppTheme::Dark => "🌙 Dark",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            AppTheme::Light => AppTheme::Dark,
            AppTheme::Dark => AppTheme::Light,
        }
    }
}

/// Colors the panels and views draw with
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub panel_fill: egui::Color32,
    pub window_fill: egui::Color32,
    pub faint_bg: egui::Color32,

    pub widget_bg: egui::Color32,
    pub widget_bg_stroke: egui::Color32,
    pub widget_hovered_stroke: egui::Color32,
    pub widget_active_bg: egui::Color32,

    pub selection_bg: egui::Color32,
    pub selection_stroke: egui::Color32,

    pub text_primary: egui::Color32,
    pub text_muted: egui::Color32,

    pub accent: egui::Color32,
    pub warning: egui::Color32,
    pub error: egui::Color32,

    // 3D view
    pub scatter_bg: egui::Color32,
    pub scatter_axis: egui::Color32,

    pub status_bar_bg: egui::Color32,
    pub status_text: egui::Color32,

    pub is_dark: bool,
}

impl ThemeColors {
    pub fn from_theme(theme: AppTheme) -> Self {
        match theme {
            AppTheme::Light => Self::light(),
            AppTheme::Dark => Self::dark(),
        }
    }

    fn light() -> Self {
        Self {
            panel_fill: egui::Color32::from_rgb(0xF7, 0xF7, 0xF8),
            window_fill: egui::Color32::from_rgb(0xFF, 0xFF, 0xFF),
            faint_bg: egui::Color32::from_rgb(0xF0, 0xF1, 0xF3),

            widget_bg: egui::Color32::from_rgb(0xEB, 0xEC, 0xEE),
            widget_bg_stroke: egui::Color32::from_rgb(0xD0, 0xD2, 0xD6),
            widget_hovered_stroke: egui::Color32::from_rgb(0xC0, 0x4A, 0x3B),
            widget_active_bg: egui::Color32::from_rgb(0xB0, 0x30, 0x28),

            selection_bg: egui::Color32::from_rgba_premultiplied(0xB0, 0x30, 0x28, 0x40),
            selection_stroke: egui::Color32::from_rgb(0xB0, 0x30, 0x28),

            text_primary: egui::Color32::from_rgb(0x2A, 0x2E, 0x36),
            text_muted: egui::Color32::from_rgb(0x88, 0x8C, 0x94),

            accent: egui::Color32::from_rgb(0xB0, 0x30, 0x28),
            warning: egui::Color32::from_rgb(0xB8, 0x8B, 0x00),
            error: egui::Color32::from_rgb(0xD0, 0x30, 0x30),

            scatter_bg: egui::Color32::from_rgb(0xFC, 0xFC, 0xFD),
            scatter_axis: egui::Color32::from_rgb(0x70, 0x75, 0x80),

            status_bar_bg: egui::Color32::from_rgb(0xF0, 0xF1, 0xF3),
            status_text: egui::Color32::from_rgb(0x44, 0x48, 0x52),

            is_dark: false,
        }
    }

    fn dark() -> Self {
        Self {
            panel_fill: egui::Color32::from_rgb(0x1B, 0x1C, 0x20),
            window_fill: egui::Color32::from_rgb(0x22, 0x23, 0x28),
            faint_bg: egui::Color32::from_rgb(0x26, 0x27, 0x2C),

            widget_bg: egui::Color32::from_rgb(0x2C, 0x2D, 0x33),
            widget_bg_stroke: egui::Color32::from_rgb(0x44, 0x46, 0x4E),
            widget_hovered_stroke: egui::Color32::from_rgb(0xFF, 0x6B, 0x5B),
            widget_active_bg: egui::Color32::from_rgb(0xE0, 0x4A, 0x3A),

            selection_bg: egui::Color32::from_rgba_premultiplied(0xE0, 0x4A, 0x3A, 0x40),
            selection_stroke: egui::Color32::from_rgb(0xE0, 0x4A, 0x3A),

            text_primary: egui::Color32::from_rgb(0xE0, 0xE0, 0xE6),
            text_muted: egui::Color32::from_rgb(0x80, 0x82, 0x8C),

            accent: egui::Color32::from_rgb(0xFF, 0x6B, 0x5B),
            warning: egui::Color32::from_rgb(0xF0, 0xC0, 0x30),
            error: egui::Color32::from_rgb(0xFF, 0x44, 0x55),

            scatter_bg: egui::Color32::from_rgb(0x14, 0x15, 0x18),
            scatter_axis: egui::Color32::from_rgb(0xA0, 0xA2, 0xAC),

            status_bar_bg: egui::Color32::from_rgb(0x16, 0x17, 0x1A),
            status_text: egui::Color32::from_rgb(0xB0, 0xB2, 0xBA),

            is_dark: true,
        }
    }
}

/// Apply a theme to the egui context
pub fn apply_theme(ctx: &egui::Context, theme: AppTheme) {
    let c = ThemeColors::from_theme(theme);

    let mut visuals = if c.is_dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    };

    visuals.panel_fill = c.panel_fill;
    visuals.window_fill = c.window_fill;
    visuals.faint_bg_color = c.faint_bg;
    visuals.override_text_color = Some(c.text_primary);
    visuals.hyperlink_color = c.accent;

    visuals.widgets.noninteractive.bg_fill = c.widget_bg;
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(0.5, c.widget_bg_stroke);
    visuals.widgets.noninteractive.corner_radius = egui::CornerRadius::same(3);

    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, c.widget_hovered_stroke);
    visuals.widgets.active.bg_fill = c.widget_active_bg;

    visuals.selection.bg_fill = c.selection_bg;
    visuals.selection.stroke = egui::Stroke::new(1.5, c.selection_stroke);

    ctx.set_visuals(visuals);
}
