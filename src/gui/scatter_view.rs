/// 3D scatter of (x, y, R) drawn with an orbit camera and orthographic projection

use glam::{Mat3, Vec3};

use crate::gui::colormap::Colormap;
use crate::pipeline::heatmap::normalize_in;
use crate::pipeline::sampler::SampleSet;
use crate::pipeline::ScatterOutcome;

/// Orbit camera and drawing options for the 3D view
#[derive(Debug, Clone)]
pub struct ScatterViewState {
    /// Rotation around the vertical (intensity) axis, radians
    pub azimuth: f32,
    /// Tilt above the x-y plane, radians
    pub elevation: f32,
    pub zoom: f32,
    pub point_radius: f32,
    pub height: f32,
}

impl Default for ScatterViewState {
    fn default() -> Self {
        Self {
            azimuth: -35f32.to_radians(),
            elevation: 25f32.to_radians(),
            zoom: 1.0,
            point_radius: 1.5,
            height: 420.0,
        }
    }
}

impl ScatterViewState {
    fn rotation(&self) -> Mat3 {
        Mat3::from_rotation_x(self.elevation) * Mat3::from_rotation_z(-self.azimuth)
    }

    /// Project a point of the unit cube (centred on the origin) to a screen
    /// offset (right, up) and a depth (larger = farther away).
    pub fn project(&self, p: Vec3) -> (egui::Vec2, f32) {
        let v = self.rotation() * p;
        (egui::vec2(v.x, v.z), v.y)
    }

    fn reset(&mut self) {
        let height = self.height;
        *self = Self {
            height,
            ..Self::default()
        };
    }
}

/// Map a record into the unit cube centred on the origin.
fn to_cube(x: u32, y: u32, intensity: u8, width: usize, height: usize) -> Vec3 {
    let span = |v: f32, n: usize| {
        if n > 1 {
            v / (n - 1) as f32 - 0.5
        } else {
            0.0
        }
    };
    Vec3::new(
        span(x as f32, width),
        span(y as f32, height),
        intensity as f32 / 255.0 - 0.5,
    )
}

/// Show the 3D view for the current scatter outcome.
pub fn show_scatter(
    ui: &mut egui::Ui,
    outcome: &ScatterOutcome,
    dims: (usize, usize),
    color_range: (u8, u8),
    cmap: Colormap,
    state: &mut ScatterViewState,
    colors: &super::theme::ThemeColors,
) {
    let set = match outcome {
        ScatterOutcome::Hidden => return,
        ScatterOutcome::Empty => {
            ui.label(
                egui::RichText::new("⚠ No pixels at or above the threshold, nothing to show in 3D.")
                    .color(colors.warning),
            );
            return;
        }
        ScatterOutcome::Points(set) => set,
    };

    ui.horizontal(|ui| {
        ui.add(egui::Slider::new(&mut state.point_radius, 0.5..=4.0).text("Point size"));
        ui.separator();
        ui.add(egui::Slider::new(&mut state.zoom, 0.3..=3.0).text("Zoom"));
        ui.separator();
        if ui.button("🔄 Reset view").clicked() {
            state.reset();
        }
    });
    match set.disclosure() {
        Some(text) => ui.label(egui::RichText::new(text).italics().color(colors.text_muted)),
        None => ui.label(
            egui::RichText::new(format!("{} points", set.len())).color(colors.text_muted),
        ),
    };

    let size = egui::vec2(ui.available_width(), state.height);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::drag());
    if response.dragged() {
        let d = response.drag_delta();
        state.azimuth += d.x * 0.01;
        state.elevation = (state.elevation + d.y * 0.01).clamp(-1.5, 1.5);
    }
    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            state.zoom = (state.zoom * (1.0 + scroll * 0.002)).clamp(0.3, 3.0);
        }
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, colors.scatter_bg);

    let scale = rect.width().min(rect.height()) * 0.55 * state.zoom;
    let center = rect.center();
    let to_screen = |offset: egui::Vec2| center + egui::vec2(offset.x, -offset.y) * scale;

    draw_axes(&painter, state, &to_screen, colors);

    let mut projected = project_points(set, dims, state);
    // Far points first
    projected.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (offset, _, intensity) in projected {
        let color = cmap.color_at(normalize_in(intensity, color_range));
        painter.circle_filled(to_screen(offset), state.point_radius, color);
    }
}

fn project_points(
    set: &SampleSet,
    (width, height): (usize, usize),
    state: &ScatterViewState,
) -> Vec<(egui::Vec2, f32, u8)> {
    set.records
        .iter()
        .map(|r| {
            let (offset, depth) = state.project(to_cube(r.x, r.y, r.intensity, width, height));
            (offset, depth, r.intensity)
        })
        .collect()
}

/// Bounding-box edges from the origin corner along x, y and R, with labels.
fn draw_axes(
    painter: &egui::Painter,
    state: &ScatterViewState,
    to_screen: &dyn Fn(egui::Vec2) -> egui::Pos2,
    colors: &super::theme::ThemeColors,
) {
    let origin = Vec3::splat(-0.5);
    let stroke = egui::Stroke::new(1.0, colors.scatter_axis);
    let axes = [
        (Vec3::new(0.5, -0.5, -0.5), "x"),
        (Vec3::new(-0.5, 0.5, -0.5), "y"),
        (Vec3::new(-0.5, -0.5, 0.5), "R"),
    ];
    let o = to_screen(state.project(origin).0);
    for (end, label) in axes {
        let e = to_screen(state.project(end).0);
        painter.line_segment([o, e], stroke);
        painter.text(
            e,
            egui::Align2::LEFT_BOTTOM,
            label,
            egui::FontId::proportional(13.0),
            colors.scatter_axis,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_front_view_projection() {
        let state = ScatterViewState {
            azimuth: 0.0,
            elevation: 0.0,
            ..Default::default()
        };
        let (offset, depth) = state.project(Vec3::new(0.5, 0.0, 0.0));
        assert!(approx(offset.x, 0.5) && approx(offset.y, 0.0) && approx(depth, 0.0));
        let (offset, depth) = state.project(Vec3::new(0.0, 0.5, 0.25));
        assert!(approx(offset.y, 0.25) && approx(depth, 0.5));
    }

    #[test]
    fn test_top_view_shows_y_upward() {
        let state = ScatterViewState {
            azimuth: 0.0,
            elevation: std::f32::consts::FRAC_PI_2,
            ..Default::default()
        };
        let (offset, _) = state.project(Vec3::new(0.0, 0.5, 0.0));
        assert!(approx(offset.y, 0.5));
    }

    #[test]
    fn test_to_cube_bounds() {
        let p = to_cube(0, 0, 0, 10, 20);
        assert_eq!(p, Vec3::splat(-0.5));
        let q = to_cube(9, 19, 255, 10, 20);
        assert!(approx(q.x, 0.5) && approx(q.y, 0.5) && approx(q.z, 0.5));
        assert_eq!(to_cube(0, 0, 0, 1, 1).x, 0.0);
    }
}
