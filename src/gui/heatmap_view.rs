/// 2D red-intensity heat-map with colorbar legend and hover readout

use egui_plot::{Plot, PlotImage, PlotPoint, PlotUi};

use crate::gui::colormap::{self, Colormap};
use crate::pipeline::{coords, PipelineOutput};

/// State for the heat-map viewer
#[derive(Default)]
pub struct HeatmapViewState {
    pub colormap: Colormap,
    texture: Option<egui::TextureHandle>,
    /// Pipeline generation and colormap the texture was built from
    texture_key: Option<(u64, Colormap)>,
    /// Pixel under the cursor: (x, y, R)
    pub hover: Option<(usize, usize, u8)>,
}

impl HeatmapViewState {
    /// Drop the cached texture, e.g. when a new image is opened.
    pub fn invalidate(&mut self) {
        self.texture = None;
        self.texture_key = None;
        self.hover = None;
    }

    fn texture(
        &mut self,
        ctx: &egui::Context,
        output: &PipelineOutput,
        generation: u64,
    ) -> egui::TextureHandle {
        let key = (generation, self.colormap);
        match &self.texture {
            Some(tex) if self.texture_key == Some(key) => tex.clone(),
            _ => {
                let image = colormap::heatmap_image(&output.heatmap, self.colormap);
                let tex = ctx.load_texture("red_heatmap", image, egui::TextureOptions::NEAREST);
                self.texture = Some(tex.clone());
                self.texture_key = Some(key);
                tex
            }
        }
    }
}

/// Show the heat-map plot plus a colorbar on its right.
pub fn show_heatmap(
    ui: &mut egui::Ui,
    output: &PipelineOutput,
    generation: u64,
    state: &mut HeatmapViewState,
    plot_height: f32,
) {
    let tex = state.texture(ui.ctx(), output, generation);
    let (w, h) = (output.width as f64, output.height as f64);
    let range = output.heatmap.range;
    let masked = output.heatmap.masked_count();

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Red channel").strong());
        ui.separator();
        egui::ComboBox::from_id_salt("heatmap_colormap")
            .selected_text(state.colormap.label())
            .show_ui(ui, |ui| {
                for cm in Colormap::ALL {
                    ui.selectable_value(&mut state.colormap, cm, cm.label());
                }
            });
        if masked > 0 {
            ui.separator();
            ui.label(format!("{} px below {} masked", masked, range.0));
        }
    });

    let plot_width = (ui.available_width() - 70.0).max(200.0);

    ui.horizontal(|ui| {
        let hover = ui
            .allocate_ui(egui::vec2(plot_width, plot_height), |ui| {
                Plot::new("red_heatmap_plot")
                    .height(plot_height)
                    .width(plot_width)
                    .data_aspect(1.0)
                    .include_x(0.0)
                    .include_x(w)
                    .include_y(0.0)
                    .include_y(h)
                    .x_axis_label("x [px]")
                    .y_axis_label("y [px] (origin bottom)")
                    .allow_scroll(false)
                    .show(ui, |plot_ui: &mut PlotUi| {
                        plot_ui.image(PlotImage::new(
                            &tex,
                            PlotPoint::new(w / 2.0, h / 2.0),
                            [w as f32, h as f32],
                        ));
                        plot_ui
                            .pointer_coordinate()
                            .and_then(|p| pixel_at(output, p.x, p.y))
                    })
                    .inner
            })
            .inner;
        state.hover = hover;

        show_colorbar(ui, state.colormap, range, plot_height);
    });

    match state.hover {
        Some((x, y, r)) => ui.label(format!("x = {x}, y = {y}, R = {r}")),
        None => ui.label(
            egui::RichText::new("Hover the map to read pixel values").weak(),
        ),
    };
}

/// Pixel under plot coordinate (px, py), with its unmasked intensity.
fn pixel_at(output: &PipelineOutput, px: f64, py: f64) -> Option<(usize, usize, u8)> {
    if px < 0.0 || py < 0.0 {
        return None;
    }
    let (x, y) = (px.floor() as usize, py.floor() as usize);
    if x >= output.width || y >= output.height {
        return None;
    }
    let (row, col) = coords::to_grid(x, y, output.height);
    Some((x, y, output.plane.get(row, col)))
}

/// Vertical gradient legend for the active value range.
fn show_colorbar(ui: &mut egui::Ui, cmap: Colormap, (lo, hi): (u8, u8), height: f32) {
    ui.vertical(|ui| {
        ui.label(egui::RichText::new(format!("{hi}")).size(10.0));
        let bar_height = (height - 60.0).max(80.0);
        let (rect, _) =
            ui.allocate_exact_size(egui::vec2(18.0, bar_height), egui::Sense::hover());
        let painter = ui.painter();
        let steps = 64;
        let step_h = rect.height() / steps as f32;
        for i in 0..steps {
            // max at the top
            let t = 1.0 - i as f32 / (steps - 1) as f32;
            let y0 = rect.top() + i as f32 * step_h;
            painter.rect_filled(
                egui::Rect::from_min_size(
                    egui::pos2(rect.left(), y0),
                    egui::vec2(rect.width(), step_h + 1.0),
                ),
                0.0,
                cmap.color_at(t),
            );
        }
        painter.rect_stroke(
            rect,
            0.0,
            egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
            egui::StrokeKind::Inside,
        );
        ui.label(egui::RichText::new(format!("{lo}")).size(10.0));
        if lo > 0 {
            ui.horizontal(|ui| {
                let (sw, _) =
                    ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                ui.painter().rect_filled(sw, 0.0, cmap.masked_color());
                ui.painter().rect_stroke(
                    sw,
                    0.0,
                    egui::Stroke::new(1.0, egui::Color32::GRAY),
                    egui::StrokeKind::Inside,
                );
                ui.label(egui::RichText::new(format!("< {lo}")).size(10.0));
            });
        }
        ui.label(egui::RichText::new("R").size(10.0).weak());
    });
}

/// Show the source image scaled to the available width.
pub fn show_original(ui: &mut egui::Ui, texture: &egui::TextureHandle) {
    ui.label(egui::RichText::new("Original image").strong());
    ui.add(
        egui::Image::from_texture(egui::load::SizedTexture::from_handle(texture))
            .max_width(ui.available_width())
            .maintain_aspect_ratio(true)
            .shrink_to_fit(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::raster::tests::grid_from_red;
    use crate::pipeline::{run, PipelineConfig};

    #[test]
    fn test_pixel_at_reads_bottom_left_coordinates() {
        let output = run(&grid_from_red(2, 2, &[10, 20, 30, 40]), &PipelineConfig::default());
        assert_eq!(pixel_at(&output, 0.2, 0.7), Some((0, 0, 30)));
        assert_eq!(pixel_at(&output, 1.5, 1.5), Some((1, 1, 20)));
        assert_eq!(pixel_at(&output, 2.0, 0.5), None);
        assert_eq!(pixel_at(&output, -0.1, 0.5), None);
    }
}
