/// Value-to-color gradients shared by the heat-map and the 3D view.

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::pipeline::heatmap::HeatmapFrame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Colormap {
    /// 0 black, 255 white
    #[default]
    Grayscale,
    Reds,
    Viridis,
    Inferno,
}

impl Colormap {
    pub const ALL: [Colormap; 4] = [
        Colormap::Grayscale,
        Colormap::Reds,
        Colormap::Viridis,
        Colormap::Inferno,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Grayscale => "Grayscale",
            Self::Reds => "Reds",
            Self::Viridis => "Viridis",
            Self::Inferno => "Inferno",
        }
    }

    /// Background drawn for pixels hidden by the mask policy. Never produced
    /// by `color_at` for the same colormap.
    pub fn masked_color(&self) -> Color32 {
        match self {
            // The gray ramp already ends in white
            Self::Grayscale => Color32::from_rgb(0xA8, 0xC8, 0xF0),
            Self::Reds | Self::Viridis | Self::Inferno => Color32::WHITE,
        }
    }

    /// Color for a normalized value in [0, 1].
    pub fn color_at(&self, t: f32) -> Color32 {
        let v = t.clamp(0.0, 1.0);
        let [r, g, b] = match self {
            Self::Grayscale => {
                let g = (v * 255.0).round() as u8;
                [g, g, g]
            }
            Self::Reds => [
                to_u8(0.2 + 0.8 * v.sqrt()),
                to_u8(0.05 * (1.0 - v)),
                to_u8(0.05 * (1.0 - v)),
            ],
            Self::Viridis => lerp_stops(
                v,
                &[
                    [68, 1, 84],
                    [59, 82, 139],
                    [33, 145, 140],
                    [94, 201, 98],
                    [253, 231, 37],
                ],
            ),
            Self::Inferno => lerp_stops(
                v,
                &[
                    [0, 0, 4],
                    [87, 16, 110],
                    [188, 55, 84],
                    [249, 142, 9],
                    [252, 255, 164],
                ],
            ),
        };
        Color32::from_rgb(r, g, b)
    }
}

fn to_u8(v: f32) -> u8 {
    (v * 255.0).clamp(0.0, 255.0).round() as u8
}

/// Piecewise-linear interpolation between evenly spaced color stops.
fn lerp_stops(v: f32, stops: &[[u8; 3]]) -> [u8; 3] {
    let segments = (stops.len() - 1) as f32;
    let pos = v * segments;
    let i = (pos.floor() as usize).min(stops.len() - 2);
    let f = pos - i as f32;
    let (a, b) = (stops[i], stops[i + 1]);
    let mix = |c: usize| (a[c] as f32 + (b[c] as f32 - a[c] as f32) * f).round() as u8;
    [mix(0), mix(1), mix(2)]
}

/// Render a heat-map frame as a top-down RGB image for an egui texture.
pub fn heatmap_image(frame: &HeatmapFrame, colormap: Colormap) -> egui::ColorImage {
    let (w, h) = (frame.width(), frame.height());
    let masked = colormap.masked_color();
    let mut pixels = Vec::with_capacity(w * h);
    // Texture row 0 is the top of the image, i.e. the highest y.
    for y in (0..h).rev() {
        pixels.extend(frame.row(y).iter().map(|v| match v {
            Some(v) => colormap.color_at(frame.normalize(*v)),
            None => masked,
        }));
    }
    let mut image = egui::ColorImage::new([w, h], masked);
    image.pixels = pixels;
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::raster::IntensityPlane;
    use crate::pipeline::threshold::ThresholdPolicy;

    #[test]
    fn test_grayscale_endpoints() {
        assert_eq!(Colormap::Grayscale.color_at(0.0), Color32::BLACK);
        assert_eq!(Colormap::Grayscale.color_at(1.0), Color32::WHITE);
    }

    #[test]
    fn test_stops_hit_endpoints() {
        assert_eq!(Colormap::Viridis.color_at(0.0), Color32::from_rgb(68, 1, 84));
        assert_eq!(Colormap::Viridis.color_at(1.0), Color32::from_rgb(253, 231, 37));
        assert_eq!(Colormap::Inferno.color_at(2.0), Color32::from_rgb(252, 255, 164));
    }

    #[test]
    fn test_heatmap_image_orientation_and_mask() {
        let plane = IntensityPlane::from_raw(2, 2, vec![0, 255, 30, 40]).unwrap();
        let frame = HeatmapFrame::build(&plane, ThresholdPolicy::Mask, 35);
        let img = heatmap_image(&frame, Colormap::Grayscale);
        assert_eq!(img.size, [2, 2]);
        // Top row of the texture is the top row of the source image.
        let masked = Colormap::Grayscale.masked_color();
        assert_eq!(img.pixels[0], masked);
        assert_eq!(img.pixels[1], Color32::WHITE);
        assert_eq!(img.pixels[2], masked);
        // 40 at the bottom of [35, 255] is nearly black.
        assert!(img.pixels[3].r() < 10);
    }

    #[test]
    fn test_masked_color_is_outside_every_gradient() {
        for cm in Colormap::ALL {
            let masked = cm.masked_color();
            for i in 0..=255u8 {
                let t = i as f32 / 255.0;
                assert_ne!(masked, cm.color_at(t), "{} at {}", cm.label(), i);
            }
        }
    }

    #[test]
    fn test_masked_pixel_differs_from_full_intensity() {
        let plane = IntensityPlane::from_raw(2, 1, vec![50, 255]).unwrap();
        let frame = HeatmapFrame::build(&plane, ThresholdPolicy::Mask, 100);
        let img = heatmap_image(&frame, Colormap::default());
        assert_ne!(img.pixels[0], img.pixels[1]);

        // At threshold 255 only the saturated pixel keeps a gradient color.
        let frame = HeatmapFrame::build(&plane, ThresholdPolicy::Mask, 255);
        let img = heatmap_image(&frame, Colormap::default());
        assert_eq!(img.pixels[0], Colormap::Grayscale.masked_color());
        assert_eq!(img.pixels[1], Color32::WHITE);
    }
}
