/// Heat-map frame: the intensity plane flipped to bottom-up rows, with the
/// optional threshold mask and the value range for the color scale.

use super::threshold::{self, ThresholdPolicy};
use crate::data::raster::IntensityPlane;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapFrame {
    width: usize,
    height: usize,
    /// Row 0 is y = 0 (the bottom of the image). `None` marks a masked pixel.
    values: Vec<Option<u8>>,
    /// Inclusive value range mapped onto the color scale.
    pub range: (u8, u8),
}

impl HeatmapFrame {
    pub fn build(plane: &IntensityPlane, policy: ThresholdPolicy, threshold: u8) -> Self {
        let (width, height) = (plane.width(), plane.height());
        let masking = policy == ThresholdPolicy::Mask;
        let range = if masking {
            threshold::filtered_range(threshold)
        } else {
            (0, u8::MAX)
        };

        let mut values = Vec::with_capacity(width * height);
        for row in (0..height).rev() {
            values.extend(plane.row(row).iter().map(|&v| {
                if masking {
                    threshold::mask_value(v, threshold)
                } else {
                    Some(v)
                }
            }));
        }

        Self {
            width,
            height,
            values,
            range,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at bottom-left coordinate (x, y).
    pub fn value_at(&self, x: usize, y: usize) -> Option<u8> {
        self.values[y * self.width + x]
    }

    /// Bottom-up row `y`.
    pub fn row(&self, y: usize) -> &[Option<u8>] {
        let start = y * self.width;
        &self.values[start..start + self.width]
    }

    pub fn masked_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    /// Position of `value` within `range`, in [0, 1].
    pub fn normalize(&self, value: u8) -> f32 {
        normalize_in(value, self.range)
    }
}

/// Position of `value` within an inclusive `(lo, hi)` range, clamped to [0, 1].
/// A degenerate range maps everything at or above `lo` to 1.
pub fn normalize_in(value: u8, (lo, hi): (u8, u8)) -> f32 {
    if hi <= lo {
        return if value >= lo { 1.0 } else { 0.0 };
    }
    ((value as f32 - lo as f32) / (hi as f32 - lo as f32)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plane() -> IntensityPlane {
        IntensityPlane::from_raw(2, 2, vec![10, 20, 30, 40]).unwrap()
    }

    #[test]
    fn test_frame_is_bottom_up() {
        let frame = HeatmapFrame::build(&plane(), ThresholdPolicy::Mask, 0);
        assert_eq!(frame.row(0), &[Some(30), Some(40)]);
        assert_eq!(frame.row(1), &[Some(10), Some(20)]);
        assert_eq!(frame.value_at(0, 1), Some(10));
        assert_eq!(frame.range, (0, 255));
        assert_eq!(frame.masked_count(), 0);
    }

    #[test]
    fn test_mask_policy_hides_low_values() {
        let frame = HeatmapFrame::build(&plane(), ThresholdPolicy::Mask, 25);
        assert_eq!(frame.row(1), &[None, None]);
        assert_eq!(frame.row(0), &[Some(30), Some(40)]);
        assert_eq!(frame.range, (25, 255));
        assert_eq!(frame.masked_count(), 2);
    }

    #[test]
    fn test_exclude_policy_leaves_heatmap_alone() {
        let frame = HeatmapFrame::build(&plane(), ThresholdPolicy::Exclude, 25);
        assert_eq!(frame.masked_count(), 0);
        assert_eq!(frame.range, (0, 255));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_in(0, (0, 255)), 0.0);
        assert_eq!(normalize_in(255, (0, 255)), 1.0);
        assert!((normalize_in(140, (25, 255)) - 0.5).abs() < 1e-6);
        assert_eq!(normalize_in(255, (255, 255)), 1.0);
        assert_eq!(normalize_in(3, (25, 255)), 0.0);
    }
}
