/// Minimum-intensity threshold and the two ways of applying it.

use serde::{Deserialize, Serialize};

use super::table::PixelRecord;

/// How the intensity threshold is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThresholdPolicy {
    /// Hide sub-threshold pixels in the heat-map only. The color scale
    /// starts at the threshold; the table and 3D data are untouched.
    #[default]
    Mask,
    /// Drop sub-threshold records from the 3D working set.
    Exclude,
}

impl ThresholdPolicy {
    pub const ALL: [ThresholdPolicy; 2] = [ThresholdPolicy::Mask, ThresholdPolicy::Exclude];

    pub fn label(&self) -> &'static str {
        match self {
            ThresholdPolicy::Mask => "Mask (heat-map)",
            ThresholdPolicy::Exclude => "Exclude (3D)",
        }
    }
}

impl std::fmt::Display for ThresholdPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThresholdPolicy::Mask => write!(f, "mask"),
            ThresholdPolicy::Exclude => write!(f, "exclude"),
        }
    }
}

/// `None` for values below `threshold`.
#[inline]
pub fn mask_value(value: u8, threshold: u8) -> Option<u8> {
    (value >= threshold).then_some(value)
}

/// Records with intensity at or above `threshold`, order preserved.
pub fn exclude(records: &[PixelRecord], threshold: u8) -> Vec<PixelRecord> {
    if threshold == 0 {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| r.intensity >= threshold)
        .copied()
        .collect()
}

/// Value range for the filtered color scale: `[threshold, 255]`.
pub fn filtered_range(threshold: u8) -> (u8, u8) {
    (threshold, u8::MAX)
}
