/// Per-pixel (x, y, R) table.

use super::coords;
use crate::data::raster::IntensityPlane;

/// Rows shown in the on-screen preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 10_000;

/// One pixel: bottom-left coordinates and its red intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelRecord {
    pub x: u32,
    pub y: u32,
    pub intensity: u8,
}

/// All pixels of an image in row-major scan order of the source grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelTable {
    width: usize,
    height: usize,
    records: Vec<PixelRecord>,
}

impl PixelTable {
    pub fn build(plane: &IntensityPlane) -> Self {
        let (width, height) = (plane.width(), plane.height());
        let records = coords::grid_coordinates(height, width)
            .zip(plane.as_slice().iter())
            .map(|((x, y), &intensity)| PixelRecord {
                x: x as u32,
                y: y as u32,
                intensity,
            })
            .collect();
        Self {
            width,
            height,
            records,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The full, unbounded record set.
    pub fn records(&self) -> &[PixelRecord] {
        &self.records
    }

    /// The first `limit` records; always a prefix of [`Self::records`].
    pub fn preview(&self, limit: usize) -> &[PixelRecord] {
        &self.records[..limit.min(self.records.len())]
    }
}
