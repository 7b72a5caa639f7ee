/// Grid position ↔ bottom-left-origin pixel coordinates.
///
/// Raster rows count down from the top edge; exported coordinates put
/// y = 0 on the bottom row so plots read like a regular Cartesian chart.

/// Map grid cell (row, col) to (x, y) with y measured upward from the bottom row.
#[inline]
pub fn bottom_left(row: usize, col: usize, height: usize) -> (usize, usize) {
    (col, height - 1 - row)
}

/// Inverse of [`bottom_left`]: (x, y) back to (row, col).
#[inline]
pub fn to_grid(x: usize, y: usize, height: usize) -> (usize, usize) {
    (height - 1 - y, x)
}

/// Every cell of a `height` × `width` grid in row-major scan order,
/// mapped to bottom-left coordinates.
pub fn grid_coordinates(height: usize, width: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..height).flat_map(move |row| (0..width).map(move |col| bottom_left(row, col, height)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_grid_coordinates_bijective() {
        for &(h, w) in &[(1, 1), (1, 7), (5, 1), (3, 4), (17, 9)] {
            let coords: Vec<_> = grid_coordinates(h, w).collect();
            assert_eq!(coords.len(), h * w);
            let unique: HashSet<_> = coords.iter().copied().collect();
            assert_eq!(unique.len(), h * w, "duplicate coordinates for {h}x{w}");
            assert!(coords.iter().all(|&(x, y)| x < w && y < h));
        }
    }

    #[test]
    fn test_top_row_is_highest_y() {
        let coords: Vec<_> = grid_coordinates(3, 2).collect();
        assert_eq!(coords[0], (0, 2));
        assert_eq!(coords[1], (1, 2));
        assert_eq!(*coords.last().unwrap(), (1, 0));
    }

    #[test]
    fn test_inverse_mapping() {
        let h = 6;
        for row in 0..h {
            for col in 0..4 {
                let (x, y) = bottom_left(row, col, h);
                assert_eq!(to_grid(x, y, h), (row, col));
            }
        }
    }
}
