/// Decoded raster data: the RGB pixel grid and its red intensity plane.

use std::path::Path;

use image::RgbImage;
use thiserror::Error;

/// Uploads larger than this are rejected before decoding (200 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Not a supported image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Upload too large: {size} bytes (limit {limit} bytes)")]
    TooLarge { size: usize, limit: usize },
    #[error("Image has no pixels")]
    EmptyImage,
}

/// A decoded image as a (height, width, 3) grid of 8-bit channels.
#[derive(Debug, Clone)]
pub struct PixelGrid {
    rgb: RgbImage,
}

impl PixelGrid {
    pub fn from_rgb(rgb: RgbImage) -> Result<Self, InspectError> {
        if rgb.width() == 0 || rgb.height() == 0 {
            return Err(InspectError::EmptyImage);
        }
        Ok(Self { rgb })
    }

    pub fn width(&self) -> usize {
        self.rgb.width() as usize
    }

    pub fn height(&self) -> usize {
        self.rgb.height() as usize
    }

    /// Borrow the underlying RGB buffer (row-major, row 0 at the top).
    pub fn as_rgb(&self) -> &RgbImage {
        &self.rgb
    }

    /// Copy out the red channel.
    pub fn red_plane(&self) -> IntensityPlane {
        let data = self.rgb.pixels().map(|p| p.0[0]).collect();
        IntensityPlane {
            width: self.width(),
            height: self.height(),
            data,
        }
    }
}

/// Red channel values, row-major with row 0 at the top of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityPlane {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl IntensityPlane {
    /// Build a plane from raw row-major values. Returns `None` if the
    /// buffer length does not match `width * height`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.width + col]
    }

    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.width;
        &self.data[start..start + self.width]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// Decode uploaded bytes into an RGB pixel grid.
///
/// Grayscale, RGBA and 16-bit sources are converted to 8-bit RGB.
pub fn decode_image(bytes: &[u8], max_bytes: usize) -> Result<PixelGrid, InspectError> {
    if bytes.len() > max_bytes {
        log::warn!("Rejected upload of {} bytes (limit {})", bytes.len(), max_bytes);
        return Err(InspectError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }
    let img = image::load_from_memory(bytes)?;
    log::debug!(
        "Decoded {}x{} image ({:?})",
        img.width(),
        img.height(),
        img.color()
    );
    PixelGrid::from_rgb(img.into_rgb8())
}

/// Read a file from disk and decode it.
pub fn load_image_file(path: &Path, max_bytes: usize) -> Result<PixelGrid, InspectError> {
    let size = std::fs::metadata(path)?.len() as usize;
    if size > max_bytes {
        log::warn!("Rejected {} ({} bytes, limit {})", path.display(), size, max_bytes);
        return Err(InspectError::TooLarge {
            size,
            limit: max_bytes,
        });
    }
    let bytes = std::fs::read(path)?;
    decode_image(&bytes, max_bytes)
}

/// File extensions offered in the open dialog.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageFormat, Rgb};
    use std::io::Cursor;

    /// Build an RGB grid whose red channel is `red` (row-major, row 0 = top).
    pub(crate) fn grid_from_red(width: u32, height: u32, red: &[u8]) -> PixelGrid {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let r = red[(y * width + x) as usize];
            Rgb([r, 255 - r, 7])
        });
        PixelGrid::from_rgb(img).unwrap()
    }

    fn encode_png(img: &image::DynamicImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_red_plane_extraction() {
        let grid = grid_from_red(2, 2, &[10, 20, 30, 40]);
        let plane = grid.red_plane();
        assert_eq!(plane.width(), 2);
        assert_eq!(plane.height(), 2);
        assert_eq!(plane.row(0), &[10, 20]);
        assert_eq!(plane.row(1), &[30, 40]);
        assert_eq!(plane.get(1, 0), 30);
    }

    #[test]
    fn test_decode_png_roundtrip() {
        let img = RgbImage::from_fn(3, 2, |x, y| Rgb([(x * 10 + y) as u8, 0, 0]));
        let bytes = encode_png(&image::DynamicImage::ImageRgb8(img));
        let grid = decode_image(&bytes, DEFAULT_MAX_UPLOAD_BYTES).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.red_plane().row(1), &[1, 11, 21]);
    }

    #[test]
    fn test_decode_rgba_and_gray_collapse_to_rgb() {
        let rgba = image::RgbaImage::from_pixel(2, 1, image::Rgba([90, 1, 2, 0]));
        let grid = decode_image(
            &encode_png(&image::DynamicImage::ImageRgba8(rgba)),
            DEFAULT_MAX_UPLOAD_BYTES,
        )
        .unwrap();
        assert_eq!(grid.red_plane().as_slice(), &[90, 90]);

        let gray = image::GrayImage::from_pixel(1, 2, image::Luma([77]));
        let grid = decode_image(
            &encode_png(&image::DynamicImage::ImageLuma8(gray)),
            DEFAULT_MAX_UPLOAD_BYTES,
        )
        .unwrap();
        assert_eq!(grid.red_plane().as_slice(), &[77, 77]);
    }

    #[test]
    fn test_decode_garbage_is_error() {
        let err = decode_image(b"definitely not a png", DEFAULT_MAX_UPLOAD_BYTES).unwrap_err();
        assert!(matches!(err, InspectError::Decode(_)));
    }

    #[test]
    fn test_upload_limit() {
        let err = decode_image(&[0u8; 16], 8).unwrap_err();
        assert!(matches!(err, InspectError::TooLarge { size: 16, limit: 8 }));
    }

    #[test]
    fn test_plane_from_raw_checks_length() {
        assert!(IntensityPlane::from_raw(2, 2, vec![0; 3]).is_none());
        assert!(IntensityPlane::from_raw(2, 2, vec![0; 4]).is_some());
    }
}
