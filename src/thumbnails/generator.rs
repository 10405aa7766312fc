//! Thumbnail generation using the image crate.
//!
//! Scales sources to a fixed 180 px height while preserving aspect ratio and
//! persists them as JPEG.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{GenericImageView, RgbImage};
use tracing::{debug, warn};

use super::ThumbnailError;

/// Fixed target height for generated thumbnails in pixels.
pub const THUMB_HEIGHT: u32 = 180;

/// JPEG quality for thumbnail encoding (0-100).
const JPEG_QUALITY: u8 = 85;

/// Decodes, rescales, and persists thumbnails.
pub struct ThumbnailGenerator;

impl ThumbnailGenerator {
    /// Generate a thumbnail from `src`, save it to `dst`, and return it.
    ///
    /// The result is exactly `target_height` tall with width following the
    /// source aspect ratio. CatmullRom gives a good quality/speed balance
    /// for downscaling. Persisting to `dst` is best-effort: only decoding
    /// and source-read failures are errors.
    pub fn generate(
        src: &Path,
        dst: &Path,
        target_height: u32,
    ) -> Result<RgbImage, ThumbnailError> {
        let img = image::open(src).map_err(|e| Self::classify(src, e))?;
        let (src_width, src_height) = img.dimensions();

        let (thumb_width, thumb_height) =
            Self::scaled_dimensions(src_width, src_height, target_height);
        debug!(?src, src_width, src_height, thumb_width, thumb_height, "generating thumbnail");

        let thumbnail = img
            .resize_exact(thumb_width, thumb_height, FilterType::CatmullRom)
            .to_rgb8();
        // A cache-side write failure must not drop a good bitmap: the entry
        // simply stays a miss and is regenerated on the next access.
        if let Err(error) = Self::save(&thumbnail, dst) {
            warn!(?dst, %error, "failed to persist thumbnail");
        }
        Ok(thumbnail)
    }

    /// Width for `target_height` preserving the source aspect ratio.
    fn scaled_dimensions(src_width: u32, src_height: u32, target_height: u32) -> (u32, u32) {
        if src_width == 0 || src_height == 0 {
            return (target_height, target_height);
        }
        let width =
            (src_width as f64 * target_height as f64 / src_height as f64).round() as u32;
        (width.max(1), target_height)
    }

    /// Encode to `dst` as JPEG.
    fn save(img: &RgbImage, dst: &Path) -> Result<(), ThumbnailError> {
        let io_err = |source| ThumbnailError::Io {
            path: dst.to_path_buf(),
            source,
        };
        let file = File::create(dst).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
        img.write_with_encoder(encoder)
            .map_err(|e| Self::classify(dst, e))?;
        Ok(())
    }

    /// Split an `ImageError` into the I/O vs decode halves of the taxonomy.
    pub(super) fn classify(path: &Path, error: image::ImageError) -> ThumbnailError {
        match error {
            image::ImageError::IoError(source) => ThumbnailError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => ThumbnailError::Decode {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}
