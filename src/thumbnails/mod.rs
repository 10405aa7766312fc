//! Content-addressed thumbnail caching.
//!
//! Each source image's absolute path is hashed (SHA-1 of the path string)
//! to name a pre-scaled JPEG in the cache directory. Reconciliation deletes
//! cache files whose source no longer exists.

pub mod cache;
pub mod generator;

use std::path::PathBuf;

use thiserror::Error;

pub use cache::{CacheKey, CachedThumbnail, ThumbnailCache};
pub use generator::{ThumbnailGenerator, THUMB_HEIGHT};

/// Per-thumbnail failure taxonomy.
///
/// A decode failure permanently excludes the source until it is fixed or
/// removed; an I/O failure on the cache side is treated as a miss and the
/// thumbnail is regenerated on the next access.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("failed to decode image {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("thumbnail I/O failed for {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
