//! Disk cache of pre-scaled thumbnails with a small in-memory layer.
//!
//! Filenames are the SHA-1 hex of the source's path string, so a cache entry
//! exists iff a thumbnail was generated for that exact path. Hashing covers
//! the path only, not the file contents: a source edited in place keeps its
//! cached thumbnail until it is renamed or removed.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use image::RgbImage;
use lru::LruCache;
use parking_lot::Mutex;
use sha1::{Digest, Sha1};
use tracing::{debug, trace, warn};

use super::generator::{ThumbnailGenerator, THUMB_HEIGHT};
use super::ThumbnailError;
use crate::scanner::{self, ScanConfig};

/// Capacity of the in-memory layer (number of decoded thumbnails).
const MEMORY_CAPACITY: usize = 256;

/// A decoded thumbnail handed to consumers.
#[derive(Debug, Clone)]
pub struct CachedThumbnail {
    /// RGB pixels of the pre-scaled thumbnail.
    pub image: RgbImage,
    pub width: u32,
    pub height: u32,
}

impl CachedThumbnail {
    fn new(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            image,
            width,
            height,
        }
    }
}

/// Content-addressed cache key: SHA-1 of the absolute source path string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    hex: String,
    /// Source path for debugging.
    #[cfg(debug_assertions)]
    path: PathBuf,
}

impl CacheKey {
    pub fn new(path: &Path) -> Self {
        let absolute = Self::absolutize(path);
        let mut hasher = Sha1::new();
        hasher.update(absolute.to_string_lossy().as_bytes());
        let hex = format!("{:x}", hasher.finalize());
        Self {
            hex,
            #[cfg(debug_assertions)]
            path: absolute,
        }
    }

    /// Anchor relative paths at the current directory so the key is stable
    /// across sessions regardless of where the process was started.
    ///
    /// No symlink resolution: two spellings of one file stay distinct keys,
    /// but a given spelling always hashes the same.
    fn absolutize(path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(path))
                .unwrap_or_else(|_| path.to_path_buf())
        }
    }

    /// SHA-1 hex digest of the path string.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Filename for disk cache storage.
    pub fn disk_filename(&self) -> String {
        format!("{}.jpg", self.hex)
    }
}

/// Thumbnail cache over a single directory of `<sha1>.jpg` files.
pub struct ThumbnailCache {
    cache_dir: PathBuf,
    memory: Mutex<LruCache<String, Arc<CachedThumbnail>>>,
    thumb_height: u32,
}

impl ThumbnailCache {
    /// Open a cache rooted at `cache_dir`, creating the directory if needed.
    ///
    /// Failure to create the cache root is the only fatal startup error.
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&cache_dir)
            .with_context(|| format!("failed to create cache directory {:?}", cache_dir))?;
        debug!(?cache_dir, "opened thumbnail cache");
        Ok(Self {
            cache_dir,
            memory: Mutex::new(LruCache::new(
                std::num::NonZeroUsize::new(MEMORY_CAPACITY).unwrap(),
            )),
            thumb_height: THUMB_HEIGHT,
        })
    }

    /// Open a cache in the default XDG cache directory.
    pub fn new_default() -> Result<Self> {
        Self::new(Self::default_cache_dir()?)
    }

    /// Default cache directory path.
    pub fn default_cache_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("", "", "wallstrip")
            .context("failed to determine project directories")?;
        Ok(proj_dirs.cache_dir().join("thumbs"))
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Disk location for a cache key.
    pub fn disk_path(&self, key: &CacheKey) -> PathBuf {
        self.cache_dir.join(key.disk_filename())
    }

    /// Whether a thumbnail for `path` exists on disk.
    pub fn exists(&self, path: &Path) -> bool {
        self.disk_path(&CacheKey::new(path)).exists()
    }

    /// Return the thumbnail for `path`, generating and persisting it on miss.
    ///
    /// Lookup order: memory layer, then disk, then the source image. A disk
    /// entry that fails to decode is removed and regenerated from source, so
    /// cache-side corruption behaves like a miss. Likewise a failed cache
    /// write still yields the freshly scaled bitmap; only the source side
    /// can fail this call.
    pub fn load_or_create(&self, path: &Path) -> Result<Arc<CachedThumbnail>, ThumbnailError> {
        let key = CacheKey::new(path);

        if let Some(hit) = self.memory.lock().get(key.hex()).cloned() {
            trace!(?path, "memory cache hit");
            return Ok(hit);
        }

        let disk_path = self.disk_path(&key);
        if disk_path.exists() {
            match image::open(&disk_path) {
                Ok(img) => {
                    trace!(?path, "disk cache hit");
                    let cached = Arc::new(CachedThumbnail::new(img.to_rgb8()));
                    self.memory.lock().put(key.hex().to_owned(), cached.clone());
                    return Ok(cached);
                }
                Err(error) => {
                    warn!(?disk_path, %error, "corrupt cache entry, regenerating");
                    let _ = fs::remove_file(&disk_path);
                }
            }
        }

        debug!(?path, "cache miss, generating thumbnail");
        let thumbnail = ThumbnailGenerator::generate(path, &disk_path, self.thumb_height)?;
        let cached = Arc::new(CachedThumbnail::new(thumbnail));
        self.memory.lock().put(key.hex().to_owned(), cached.clone());
        Ok(cached)
    }

    /// Delete every cache file whose source no longer exists under `root`.
    ///
    /// Walks the live source tree, hashes each path, and removes cache files
    /// whose stem is not in the live set, evicting the same keys from the
    /// memory layer. Returns the number of evictions. A cache directory that
    /// has vanished since open simply has nothing to reconcile.
    pub fn reconcile(&self, root: &Path) -> Result<usize> {
        let live: std::collections::HashSet<String> =
            scanner::discover(root, &ScanConfig::default())
                .iter()
                .map(|path| CacheKey::new(path).hex().to_owned())
                .collect();

        if !self.cache_dir.exists() {
            warn!(cache_dir = ?self.cache_dir, "cache directory missing, nothing to reconcile");
            return Ok(0);
        }

        let mut removed = 0usize;
        let entries = fs::read_dir(&self.cache_dir)
            .with_context(|| format!("failed to read cache directory {:?}", self.cache_dir))?;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || path.extension().map_or(true, |e| e != "jpg") {
                continue;
            }
            let stem = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem,
                None => continue,
            };
            if !live.contains(stem) {
                if let Err(error) = fs::remove_file(&path) {
                    warn!(?path, %error, "failed to remove orphaned thumbnail");
                } else {
                    self.memory.lock().pop(stem);
                    removed += 1;
                }
            }
        }
        debug!(live = live.len(), removed, "cache reconciliation complete");
        Ok(removed)
    }

    /// Drop the memory layer; disk entries are untouched.
    pub fn clear_memory(&self) {
        self.memory.lock().clear();
    }

    /// Number of thumbnails currently held in memory.
    pub fn memory_entry_count(&self) -> usize {
        self.memory.lock().len()
    }
}
