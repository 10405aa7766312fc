//! Recursive discovery of wallpaper source images.
//!
//! Walks the wallpapers root with `walkdir`, keeping files whose extension is
//! a recognized image format. Discovery order is the walk order; no sorting
//! is applied, so the displayed strip order is filesystem-dependent.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extensions recognized as wallpaper sources (lowercase, no dot).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Configuration for the wallpaper scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Maximum directory depth (0 = unlimited).
    pub max_depth: usize,
    /// Whether to follow symbolic links.
    pub follow_symlinks: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 0, // unlimited
            follow_symlinks: false,
        }
    }
}

/// Whether a path looks like a wallpaper source by extension.
pub fn is_wallpaper(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Recursively discovers wallpaper sources under `root`, in walk order.
///
/// Unreadable entries are logged and skipped; a missing root simply yields
/// an empty list.
pub fn discover(root: &Path, config: &ScanConfig) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(root).follow_links(config.follow_symlinks);
    if config.max_depth > 0 {
        walker = walker.max_depth(config.max_depth);
    }

    let mut paths = Vec::new();
    for entry in walker.into_iter() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                warn!(%error, "skipping unreadable directory entry");
                continue;
            }
        };
        if entry.file_type().is_file() && is_wallpaper(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    debug!(root = ?root, count = paths.len(), "wallpaper scan complete");
    paths
}
