use std::path::PathBuf;

/// One wallpaper in the strip.
///
/// The natural size is the cached bitmap's pixel size and never changes after
/// construction. The displayed size is animated every scaling tick; the
/// horizontal position is owned by the layout and read-only to the engines.
#[derive(Debug, Clone)]
pub struct ThumbnailItem {
    /// Absolute source path, unique key for the item.
    pub path: PathBuf,
    /// Cached bitmap width in pixels.
    pub natural_width: u32,
    /// Cached bitmap height in pixels.
    pub natural_height: u32,
    /// Current on-screen width, mutated by the proximity scaler.
    pub display_width: f64,
    /// Current on-screen height, kept proportional to the width.
    pub display_height: f64,
    /// Left edge within the strip, assigned by the layout.
    pub x: f64,
}

impl ThumbnailItem {
    /// Create an item displayed at its natural size (scale 1.0).
    pub fn new(path: PathBuf, natural_width: u32, natural_height: u32) -> Self {
        Self {
            path,
            natural_width,
            natural_height,
            display_width: natural_width as f64,
            display_height: natural_height as f64,
            x: 0.0,
        }
    }

    /// Whether a bitmap was successfully loaded for this item.
    pub fn has_bitmap(&self) -> bool {
        self.natural_width > 0 && self.natural_height > 0
    }

    /// Current scale relative to the natural bitmap size.
    pub fn current_scale(&self) -> f64 {
        if self.natural_width == 0 {
            1.0
        } else {
            self.display_width / self.natural_width as f64
        }
    }

    /// Resize both dimensions to `scale` times the natural size.
    ///
    /// Deriving both from the natural size keeps the aspect ratio exact no
    /// matter how many ticks have accumulated rounding in between.
    pub fn apply_scale(&mut self, scale: f64) {
        self.display_width = self.natural_width as f64 * scale;
        self.display_height = self.natural_height as f64 * scale;
    }

    /// Horizontal center of the item within the strip.
    pub fn center_x(&self) -> f64 {
        self.x + self.display_width / 2.0
    }

    pub fn aspect_ratio(&self) -> f64 {
        if self.natural_height == 0 {
            1.0
        } else {
            self.natural_width as f64 / self.natural_height as f64
        }
    }
}
