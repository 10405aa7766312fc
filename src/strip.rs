//! The wallpaper strip: item assembly plus the pointer/tick entry points.
//!
//! `WallpaperStrip` is the UI-less core of the overlay widget. Construction
//! reconciles the thumbnail cache, loads one item per decodable source in
//! discovery order, and lays the items out; afterwards the host event loop
//! feeds it pointer events and the two ~16 ms timer ticks. Window placement,
//! click side effects, and chrome belong to the consumer.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::layout::StripLayout;
use crate::models::ThumbnailItem;
use crate::scaling;
use crate::scanner::{self, ScanConfig};
use crate::scroll::ScrollSurface;
use crate::thumbnails::ThumbnailCache;

pub struct WallpaperStrip {
    items: Vec<ThumbnailItem>,
    layout: StripLayout,
    surface: ScrollSurface,
    viewport_width: f64,
    content_width: f64,
}

impl WallpaperStrip {
    /// Assemble a strip from the wallpapers under `source_root`.
    ///
    /// Runs synchronously: reconciliation and thumbnail generation block
    /// until done, a one-shot cost bounded by the directory size. Sources
    /// that fail to decode are skipped and never become items.
    pub fn build(
        source_root: &Path,
        cache: &ThumbnailCache,
        viewport_width: f64,
    ) -> Result<Self> {
        cache
            .reconcile(source_root)
            .with_context(|| format!("failed to reconcile cache against {:?}", source_root))?;

        let mut items = Vec::new();
        for path in scanner::discover(source_root, &ScanConfig::default()) {
            match cache.load_or_create(&path) {
                Ok(thumb) => {
                    items.push(ThumbnailItem::new(path, thumb.width, thumb.height));
                }
                Err(error) => {
                    warn!(?path, %error, "skipping wallpaper");
                }
            }
        }
        info!(count = items.len(), "wallpaper strip assembled");

        let layout = StripLayout::default();
        let mut strip = Self {
            items,
            layout,
            surface: ScrollSurface::new(0),
            viewport_width: viewport_width.max(0.0),
            content_width: 0.0,
        };
        strip.relayout();
        Ok(strip)
    }

    /// Recompute item positions and the scroll range.
    fn relayout(&mut self) {
        self.content_width = self.layout.compute(&mut self.items);
        self.surface
            .set_max_offset(StripLayout::max_offset(self.content_width, self.viewport_width));
    }

    pub fn items(&self) -> &[ThumbnailItem] {
        &self.items
    }

    pub fn surface(&self) -> &ScrollSurface {
        &self.surface
    }

    pub fn content_width(&self) -> f64 {
        self.content_width
    }

    /// Resize the viewport, re-clamping the scroll offset.
    pub fn set_viewport_width(&mut self, viewport_width: f64) {
        self.viewport_width = viewport_width.max(0.0);
        self.relayout();
    }

    pub fn pointer_down(&mut self, x: f64, now: Instant) {
        self.surface.pointer_down(x, now);
    }

    pub fn pointer_move(&mut self, x: f64, now: Instant) {
        self.surface.pointer_move(x, now);
    }

    pub fn pointer_up(&mut self) {
        self.surface.pointer_up();
    }

    /// Momentum timer tick; returns `true` while coasting continues.
    pub fn momentum_tick(&mut self) -> bool {
        self.surface.momentum_tick()
    }

    /// Scaling timer tick, run unconditionally at ~60 Hz.
    ///
    /// Reads the scroll offset after any momentum tick in the same loop
    /// iteration has fully applied.
    pub fn scaling_tick(&mut self) {
        scaling::update_scales(&mut self.items, self.viewport_width, self.surface.offset());
    }

    /// Hit-test a viewport x coordinate against the displayed items.
    ///
    /// This is what a consumer calls on click to learn which wallpaper to
    /// apply; the side effects themselves are out of scope here.
    pub fn item_at(&self, viewport_x: f64) -> Option<&ThumbnailItem> {
        let strip_x = viewport_x + self.surface.offset() as f64;
        self.items
            .iter()
            .find(|item| strip_x >= item.x && strip_x < item.x + item.display_width)
    }
}
