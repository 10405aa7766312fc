//! Proximity scaling: the "focus lens" zoom over the thumbnail strip.
//!
//! Runs once per tick regardless of scroll state. Each item's target scale
//! depends only on its distance from the viewport center; the displayed size
//! chases the target through a first-order low-pass filter so sizes glide
//! instead of snapping while the strip flies past.

use crate::models::ThumbnailItem;

/// Distance in pixels beyond which the scale bottoms out.
pub const FALLOFF_RADIUS: f64 = 400.0;
/// Exponent shaping the falloff: slow near the center, steep near the edge.
pub const FALLOFF_EXPONENT: f64 = 1.8;
/// How much of the scale is lost at or beyond the falloff radius.
pub const SCALE_DROP: f64 = 0.5;
/// Fraction of the remaining gap to the target closed per tick.
pub const SCALE_CONVERGENCE: f64 = 0.25;

/// Target scale for an item at `distance` pixels from the viewport center.
///
/// 1.0 at the center, `1.0 - SCALE_DROP` at and beyond [`FALLOFF_RADIUS`],
/// monotonically non-increasing in between.
pub fn scale_target(distance: f64) -> f64 {
    let t = (distance.abs() / FALLOFF_RADIUS).min(1.0);
    1.0 - SCALE_DROP * t.powf(FALLOFF_EXPONENT)
}

/// One scaling tick over the whole strip.
///
/// Reads the scroll offset after the scroller's tick has fully applied and
/// mutates each item's displayed size. Items whose bitmap failed to load are
/// skipped; a bad image never halts the loop for the rest of the strip.
pub fn update_scales(items: &mut [ThumbnailItem], viewport_width: f64, scroll_offset: i32) {
    if items.is_empty() {
        return;
    }
    let viewport_center = viewport_width / 2.0 + scroll_offset as f64;
    for item in items.iter_mut() {
        if !item.has_bitmap() {
            continue;
        }
        let distance = (item.center_x() - viewport_center).abs();
        let target = scale_target(distance);
        let current = item.current_scale();
        let new_scale = current + (target - current) * SCALE_CONVERGENCE;
        item.apply_scale(new_scale);
    }
}
