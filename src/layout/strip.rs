use crate::models::ThumbnailItem;

/// Horizontal strip layout with a fixed inter-item gap.
///
/// Positions are anchored to each item's natural width, not its animated
/// displayed width, so the strip never reflows while the proximity scaler
/// is zooming items in and out.
#[derive(Debug, Clone)]
pub struct StripLayout {
    /// Gap between adjacent items in pixels (default: 8)
    pub gap: f64,
    /// Horizontal margin at both ends of the strip in pixels (default: 5)
    pub margin: f64,
}

impl Default for StripLayout {
    fn default() -> Self {
        Self {
            gap: 8.0,
            margin: 5.0,
        }
    }
}

impl StripLayout {
    #[cfg(test)]
    pub fn new(gap: f64, margin: f64) -> Self {
        Self { gap, margin }
    }

    /// Assigns each item its left edge and returns the total content width.
    ///
    /// Items are placed left to right in slice order (discovery order), each
    /// slot sized to the item's natural width.
    pub fn compute(&self, items: &mut [ThumbnailItem]) -> f64 {
        let mut x = self.margin;
        for item in items.iter_mut() {
            item.x = x;
            x += item.natural_width as f64 + self.gap;
        }
        if items.is_empty() {
            self.margin * 2.0
        } else {
            x - self.gap + self.margin
        }
    }

    /// Largest scroll offset for the given content and viewport widths.
    pub fn max_offset(content_width: f64, viewport_width: f64) -> i32 {
        (content_width - viewport_width).max(0.0).round() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn items_with_widths(widths: &[u32]) -> Vec<ThumbnailItem> {
        widths
            .iter()
            .map(|&w| ThumbnailItem::new(PathBuf::from("/w/a.jpg"), w, 180))
            .collect()
    }

    #[test]
    fn positions_are_prefix_sums() {
        let mut items = items_with_widths(&[100, 200, 50]);
        let layout = StripLayout::new(8.0, 5.0);
        let content = layout.compute(&mut items);
        assert_eq!(items[0].x, 5.0);
        assert_eq!(items[1].x, 113.0);
        assert_eq!(items[2].x, 321.0);
        assert_eq!(content, 376.0);
    }

    #[test]
    fn empty_strip_has_margin_only() {
        let mut items = items_with_widths(&[]);
        let content = StripLayout::default().compute(&mut items);
        assert_eq!(content, 10.0);
    }

    #[test]
    fn max_offset_never_negative() {
        assert_eq!(StripLayout::max_offset(376.0, 1690.0), 0);
        assert_eq!(StripLayout::max_offset(2000.0, 1690.0), 310);
    }

    #[test]
    fn relayout_is_stable_under_scaling() {
        let mut items = items_with_widths(&[100, 200]);
        let layout = StripLayout::default();
        layout.compute(&mut items);
        let before: Vec<f64> = items.iter().map(|i| i.x).collect();
        for item in items.iter_mut() {
            item.apply_scale(0.6);
        }
        layout.compute(&mut items);
        let after: Vec<f64> = items.iter().map(|i| i.x).collect();
        assert_eq!(before, after);
    }
}
