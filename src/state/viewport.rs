// Rectangle intersection core for the visibility tracker.

use std::collections::HashSet;

/// Axis-aligned rectangle in viewport coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Inflate by `margin` on all sides.
    pub fn expand(&self, margin: f64) -> Self {
        Self {
            left: self.left - margin,
            top: self.top - margin,
            right: self.right + margin,
            bottom: self.bottom + margin,
        }
    }

    /// Overlap test; edge contact counts as overlap.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.right >= other.left
            && self.left <= other.right
            && self.bottom >= other.top
            && self.top <= other.bottom
    }
}

/// Ids whose rects overlap the viewport inflated by `radius`.
pub fn visible_ids<I>(items: I, viewport: Rect, radius: f64) -> HashSet<u32>
where
    I: IntoIterator<Item = (u32, Rect)>,
{
    let extended = viewport.expand(radius);
    items
        .into_iter()
        .filter(|(_, rect)| rect.intersects(&extended))
        .map(|(id, _)| id)
        .collect()
}
