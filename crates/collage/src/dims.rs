//! Natural item dimensions and point hit testing.

use crate::coords::{CanvasPoint, CanvasSize};
use crate::Item;

/// Extent used when an item carries neither an original nor a current size.
pub const FALLBACK_EXTENT: f32 = 100.0;

/// Zero and NaN count as "unset".
fn present(value: f32) -> Option<f32> {
    (value != 0.0 && !value.is_nan()).then_some(value)
}

fn resolve(original: Option<f32>, current: f32) -> f32 {
    original
        .and_then(present)
        .or_else(|| present(current))
        .unwrap_or(FALLBACK_EXTENT)
}

/// Resolve an item's natural size.
///
/// Each axis independently prefers the original extent, then the current
/// extent, then [`FALLBACK_EXTENT`].
pub fn item_dims(item: &Item) -> CanvasSize {
    CanvasSize::new(
        resolve(item.original_width, item.size.width()),
        resolve(item.original_height, item.size.height()),
    )
}

/// Whether `point` lies within the item's natural-size box, edges included.
pub fn is_point_in_item(item: &Item, point: CanvasPoint) -> bool {
    item.hit_bounds().contains(point)
}
