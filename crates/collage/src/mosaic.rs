//! Justified-row ("mosaic") packing.
//!
//! Items are taken in order and grouped greedily into rows. Each row gets a
//! single height chosen so the row's items, kept at their aspect ratio,
//! exactly span the canvas width. The stacked rows are then either shrunk to
//! fit the canvas height (and centered horizontally) or centered vertically.

use crate::coords::{CanvasPoint, CanvasSize};
use crate::dims::item_dims;
use crate::layout::LayoutOptions;
use crate::Item;
use std::ops::Range;

/// Heuristic row height used only to decide where rows break.
pub fn target_row_height(count: usize, canvas_height: f32) -> f32 {
    canvas_height / (count as f32).sqrt().ceil()
}

/// Sum of width/height over a run of items.
pub fn row_aspect_ratio(items: &[Item]) -> f32 {
    items
        .iter()
        .map(|item| item_dims(item).aspect_ratio())
        .sum()
}

/// End (exclusive) of the row that starts at `start`.
///
/// A row always takes at least one item, even one that alone is wider than
/// `max_row_width` at the target height.
pub fn find_row_end(
    items: &[Item],
    start: usize,
    target_row_height: f32,
    max_row_width: f32,
) -> usize {
    let mut end = start;
    let mut ratio = 0.0;

    while end < items.len() {
        ratio += item_dims(&items[end]).aspect_ratio();
        if end > start && ratio * target_row_height > max_row_width {
            break;
        }
        end += 1;
    }
    end
}

/// Place one row left to right at height `row_height`, starting at `y`.
pub fn place_row(row: &[Item], row_height: f32, y: f32, padding: f32) -> Vec<Item> {
    let mut x = padding;

    row.iter()
        .map(|item| {
            let width = row_height * item_dims(item).aspect_ratio();

            let mut placed = item.clone();
            placed.position = CanvasPoint::new(x, y);
            placed.size = CanvasSize::new(width, row_height);
            placed.scale = 1.0;
            placed.rotation = 0.0;

            x += width + padding;
            placed
        })
        .collect()
}

/// Fit the stacked rows into the canvas height.
///
/// Content taller than the padded canvas is scaled down uniformly and
/// re-centered horizontally. Shorter content is centered vertically.
/// Otherwise the items come back as they are.
pub fn finalize_mosaic(items: Vec<Item>, content_height: f32, options: &LayoutOptions) -> Vec<Item> {
    let padding = options.padding;
    let available_height = options.height() - padding * 2.0;

    if content_height > available_height {
        let scale = available_height / content_height;
        let new_content_width = (options.width() - padding * 2.0) * scale;
        let x_offset = (options.width() - new_content_width) / 2.0;
        let y_offset = padding;
        log::debug!("mosaic content {content_height} too tall, scaling by {scale}");

        return items
            .into_iter()
            .map(|mut item| {
                item.position = CanvasPoint::new(
                    (item.position.x() - padding) * scale + x_offset,
                    (item.position.y() - padding) * scale + y_offset,
                );
                item.size = item.size * scale;
                item
            })
            .collect();
    }

    let vertical_shift = (options.height() - content_height) / 2.0 - padding;
    if vertical_shift > 0.0 {
        return items
            .into_iter()
            .map(|mut item| {
                item.position.0.y += vertical_shift;
                item
            })
            .collect();
    }
    items
}

/// Lay `items` out as justified rows.
///
/// Items keep their input order; each comes back with `scale` 1 and its
/// final extent in `size`.
pub fn mosaic_layout(options: &LayoutOptions, items: &[Item]) -> Vec<Item> {
    if items.is_empty() {
        return Vec::new();
    }

    let padding = options.padding;
    let target_height = target_row_height(items.len(), options.height());
    let max_row_width = options.width() - padding * 2.0;

    let mut placed = Vec::with_capacity(items.len());
    let mut start = 0;
    let mut y = padding;

    while start < items.len() {
        let end = find_row_end(items, start, target_height, max_row_width);
        let row: Range<usize> = start..end;

        let aspect = row_aspect_ratio(&items[row.clone()]);
        let available_width = options.width() - (row.len() + 1) as f32 * padding;
        let row_height = available_width / aspect;
        log::trace!("mosaic row {row:?}: aspect {aspect}, height {row_height}, y {y}");

        placed.extend(place_row(&items[row], row_height, y, padding));

        y += row_height + padding;
        start = end;
    }

    let content_height = (y - padding) - padding;
    finalize_mosaic(placed, content_height, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemId;
    use crate::coords::{CanvasPoint, CanvasSize};

    fn item(id: u128, width: f32, height: f32) -> Item {
        Item::sticker("s", CanvasPoint::default(), CanvasSize::new(width, height))
            .with_id(ItemId::from_u128(id))
    }

    fn at(id: u128, x: f32, y: f32, width: f32, height: f32) -> Item {
        item(id, width, height).with_position(CanvasPoint::new(x, y))
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn empty_input_yields_empty_output() {
        let options = LayoutOptions::new(800.0, 600.0).with_padding(0.0);
        assert!(mosaic_layout(&options, &[]).is_empty());
    }

    #[test]
    fn row_aspect_ratio_sums_items() {
        let items = [item(1, 100.0, 100.0), item(2, 200.0, 100.0)];
        assert_eq!(row_aspect_ratio(&items), 3.0);
    }

    #[test]
    fn place_row_spans_the_row_height() {
        let items = [item(1, 100.0, 100.0), item(2, 200.0, 100.0)];
        let result = place_row(&items, 100.0, 0.0, 0.0);

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].size, CanvasSize::new(100.0, 100.0));
        assert_eq!(result[1].size, CanvasSize::new(200.0, 100.0));
        assert_eq!(result[1].position.x(), 100.0);
        assert!(result.iter().all(|i| i.scale == 1.0 && i.rotation == 0.0));
    }

    #[test]
    fn finalize_centers_short_content() {
        let options = LayoutOptions::new(200.0, 200.0).with_padding(0.0);
        let result = finalize_mosaic(vec![at(1, 0.0, 0.0, 100.0, 100.0)], 100.0, &options);
        assert_eq!(result[0].position.y(), 50.0);
    }

    #[test]
    fn finalize_scales_down_tall_content() {
        let options = LayoutOptions::new(200.0, 200.0).with_padding(0.0);
        let result = finalize_mosaic(vec![at(1, 0.0, 0.0, 100.0, 300.0)], 300.0, &options);
        assert!(approx(result[0].size.height(), 200.0));
        assert!(approx(result[0].position.x(), 33.33));
    }

    #[test]
    fn finalize_leaves_exact_fit_alone() {
        let options = LayoutOptions::new(200.0, 200.0).with_padding(0.0);
        let items = vec![at(1, 0.0, 0.0, 100.0, 200.0)];
        let result = finalize_mosaic(items.clone(), 200.0, &options);
        assert_eq!(result, items);
    }

    #[test]
    fn row_always_takes_one_item() {
        let items = [item(1, 1000.0, 10.0), item(2, 10.0, 10.0)];
        assert_eq!(find_row_end(&items, 0, 100.0, 50.0), 1);
        assert_eq!(find_row_end(&items, 1, 100.0, 50.0), 2);
    }

    #[test]
    fn two_items_justify_into_one_row() {
        let items = [item(1, 100.0, 100.0), item(2, 200.0, 100.0)];
        let options = LayoutOptions::new(300.0, 100.0).with_padding(0.0);

        let result = mosaic_layout(&options, &items);

        assert_eq!(result[0].position, CanvasPoint::new(0.0, 0.0));
        assert_eq!(result[0].size, CanvasSize::new(100.0, 100.0));
        assert_eq!(result[1].position, CanvasPoint::new(100.0, 0.0));
        assert_eq!(result[1].size, CanvasSize::new(200.0, 100.0));
    }

    #[test]
    fn overflowing_rows_are_scaled_and_centered() {
        // Each square gets its own 200px row; 800px of rows shrink into 400.
        let items: Vec<_> = (1..=4).map(|id| item(id, 100.0, 100.0)).collect();
        let options = LayoutOptions::new(200.0, 400.0).with_padding(0.0);

        let result = mosaic_layout(&options, &items);

        for (row, placed) in result.iter().enumerate() {
            assert!(approx(placed.position.x(), 50.0));
            assert!(approx(placed.position.y(), row as f32 * 100.0));
            assert!(approx(placed.size.width(), 100.0));
            assert!(approx(placed.size.height(), 100.0));
        }
    }

    #[test]
    fn many_items_stay_on_canvas() {
        let items: Vec<_> = (0..10).map(|id| item(id, 100.0, 100.0)).collect();
        let options = LayoutOptions::new(800.0, 600.0).with_padding(10.0);

        let result = mosaic_layout(&options, &items);

        assert_eq!(result.len(), 10);
        for placed in &result {
            assert!(placed.position.x() >= 0.0);
            assert!(placed.position.y() >= 0.0);
            assert!(placed.position.x() + placed.size.width() <= 800.1);
        }
    }

    #[test]
    fn uses_original_size_for_aspect() {
        let mut wide = item(1, 10.0, 10.0);
        wide.original_width = Some(400.0);
        wide.original_height = Some(100.0);
        let options = LayoutOptions::new(400.0, 100.0).with_padding(0.0);

        let result = mosaic_layout(&options, &[wide]);

        assert_eq!(result[0].size, CanvasSize::new(400.0, 100.0));
        assert_eq!(result[0].original_width, Some(400.0));
    }
}
