//! Grid packing.
//!
//! Items go row-major into equally sized cells. The column count follows the
//! canvas aspect ratio so cells come out roughly square, each item is scaled
//! to fit its cell and centered in it, and an incomplete last row is centered
//! horizontally.
//!
//! Degenerate input (no items, padding larger than the canvas) produces
//! zero or negative cell sizes rather than an error.

use crate::coords::{CanvasPoint, CanvasSize};
use crate::dims::item_dims;
use crate::layout::LayoutOptions;
use crate::Item;

/// Shape of the grid for a given item count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridDimensions {
    pub cols: usize,
    pub rows: usize,
    pub cell: CanvasSize,
}

impl GridDimensions {
    pub fn cell_width(&self) -> f32 {
        self.cell.width()
    }

    pub fn cell_height(&self) -> f32 {
        self.cell.height()
    }
}

/// Choose columns and rows for `count` items and size the cells.
pub fn grid_dimensions(count: usize, canvas: CanvasSize, padding: f32) -> GridDimensions {
    if count == 0 {
        return GridDimensions {
            cols: 1,
            rows: 1,
            cell: CanvasSize::new(0.0, 0.0),
        };
    }

    let aspect = canvas.aspect_ratio();
    // `as` saturates: an infinite aspect lands on usize::MAX, NaN on 0.
    let cols = ((count as f32 * aspect).sqrt().ceil() as usize).clamp(1, count);
    let rows = count.div_ceil(cols).max(1);

    let cell_width = (canvas.width() - padding * (cols + 1) as f32) / cols as f32;
    let cell_height = (canvas.height() - padding * (rows + 1) as f32) / rows as f32;

    GridDimensions {
        cols,
        rows,
        cell: CanvasSize::new(cell_width, cell_height),
    }
}

/// Horizontal shift that centers a partially filled last row.
///
/// Zero for full rows and for every row but the last.
pub fn last_row_offset(
    index: usize,
    count: usize,
    cols: usize,
    cell_width: f32,
    padding: f32,
    canvas_width: f32,
) -> f32 {
    let row = index / cols;
    let rows = count.div_ceil(cols);
    let is_last_row = row + 1 == rows;
    let items_in_last_row = match count % cols {
        0 => cols,
        rest => rest,
    };

    if is_last_row && items_in_last_row < cols {
        let row_width =
            items_in_last_row as f32 * cell_width + (items_in_last_row - 1) as f32 * padding;
        let centered_start = (canvas_width - row_width) / 2.0;
        return centered_start - padding;
    }
    0.0
}

/// Fit `item` into the cell at `origin`.
///
/// The result keeps the natural size as `size` and expresses the fit through
/// `scale`, centered inside the cell. Rotation is reset.
pub fn grid_item(item: &Item, origin: CanvasPoint, cell: CanvasSize) -> Item {
    let natural = item_dims(item);
    let scale = (cell.width() / natural.width()).min(cell.height() / natural.height());

    let mut placed = item.clone();
    placed.position = CanvasPoint::new(
        origin.x() + (cell.width() - natural.width() * scale) / 2.0,
        origin.y() + (cell.height() - natural.height() * scale) / 2.0,
    );
    placed.size = natural;
    placed.scale = scale;
    placed.rotation = 0.0;
    placed
}

/// Lay `items` out on a grid. Order, length and ids are preserved.
pub fn grid_layout(options: &LayoutOptions, items: &[Item]) -> Vec<Item> {
    let padding = options.padding;
    let grid = grid_dimensions(items.len(), options.canvas, padding);
    let GridDimensions { cols, cell, .. } = grid;

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let offset = last_row_offset(
                index,
                items.len(),
                cols,
                cell.width(),
                padding,
                options.width(),
            );
            let col = index % cols;
            let row = index / cols;

            let origin = CanvasPoint::new(
                padding + col as f32 * (cell.width() + padding) + offset,
                padding + row as f32 * (cell.height() + padding),
            );
            grid_item(item, origin, cell)
        })
        .collect()
}
