//! Layout modes and the entry point into the auto-layout engines.
//!
//! Layout is opt-in: the canvas starts in [`LayoutMode::Free`], where items
//! keep whatever position they were given. The auto modes re-pack every item
//! from its natural size on each structural change.

use crate::coords::CanvasSize;
use crate::{grid, mosaic, CanvasSettings, Item};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// How item positions are determined.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LayoutMode {
    /// Items keep manually-set positions.
    #[default]
    Free,
    /// Row/column grid sized to the canvas aspect ratio.
    Grid,
    /// Justified rows.
    Mosaic,
}

/// An automatic layout engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AutoLayout {
    Grid,
    Mosaic,
}

impl LayoutMode {
    /// The engine this mode re-runs after structural changes, if any.
    pub fn auto(self) -> Option<AutoLayout> {
        match self {
            LayoutMode::Free => None,
            LayoutMode::Grid => Some(AutoLayout::Grid),
            LayoutMode::Mosaic => Some(AutoLayout::Mosaic),
        }
    }

    pub fn is_free(self) -> bool {
        self == LayoutMode::Free
    }
}

impl From<AutoLayout> for LayoutMode {
    fn from(layout: AutoLayout) -> Self {
        match layout {
            AutoLayout::Grid => LayoutMode::Grid,
            AutoLayout::Mosaic => LayoutMode::Mosaic,
        }
    }
}

/// Canvas geometry an engine packs into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOptions {
    pub canvas: CanvasSize,
    /// Uniform gap between items and around the canvas edge.
    pub padding: f32,
}

impl LayoutOptions {
    pub const DEFAULT_PADDING: f32 = 10.0;

    pub fn new(width: f32, height: f32) -> Self {
        Self {
            canvas: CanvasSize::new(width, height),
            padding: Self::DEFAULT_PADDING,
        }
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn width(&self) -> f32 {
        self.canvas.width()
    }

    pub fn height(&self) -> f32 {
        self.canvas.height()
    }
}

impl From<&CanvasSettings> for LayoutOptions {
    fn from(settings: &CanvasSettings) -> Self {
        Self {
            canvas: CanvasSize::new(settings.width, settings.height),
            padding: settings.padding,
        }
    }
}

/// Run an engine over `items`, returning the re-placed items.
pub fn layout_items(layout: AutoLayout, options: &LayoutOptions, items: &[Item]) -> Vec<Item> {
    log::debug!(
        "{layout} layout: {} items into {}x{} (padding {})",
        items.len(),
        options.width(),
        options.height(),
        options.padding
    );
    match layout {
        AutoLayout::Grid => grid::grid_layout(options, items),
        AutoLayout::Mosaic => mosaic::mosaic_layout(options, items),
    }
}

/// Re-run the active engine, or hand the items back untouched in free mode.
pub fn recalculate(mode: LayoutMode, options: &LayoutOptions, items: Vec<Item>) -> Vec<Item> {
    match mode.auto() {
        Some(layout) => layout_items(layout, options, &items),
        None => items,
    }
}

/// A named canvas size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CanvasPreset {
    pub name: &'static str,
    pub width: f32,
    pub height: f32,
}

pub const PRESETS: [CanvasPreset; 4] = [
    CanvasPreset {
        name: "Square (IG)",
        width: 1080.0,
        height: 1080.0,
    },
    CanvasPreset {
        name: "Portrait (Story)",
        width: 1080.0,
        height: 1920.0,
    },
    CanvasPreset {
        name: "Landscape (FHD)",
        width: 1920.0,
        height: 1080.0,
    },
    // ~300ppi
    CanvasPreset {
        name: "A4 (Print)",
        width: 2480.0,
        height: 3508.0,
    },
];
