use crate::coords::{Bounds, CanvasPoint, CanvasSize};
use crate::dims;
use crate::ItemId;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The kind of an item, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Image,
    Text,
    Sticker,
}

/// Kind-specific payload of an item.
///
/// Geometry is shared by every kind and lives on [`Item`]; only the fields
/// that make sense for a kind are carried here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemContent {
    Image {
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        crop: Option<Crop>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<Filter>,
    },
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_size: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_family: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        fill: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_style: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        align: Option<String>,
    },
    Sticker {
        src: String,
    },
}

impl ItemContent {
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemContent::Image { .. } => ItemKind::Image,
            ItemContent::Text { .. } => ItemKind::Text,
            ItemContent::Sticker { .. } => ItemKind::Sticker,
        }
    }
}

/// Source-image crop rectangle, in source pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Image adjustments. Absent values leave the image untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrast: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grayscale: Option<f32>,
}

/// Drop shadow drawn behind an item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    pub color: String,
    pub blur: f32,
    pub offset: Vec2,
    pub opacity: f32,
}

/// Cosmetic styling shared by all kinds. Never read by the layout engines.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
}

/// A placed rectangular object on the collage canvas.
///
/// `size` is the displayed size before `scale` is applied. Layout engines
/// derive aspect ratios from the natural size (see [`dims::item_dims`]), which
/// prefers `original_width`/`original_height` when they are set.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub content: ItemContent,

    /// Top-left corner in canvas space.
    pub position: CanvasPoint,
    pub size: CanvasSize,
    /// Degrees, clockwise.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Paint order, higher is in front.
    #[serde(default)]
    pub z_index: i32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_height: Option<f32>,

    #[serde(default)]
    pub style: ItemStyle,
}

/// Z-index for the `offset`-th new item stacked above `item_count` existing ones.
pub fn z_index_above(item_count: usize, offset: usize) -> i32 {
    i32::try_from(item_count + offset).unwrap_or(i32::MAX)
}

fn default_scale() -> f32 {
    1.0
}

impl Item {
    pub fn new(content: ItemContent, position: CanvasPoint, size: CanvasSize) -> Self {
        Self {
            id: ItemId::new(),
            content,
            position,
            size,
            rotation: 0.0,
            scale: 1.0,
            z_index: 0,
            original_width: None,
            original_height: None,
            style: ItemStyle::default(),
        }
    }

    /// An image item whose natural size is recorded as its original size.
    pub fn image(src: impl Into<String>, natural: CanvasSize) -> Self {
        let content = ItemContent::Image {
            src: src.into(),
            crop: None,
            filter: None,
        };
        Self::new(content, CanvasPoint::default(), natural).with_original_size(natural)
    }

    pub fn text(text: impl Into<String>, position: CanvasPoint, size: CanvasSize) -> Self {
        let content = ItemContent::Text {
            text: text.into(),
            font_size: None,
            font_family: None,
            fill: None,
            font_style: None,
            align: None,
        };
        Self::new(content, position, size)
    }

    pub fn sticker(src: impl Into<String>, position: CanvasPoint, size: CanvasSize) -> Self {
        let content = ItemContent::Sticker { src: src.into() };
        Self::new(content, position, size)
    }

    pub fn with_id(mut self, id: ItemId) -> Self {
        self.id = id;
        self
    }

    pub fn with_position(mut self, position: CanvasPoint) -> Self {
        self.position = position;
        self
    }

    pub fn with_original_size(mut self, natural: CanvasSize) -> Self {
        self.original_width = Some(natural.width());
        self.original_height = Some(natural.height());
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn kind(&self) -> ItemKind {
        self.content.kind()
    }

    /// Natural size used for aspect-ratio math and hit testing.
    pub fn natural_size(&self) -> CanvasSize {
        dims::item_dims(self)
    }

    /// Hit-test bounds: the item's position with its natural size.
    pub fn hit_bounds(&self) -> Bounds {
        Bounds::new(self.position, self.natural_size())
    }

    /// Check if a point is inside this item (boundary-inclusive).
    pub fn contains_point(&self, point: CanvasPoint) -> bool {
        dims::is_point_in_item(self, point)
    }

    /// The box actually painted: position with `size * scale`.
    pub fn rendered_bounds(&self) -> Bounds {
        Bounds::new(self.position, self.size * self.scale)
    }
}

/// A partial edit of an item. Unset fields are left alone.
///
/// Kind-specific fields only take effect on items of that kind: `text` and
/// the font fields on text items, `crop` and `filter` on images.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<ItemStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<Crop>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

impl ItemUpdate {
    pub fn position(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    /// Whether this update changes where the item sits.
    pub fn moves(&self) -> bool {
        self.x.is_some() || self.y.is_some()
    }

    pub fn apply_to(&self, item: &mut Item) {
        if let Some(x) = self.x {
            item.position.0.x = x;
        }
        if let Some(y) = self.y {
            item.position.0.y = y;
        }
        if let Some(width) = self.width {
            item.size.0.x = width;
        }
        if let Some(height) = self.height {
            item.size.0.y = height;
        }
        if let Some(rotation) = self.rotation {
            item.rotation = rotation;
        }
        if let Some(scale) = self.scale {
            item.scale = scale;
        }
        if let Some(z_index) = self.z_index {
            item.z_index = z_index;
        }
        if let Some(style) = &self.style {
            item.style = style.clone();
        }

        match &mut item.content {
            ItemContent::Text {
                text,
                font_size,
                fill,
                ..
            } => {
                if let Some(new_text) = &self.text {
                    *text = new_text.clone();
                }
                if self.font_size.is_some() {
                    *font_size = self.font_size;
                }
                if self.fill.is_some() {
                    *fill = self.fill.clone();
                }
            }
            ItemContent::Image { crop, filter, .. } => {
                if self.crop.is_some() {
                    *crop = self.crop;
                }
                if self.filter.is_some() {
                    *filter = self.filter;
                }
            }
            ItemContent::Sticker { .. } => {}
        }
    }

    /// Return a copy of `item` with this update applied.
    pub fn applied(&self, item: &Item) -> Item {
        let mut updated = item.clone();
        self.apply_to(&mut updated);
        updated
    }
}
