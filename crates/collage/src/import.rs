//! Turning image sources into placed items.
//!
//! Reading an image's pixel size is the only slow part of an import, so it
//! sits behind [`DimensionResolver`]. Everything after resolution is
//! synchronous, and the result is applied to the store in one step.

use crate::coords::{CanvasPoint, CanvasSize};
use crate::grid::grid_layout;
use crate::layout::LayoutOptions;
use crate::store::CollageStore;
use crate::{z_index_above, CanvasSettings, Item};
use std::future::Future;
use thiserror::Error;

/// Longest edge a single dropped image is shrunk to.
pub const SINGLE_IMAGE_MAX_EXTENT: f32 = 300.0;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read image {src}: {reason}")]
    Decode { src: String, reason: String },

    #[error("no images to import")]
    Empty,
}

impl ImportError {
    pub fn decode(src: impl Into<String>, reason: impl ToString) -> Self {
        ImportError::Decode {
            src: src.into(),
            reason: reason.to_string(),
        }
    }
}

/// Looks up the natural pixel size of an image source.
pub trait DimensionResolver {
    fn resolve(&self, source: &str) -> impl Future<Output = Result<CanvasSize, ImportError>>;
}

/// Store state an import is computed against.
#[derive(Clone, Debug)]
pub struct ImportContext<'a> {
    /// Number of items already on the canvas; new items stack above them.
    pub item_count: usize,
    pub settings: &'a CanvasSettings,
    /// Drop location, when the images were dropped onto the canvas.
    pub pointer: Option<CanvasPoint>,
}

impl<'a> ImportContext<'a> {
    pub fn for_store(store: &'a CollageStore, pointer: Option<CanvasPoint>) -> Self {
        Self {
            item_count: store.items().len(),
            settings: store.settings(),
            pointer,
        }
    }
}

/// Items produced by an import, ready to be added.
#[derive(Clone, Debug, PartialEq)]
pub enum Import {
    Single(Item),
    Batch(Vec<Item>),
}

impl Import {
    pub fn items(&self) -> &[Item] {
        match self {
            Import::Single(item) => std::slice::from_ref(item),
            Import::Batch(items) => items,
        }
    }

    /// Add the imported items as a single undo step.
    pub fn apply(self, store: &mut CollageStore) {
        match self {
            Import::Single(item) => store.add_item(item),
            Import::Batch(items) => store.add_items(items),
        }
    }
}

/// Scale factor that fits `natural` inside the single-image box, never above 1.
fn single_image_scale(natural: CanvasSize) -> f32 {
    (SINGLE_IMAGE_MAX_EXTENT / natural.width())
        .min(SINGLE_IMAGE_MAX_EXTENT / natural.height())
        .min(1.0)
}

fn single_image(src: &str, natural: CanvasSize, context: &ImportContext<'_>) -> Item {
    let size = natural * single_image_scale(natural);
    let position = match context.pointer {
        Some(pointer) => CanvasPoint::new(
            pointer.x() - size.width() / 2.0,
            pointer.y() - size.height() / 2.0,
        ),
        None => CanvasPoint::default(),
    };

    let mut item = Item::image(src, natural)
        .with_position(position)
        .with_z_index(z_index_above(context.item_count, 0));
    item.size = size;
    item
}

fn image_batch(images: Vec<(&str, CanvasSize)>, context: &ImportContext<'_>) -> Vec<Item> {
    let items: Vec<Item> = images
        .into_iter()
        .enumerate()
        .map(|(i, (src, natural))| {
            Item::image(src, natural).with_z_index(z_index_above(context.item_count, i))
        })
        .collect();

    let padding = match context.settings.padding {
        p if p == 0.0 => LayoutOptions::DEFAULT_PADDING,
        p => p,
    };
    let options = LayoutOptions::from(context.settings).with_padding(padding);
    grid_layout(&options, &items)
}

/// Resolve every source and build the items to add.
///
/// All sources must resolve; on the first failure nothing is produced.
pub async fn import_images<R, S>(
    resolver: &R,
    sources: &[S],
    context: ImportContext<'_>,
) -> Result<Import, ImportError>
where
    R: DimensionResolver,
    S: AsRef<str>,
{
    let mut images = Vec::with_capacity(sources.len());
    for source in sources {
        let source = source.as_ref();
        let natural = resolver.resolve(source).await?;
        log::debug!("resolved {source} to {}x{}", natural.width(), natural.height());
        images.push((source, natural));
    }

    match images.len() {
        0 => Err(ImportError::Empty),
        1 => {
            let (src, natural) = images[0];
            Ok(Import::Single(single_image(src, natural, &context)))
        }
        _ => Ok(Import::Batch(image_batch(images, &context))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutMode;
    use std::collections::HashMap;

    struct FakeResolver(HashMap<&'static str, CanvasSize>);

    impl FakeResolver {
        fn new() -> Self {
            Self(HashMap::from([
                ("big.png", CanvasSize::new(1200.0, 600.0)),
                ("small.png", CanvasSize::new(100.0, 50.0)),
                ("square.png", CanvasSize::new(400.0, 400.0)),
            ]))
        }
    }

    impl DimensionResolver for FakeResolver {
        async fn resolve(&self, source: &str) -> Result<CanvasSize, ImportError> {
            self.0
                .get(source)
                .copied()
                .ok_or_else(|| ImportError::decode(source, "not found"))
        }
    }

    fn context(settings: &CanvasSettings, pointer: Option<CanvasPoint>) -> ImportContext<'_> {
        ImportContext {
            item_count: 3,
            settings,
            pointer,
        }
    }

    #[test]
    fn single_large_image_is_shrunk_and_centered_on_pointer() {
        let settings = CanvasSettings::default();
        let pointer = Some(CanvasPoint::new(400.0, 300.0));
        let import = smol::block_on(import_images(
            &FakeResolver::new(),
            &["big.png"],
            context(&settings, pointer),
        ))
        .unwrap();

        let Import::Single(item) = import else {
            panic!("expected a single import");
        };
        assert_eq!(item.size, CanvasSize::new(300.0, 150.0));
        assert_eq!(item.position, CanvasPoint::new(250.0, 225.0));
        assert_eq!(item.original_width, Some(1200.0));
        assert_eq!(item.z_index, 3);
        assert_eq!(item.scale, 1.0);
    }

    #[test]
    fn single_small_image_is_never_upscaled() {
        let settings = CanvasSettings::default();
        let import = smol::block_on(import_images(
            &FakeResolver::new(),
            &["small.png"],
            context(&settings, None),
        ))
        .unwrap();

        assert_eq!(import.items()[0].size, CanvasSize::new(100.0, 50.0));
        assert_eq!(import.items()[0].position, CanvasPoint::new(0.0, 0.0));
    }

    #[test]
    fn several_images_are_pre_laid_out_on_a_grid() {
        let settings = CanvasSettings {
            padding: 0.0,
            ..Default::default()
        };
        let import = smol::block_on(import_images(
            &FakeResolver::new(),
            &["big.png", "square.png"],
            context(&settings, None),
        ))
        .unwrap();

        let Import::Batch(items) = import else {
            panic!("expected a batch import");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].z_index, 3);
        assert_eq!(items[1].z_index, 4);
        // Zero padding falls back to the default gap.
        assert!((items[0].position.x() - 10.0).abs() < 0.01);
        assert!(items[1].position.x() > items[0].position.x());
    }

    #[test]
    fn one_failure_fails_the_whole_import() {
        let settings = CanvasSettings::default();
        let result = smol::block_on(import_images(
            &FakeResolver::new(),
            &["square.png", "missing.png"],
            context(&settings, None),
        ));
        assert!(matches!(result, Err(ImportError::Decode { src, .. }) if src == "missing.png"));
    }

    #[test]
    fn no_sources_is_an_error() {
        let settings = CanvasSettings::default();
        let sources: [&str; 0] = [];
        let result = smol::block_on(import_images(
            &FakeResolver::new(),
            &sources,
            context(&settings, None),
        ));
        assert!(matches!(result, Err(ImportError::Empty)));
    }

    #[test]
    fn applying_a_batch_is_one_undo_step() {
        let mut store = CollageStore::new();
        let settings = store.settings().clone();
        let import = smol::block_on(import_images(
            &FakeResolver::new(),
            &["big.png", "small.png", "square.png"],
            ImportContext {
                item_count: 0,
                settings: &settings,
                pointer: None,
            },
        ))
        .unwrap();

        import.apply(&mut store);

        assert_eq!(store.items().len(), 3);
        assert_eq!(store.history().past_len(), 1);
        assert_eq!(store.layout_mode(), LayoutMode::Free);
        assert!(store.undo());
        assert!(store.items().is_empty());
    }
}
