//! Image dimension lookup for files on disk.

use collage::import::{DimensionResolver, ImportError};
use collage::CanvasSize;

/// Reads image headers from the local filesystem.
///
/// Decoding happens on smol's blocking pool so the executor thread is never
/// stalled on disk reads.
pub struct ImageFileResolver;

impl DimensionResolver for ImageFileResolver {
    async fn resolve(&self, source: &str) -> Result<CanvasSize, ImportError> {
        let path = source.to_string();
        let (width, height) = smol::unblock(move || image::image_dimensions(path))
            .await
            .map_err(|err| ImportError::decode(source, err))?;
        log::debug!("{source}: {width}x{height}");
        Ok(CanvasSize::new(width as f32, height as f32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_decode_error() {
        let result = smol::block_on(ImageFileResolver.resolve("/definitely/not/here.png"));
        assert!(matches!(result, Err(ImportError::Decode { src, .. }) if src.ends_with("here.png")));
    }
}
