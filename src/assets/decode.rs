use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{InkwarpError, InkwarpResult};
use crate::render::raster::Raster;

/// Decode encoded image bytes (PNG, JPEG, ...) into a normalized straight-alpha [`Raster`].
pub fn decode_image(bytes: &[u8]) -> InkwarpResult<Raster> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Raster::from_rgba8(width, height, rgba.as_raw())
}

/// Read and decode the image at `path`.
///
/// Unreadable or undecodable files are reported as IO failures.
#[tracing::instrument(level = "debug")]
pub fn load_image(path: &Path) -> InkwarpResult<Raster> {
    let bytes = std::fs::read(path).map_err(|e| {
        InkwarpError::io(format!("failed to read image '{}': {e}", path.display()))
    })?;
    let img = decode_image(&bytes).map_err(|e| match e {
        InkwarpError::Other(inner) => {
            InkwarpError::io(format!("failed to decode image '{}': {inner:#}", path.display()))
        }
        other => other,
    })?;
    tracing::debug!(width = img.width(), height = img.height(), "loaded image");
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
