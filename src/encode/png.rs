use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::foundation::error::{InkwarpError, InkwarpResult};
use crate::render::raster::FrameRGBA;

/// Write `frame` as a PNG at `path`.
///
/// The image is encoded into a sibling `.partial` file and renamed into place, so a failed export
/// never leaves a truncated PNG at `path`.
#[tracing::instrument(level = "debug", skip(frame), fields(width = frame.width, height = frame.height))]
pub fn save_png(path: &Path, frame: &FrameRGBA) -> InkwarpResult<()> {
    if frame.data.len() != frame.expected_len() || frame.width == 0 || frame.height == 0 {
        return Err(InkwarpError::precondition(
            "png export expects a non-empty frame matching width*height*4",
        ));
    }
    ensure_parent_dir(path)?;

    let tmp = partial_path(path);
    let written = image::save_buffer_with_format(
        &tmp,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", tmp.display()));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&tmp);
        return Err(InkwarpError::io(format!("{e:#}")));
    }

    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        InkwarpError::io(format!(
            "failed to move '{}' into place: {e}",
            path.display()
        ))
    })?;
    tracing::debug!(path = %path.display(), "saved png");
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".partial");
    path.with_file_name(name)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
