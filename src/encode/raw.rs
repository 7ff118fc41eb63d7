use std::io::Write;

use crate::encode::sink::{FrameSink, SinkConfig, check_frame_order};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{InkwarpError, InkwarpResult};
use crate::render::raster::FrameRGBA;

/// Sink that writes each frame's RGBA8 bytes verbatim to a writer.
///
/// Suitable for piping into an external encoder started by the caller (`-f rawvideo -pix_fmt rgba`).
pub struct RawStreamSink<W: Write + Send> {
    writer: W,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    frames_written: u64,
}

impl<W: Write + Send> RawStreamSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            cfg: None,
            last_idx: None,
            frames_written: 0,
        }
    }

    /// Frames successfully written since `begin`.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Unwrap the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> FrameSink for RawStreamSink<W> {
    fn begin(&mut self, cfg: SinkConfig) -> InkwarpResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(InkwarpError::configuration(
                "raw stream width/height must be non-zero",
            ));
        }
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.frames_written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> InkwarpResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| InkwarpError::io("raw stream sink not started"))?;
        check_frame_order(self.last_idx, idx)?;
        cfg.check_frame(frame)?;
        self.last_idx = Some(idx);
        self.writer
            .write_all(&frame.data)
            .map_err(|e| InkwarpError::io(format!("failed to write raw frame: {e}")))?;
        self.frames_written += 1;
        Ok(())
    }

    fn end(&mut self) -> InkwarpResult<()> {
        self.writer
            .flush()
            .map_err(|e| InkwarpError::io(format!("failed to flush raw stream: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/raw.rs"]
mod tests;
