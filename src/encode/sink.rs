use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{InkwarpError, InkwarpResult};
use crate::render::raster::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before the first frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Presentation frame rate.
    pub fps: Fps,
}

impl SinkConfig {
    /// Bytes per RGBA8 frame.
    pub fn frame_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }

    /// Reject frames whose size does not match this configuration.
    pub fn check_frame(&self, frame: &FrameRGBA) -> InkwarpResult<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(InkwarpError::precondition(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, self.width, self.height
            )));
        }
        if frame.data.len() != self.frame_len() {
            return Err(InkwarpError::precondition(
                "frame.data size mismatch with width*height*4",
            ));
        }
        Ok(())
    }
}

/// Reject `idx` unless it is strictly greater than the last accepted index.
pub(crate) fn check_frame_order(last: Option<FrameIndex>, idx: FrameIndex) -> InkwarpResult<()> {
    if let Some(last) = last
        && idx.0 <= last.0
    {
        return Err(InkwarpError::io(format!(
            "out-of-order frame index {} after {}",
            idx.0, last.0
        )));
    }
    Ok(())
}

/// Consumer of rendered frames in presentation order.
///
/// Ordering contract: `push_frame` is called with strictly increasing [`FrameIndex`] values.
/// A blocking `push_frame` blocks the producer; nothing is buffered on the producer side.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> InkwarpResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> InkwarpResult<()>;
    /// Called once after the last frame. Not called when a push failed.
    fn end(&mut self) -> InkwarpResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    last_idx: Option<FrameIndex>,
    finished: bool,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames in presentation order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` has been called since the last `begin`.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> InkwarpResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.last_idx = None;
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> InkwarpResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| InkwarpError::io("in-memory sink not started"))?;
        check_frame_order(self.last_idx, idx)?;
        cfg.check_frame(frame)?;
        self.last_idx = Some(idx);
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> InkwarpResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
