use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, Strength};
use crate::foundation::error::{InkwarpError, InkwarpResult};
use crate::render::compositor::CompositorOpts;
use crate::render::offscreen::DistortionState;
use crate::render::raster::Raster;

/// A strength ramp rendered as a fixed number of frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepPlan {
    /// Number of frames to emit.
    pub total_frames: u64,
    /// Strength approached by the ramp.
    pub target: Strength,
    /// Ring count of the displacement field.
    pub period: u32,
    /// Presentation frame rate announced to the sink.
    pub fps: Fps,
}

impl SweepPlan {
    /// Build a plan with an explicit frame count.
    pub fn new(total_frames: u64, target: Strength, period: u32, fps: Fps) -> InkwarpResult<Self> {
        if total_frames == 0 {
            return Err(InkwarpError::configuration("sweep needs at least one frame"));
        }
        if period == 0 {
            return Err(InkwarpError::configuration("period must be a positive integer"));
        }
        Ok(Self {
            total_frames,
            target,
            period,
            fps,
        })
    }

    /// Build a plan lasting `duration_secs` at `fps`; partial trailing frames are dropped.
    pub fn from_duration(
        duration_secs: f64,
        fps: Fps,
        target: Strength,
        period: u32,
    ) -> InkwarpResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(InkwarpError::configuration(format!(
                "sweep duration must be a positive number of seconds, got {duration_secs}"
            )));
        }
        let total_frames = fps.secs_to_frames_floor(duration_secs);
        if total_frames == 0 {
            return Err(InkwarpError::configuration(format!(
                "sweep duration {duration_secs}s is shorter than one frame at {} fps",
                fps.as_f64()
            )));
        }
        Self::new(total_frames, target, period, fps)
    }

    /// Strength of frame `i`: `target * i / total_frames`.
    ///
    /// Starts at zero and stays strictly below the target on the last frame.
    pub fn strength_at(&self, i: u64) -> Strength {
        self.target.scaled(i as f64 / self.total_frames as f64)
    }
}

/// Cooperative cancellation flag, checked by the sweep driver between frames.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create an un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the frame in progress still completes.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Outcome of a sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Frames in the plan.
    pub frames_total: u64,
    /// Frames accepted by the sink.
    pub frames_written: u64,
    /// The sweep stopped early because of a [`CancelToken`].
    pub cancelled: bool,
}

/// Render `plan` for `image` at its native size and stream every frame into `sink`.
pub fn sweep(
    image: &Raster,
    plan: &SweepPlan,
    opts: CompositorOpts,
    sink: &mut dyn FrameSink,
    cancel: Option<&CancelToken>,
) -> InkwarpResult<SweepStats> {
    let mut state = DistortionState::new(image.clone(), plan.period, Strength::ZERO, opts)?;
    run_sweep(&mut state, plan, sink, cancel)
}

/// Drive an existing distortion state through `plan`.
///
/// The state's strength is restored afterwards. When a push fails the error is returned right away
/// and `sink.end()` is not called; cleaning up partial output is the sink's job. On cancellation
/// the sink is finalized normally.
#[tracing::instrument(skip_all, fields(frames = plan.total_frames, target = plan.target.percent()))]
pub fn run_sweep(
    state: &mut DistortionState,
    plan: &SweepPlan,
    sink: &mut dyn FrameSink,
    cancel: Option<&CancelToken>,
) -> InkwarpResult<SweepStats> {
    state.set_period(plan.period)?;
    let previous = state.strength();
    let res = drive(state, plan, sink, cancel);
    state.set_strength(previous);
    res
}

fn drive(
    state: &mut DistortionState,
    plan: &SweepPlan,
    sink: &mut dyn FrameSink,
    cancel: Option<&CancelToken>,
) -> InkwarpResult<SweepStats> {
    let native = state.image().viewport();
    sink.begin(SinkConfig {
        width: native.width,
        height: native.height,
        fps: plan.fps,
    })?;

    let progress_every = plan.fps.frames_per_second_rounded();
    let mut stats = SweepStats {
        frames_total: plan.total_frames,
        ..SweepStats::default()
    };
    tracing::info!(
        width = native.width,
        height = native.height,
        "sweep started"
    );

    for i in 0..plan.total_frames {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            tracing::warn!(frame = i, "sweep cancelled");
            stats.cancelled = true;
            break;
        }
        if i % progress_every == 0 {
            tracing::info!(
                frame = i,
                percent = 100.0 * i as f64 / plan.total_frames as f64,
                "sweep progress"
            );
        }

        state.set_strength(plan.strength_at(i));
        let frame = state.render_native()?.to_rgba8();
        sink.push_frame(FrameIndex(i), &frame)?;
        stats.frames_written += 1;
    }

    sink.end()?;
    tracing::info!(frames = stats.frames_written, "sweep finished");
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/session/sweep.rs"]
mod tests;
