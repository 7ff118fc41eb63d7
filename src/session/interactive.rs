use std::path::{Path, PathBuf};

use crate::encode::png::save_png;
use crate::foundation::core::{Strength, Viewport};
use crate::foundation::error::{InkwarpError, InkwarpResult};
use crate::render::compositor::CompositorOpts;
use crate::render::offscreen::DistortionState;
use crate::render::raster::{FrameBuffer, Raster};

/// Logarithmic scroll-wheel scaling: one tick changes the strength by
/// `delta * ln(1 + |strength|) / divisor`.
///
/// Steps grow with the current strength, so adjustments feel proportional. A strength of exactly
/// zero has a zero step and cannot be scrolled away from.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WheelScaling {
    /// Larger values give finer steps.
    pub divisor: f64,
}

impl Default for WheelScaling {
    fn default() -> Self {
        Self { divisor: 15.0 }
    }
}

impl WheelScaling {
    /// Build a scaling, rejecting non-positive divisors.
    pub fn new(divisor: f64) -> InkwarpResult<Self> {
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err(InkwarpError::configuration(format!(
                "wheel divisor must be > 0, got {divisor}"
            )));
        }
        Ok(Self { divisor })
    }

    /// Strength percentage after one scroll event of `delta` ticks.
    pub fn apply(self, percent: f64, delta: f64) -> f64 {
        let next = percent + delta * (1.0 + percent.abs()).ln() / self.divisor;
        next.max(0.0)
    }
}

/// Headless stand-in for the preview window: holds the strength the user is tuning, renders
/// previews at the window viewport and exports at native size on save.
#[derive(Clone, Debug)]
pub struct InteractiveSession {
    state: DistortionState,
    wheel: WheelScaling,
    output_path: PathBuf,
}

impl InteractiveSession {
    /// Start a session over `image`.
    pub fn new(
        image: Raster,
        period: u32,
        strength: Strength,
        opts: CompositorOpts,
        output_path: impl Into<PathBuf>,
    ) -> InkwarpResult<Self> {
        Ok(Self {
            state: DistortionState::new(image, period, strength, opts)?,
            wheel: WheelScaling::default(),
            output_path: output_path.into(),
        })
    }

    /// Replace the wheel scaling.
    pub fn with_wheel(mut self, wheel: WheelScaling) -> Self {
        self.wheel = wheel;
        self
    }

    /// Underlying distortion state.
    pub fn state(&self) -> &DistortionState {
        &self.state
    }

    /// Mutable access for drivers that run sweeps from a live session.
    pub fn state_mut(&mut self) -> &mut DistortionState {
        &mut self.state
    }

    /// Current strength.
    pub fn strength(&self) -> Strength {
        self.state.strength()
    }

    /// Set the strength directly.
    pub fn set_strength(&mut self, strength: Strength) {
        self.state.set_strength(strength);
    }

    /// Apply a scroll event and return the new strength.
    pub fn scroll(&mut self, delta: f64) -> InkwarpResult<Strength> {
        let next = Strength::from_percent(self.wheel.apply(self.strength().percent(), delta))?;
        self.state.set_strength(next);
        tracing::debug!(strength = next.percent(), "strength adjusted");
        Ok(next)
    }

    /// Change the field's ring count.
    pub fn set_period(&mut self, period: u32) -> InkwarpResult<()> {
        self.state.set_period(period)
    }

    /// Window resize.
    pub fn resize(&mut self, viewport: Viewport) -> InkwarpResult<()> {
        self.state.set_viewport(viewport)
    }

    /// Redraw at the window viewport.
    pub fn render_preview(&self) -> InkwarpResult<FrameBuffer> {
        self.state.render_viewport()
    }

    /// Offscreen render at an arbitrary size.
    pub fn render_to_buffer(&self, width: u32, height: u32) -> InkwarpResult<FrameBuffer> {
        self.state.render_to_buffer(width, height)
    }

    /// Offscreen render at the image's native size.
    pub fn render_export(&self) -> InkwarpResult<FrameBuffer> {
        self.state.render_native()
    }

    /// Where `save` writes by default.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Save trigger: render at native size and write a PNG to the session's output path.
    pub fn save(&self) -> InkwarpResult<PathBuf> {
        self.save_to(&self.output_path)?;
        Ok(self.output_path.clone())
    }

    /// Render at native size and write a PNG to `path`.
    pub fn save_to(&self, path: &Path) -> InkwarpResult<()> {
        tracing::info!(
            path = %path.display(),
            strength = self.strength().percent(),
            "saving image"
        );
        let frame = self.render_export()?.to_rgba8();
        save_png(path, &frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/interactive.rs"]
mod tests;
