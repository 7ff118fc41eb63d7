use crate::foundation::error::{InkwarpError, InkwarpResult};

/// Fraction of a viewport pixel between neighbouring taps of the 3x3 kernel.
pub const TAP_SPACING: f32 = 0.33;

/// Zero-based index of a frame within a sweep.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Rational frame rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be > 0.
    pub den: u32,
}

impl Fps {
    /// Frame rate the sweep encoder contract assumes.
    pub const SWEEP_DEFAULT: Fps = Fps { num: 30, den: 1 };

    /// Build a frame rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> InkwarpResult<Self> {
        if den == 0 {
            return Err(InkwarpError::configuration("fps denominator must be > 0"));
        }
        if num == 0 {
            return Err(InkwarpError::configuration("fps numerator must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frames per second as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Number of whole frames that fit in `secs` (truncating).
    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }

    /// Whole frames per second, rounded; used for progress granularity.
    pub fn frames_per_second_rounded(self) -> u64 {
        (self.as_f64().round() as u64).max(1)
    }
}

/// Target size used to derive the per-pixel tap step.
///
/// The interactive preview uses the window size; exports use the image's native size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Build a viewport, rejecting zero-area sizes.
    pub fn new(width: u32, height: u32) -> InkwarpResult<Self> {
        if width == 0 || height == 0 {
            return Err(InkwarpError::precondition(format!(
                "viewport must have non-zero area, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Normalized offset between neighbouring kernel taps, `(0.33/width, 0.33/height)`.
    pub fn tap_step(self) -> (f32, f32) {
        (
            TAP_SPACING / self.width as f32,
            TAP_SPACING / self.height as f32,
        )
    }

    /// Pixel count.
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Distortion strength, configured as a percentage.
///
/// The renderer works in implementation units (`percent / 100`).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
pub struct Strength {
    percent: f64,
}

impl Strength {
    /// No displacement; only the blur softening remains.
    pub const ZERO: Strength = Strength { percent: 0.0 };

    /// Build a strength from a percentage. Must be finite and non-negative.
    pub fn from_percent(percent: f64) -> InkwarpResult<Self> {
        if !percent.is_finite() || percent < 0.0 {
            return Err(InkwarpError::configuration(format!(
                "strength must be a finite percentage >= 0, got {percent}"
            )));
        }
        Ok(Self { percent })
    }

    /// Configured percentage.
    pub fn percent(self) -> f64 {
        self.percent
    }

    /// Displacement scale used by the compositor.
    pub fn units(self) -> f32 {
        (self.percent / 100.0) as f32
    }

    /// Linear interpolation from zero: `self * t`.
    pub(crate) fn scaled(self, t: f64) -> Self {
        Self {
            percent: self.percent * t,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
