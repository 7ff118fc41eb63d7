use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::field::displacement::DEFAULT_PERIOD;
use crate::foundation::core::{Fps, Strength};
use crate::foundation::error::{InkwarpError, InkwarpResult};
use crate::render::compositor::CompositorOpts;
use crate::session::interactive::WheelScaling;
use crate::session::sweep::SweepPlan;

/// Parameters shared by still export, sweeps and interactive sessions.
///
/// Every field has a default, so a JSON file only needs the keys it overrides:
///
/// ```json
/// { "period": 24, "strength_percent": 2.5, "output_path": "out/still.png" }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WarpConfig {
    /// Concentric ring count of the displacement field.
    pub period: u32,
    /// Still/interactive strength, in percent.
    pub strength_percent: f64,
    /// Output path for still export or the sweep video.
    pub output_path: PathBuf,
    /// Sweep length in seconds.
    pub duration_secs: Option<f64>,
    /// Strength the sweep ramps towards, in percent.
    pub target_strength_percent: Option<f64>,
    /// Sweep frame rate.
    pub fps: u32,
    /// Scroll-wheel step divisor.
    pub wheel_divisor: f64,
    /// Render rows on the rayon thread pool.
    pub parallel: bool,
    /// Flatten alpha over this color before video encoding.
    pub background_rgba: Option<[u8; 4]>,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            strength_percent: 1.0,
            output_path: PathBuf::from("screen.png"),
            duration_secs: None,
            target_strength_percent: None,
            fps: 30,
            wheel_divisor: 15.0,
            parallel: false,
            background_rgba: None,
        }
    }
}

impl WarpConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> InkwarpResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| InkwarpError::serde(format!("parse config JSON: {e}")))
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(s: &str) -> InkwarpResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> InkwarpResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            InkwarpError::io(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every field that can be checked without the sweep-only settings.
    pub fn validate(&self) -> InkwarpResult<()> {
        if self.period == 0 {
            return Err(InkwarpError::configuration("period must be a positive integer"));
        }
        self.strength()?;
        self.wheel()?;
        Fps::new(self.fps, 1)?;
        if let Some(d) = self.duration_secs
            && (!d.is_finite() || d <= 0.0)
        {
            return Err(InkwarpError::configuration(format!(
                "duration_secs must be > 0, got {d}"
            )));
        }
        if let Some(t) = self.target_strength_percent {
            Strength::from_percent(t)?;
        }
        Ok(())
    }

    /// Still/interactive strength.
    pub fn strength(&self) -> InkwarpResult<Strength> {
        Strength::from_percent(self.strength_percent)
    }

    /// Scroll-wheel scaling.
    pub fn wheel(&self) -> InkwarpResult<WheelScaling> {
        WheelScaling::new(self.wheel_divisor)
    }

    /// Compositor options.
    pub fn compositor_opts(&self) -> CompositorOpts {
        CompositorOpts {
            parallel: self.parallel,
        }
    }

    /// Build the sweep plan. Both `duration_secs` and `target_strength_percent` are required.
    pub fn sweep_plan(&self) -> InkwarpResult<SweepPlan> {
        self.validate()?;
        let duration = self
            .duration_secs
            .ok_or_else(|| InkwarpError::configuration("sweep requires duration_secs"))?;
        let target = self.target_strength_percent.ok_or_else(|| {
            InkwarpError::configuration("sweep requires target_strength_percent")
        })?;
        SweepPlan::from_duration(
            duration,
            Fps::new(self.fps, 1)?,
            Strength::from_percent(target)?,
            self.period,
        )
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
