//! Inkwarp renders a "wavy ink" distortion of a still image.
//!
//! A concentric-ring displacement field is sampled per pixel and drives a 9-tap blur whose taps are
//! pushed along the field. The crate exposes the pieces separately:
//!
//! - Generate a [`DisplacementField`] and render single frames with [`render`]
//! - Hold long-lived state in a [`DistortionState`] or an [`InteractiveSession`]
//! - Stream a strength ramp into a [`FrameSink`] with [`sweep`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod encode;
mod field;
mod foundation;

/// CPU renderer: rasters, sampling and the distortion compositor.
pub mod render;
/// Interactive tuning sessions and strength sweeps.
pub mod session;

pub use crate::foundation::core::{Fps, FrameIndex, Strength, TAP_SPACING, Viewport};
pub use crate::foundation::error::{InkwarpError, InkwarpResult};

pub use crate::assets::decode::{decode_image, load_image};
pub use crate::config::WarpConfig;
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path};
pub use crate::encode::png::save_png;
pub use crate::encode::raw::RawStreamSink;
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::field::displacement::{DEFAULT_PERIOD, DisplacementField};
pub use crate::render::compositor::{CompositorOpts, blur3x3, render};
pub use crate::render::offscreen::DistortionState;
pub use crate::render::raster::{FrameBuffer, FrameRGBA, Raster};
pub use crate::render::sampler::{EdgeMode, Texture, sample, sample_with};
pub use crate::session::interactive::{InteractiveSession, WheelScaling};
pub use crate::session::sweep::{CancelToken, SweepPlan, SweepStats, run_sweep, sweep};
